//! In-crate test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::{ClientConfig, OpenSkyClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

pub(crate) const STATES_BODY: &str = include_str!("../../test-vectors/fixtures/states.json");
pub(crate) const FLIGHTS_BODY: &str = include_str!("../../test-vectors/fixtures/flights.json");

/// Transport that answers every request with a canned response and records
/// what it was asked.
pub(crate) struct StubTransport {
    status: u16,
    body: String,
    calls: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub(crate) fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Transport for StubTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        Ok(HttpResponse {
            status: self.status,
            headers: Vec::new(),
            body: self.body.clone(),
        })
    }
}

/// Client against `http://example.com` backed by `stub`.
pub(crate) fn client_with(
    stub: &Arc<StubTransport>,
    credentials: Option<(&str, &str)>,
) -> OpenSkyClient {
    let mut config = ClientConfig::new()
        .with_base_url("http://example.com")
        .with_transport(stub.clone());
    if let Some((username, password)) = credentials {
        config = config.with_credentials(username, password);
    }
    OpenSkyClient::new(config).unwrap()
}
