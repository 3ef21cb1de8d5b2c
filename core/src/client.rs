//! Client configuration and the shared request pipeline.
//!
//! # Design
//! `OpenSkyClient` is built once from a `ClientConfig` and never mutated
//! afterwards: the base URL is parsed and checked at construction, and the
//! transport and credentials are read-only. Each service call composes a
//! fresh `HttpRequest`, so one client can serve concurrent calls from several
//! threads.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::auth::{authorize, AuthPolicy, Credentials};
use crate::error::ApiError;
use crate::flights::FlightsService;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport, DEFAULT_TIMEOUT};
use crate::query::{compose_url, QueryValue};
use crate::states::StatesService;
use crate::status::{classify, StatusOutcome, StatusPolicy};

/// Root of the public OpenSky REST API.
pub const DEFAULT_BASE_URL: &str = "https://opensky-network.org/api/";

pub const ENV_BASE_URL: &str = "OPENSKY_BASE_URL";
pub const ENV_USERNAME: &str = "OPENSKY_USERNAME";
pub const ENV_PASSWORD: &str = "OPENSKY_PASSWORD";

/// Construction options for `OpenSkyClient`.
///
/// Defaults: the public API root, no credentials, and a `UreqTransport` with
/// a 30 second timeout.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    credentials: Option<Credentials>,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            transport: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `OPENSKY_BASE_URL`, `OPENSKY_USERNAME` and
    /// `OPENSKY_PASSWORD`. Unset or empty variables are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut config = Self::default();
        if let Some(base_url) = var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        let username = var(ENV_USERNAME);
        let password = var(ENV_PASSWORD);
        if username.is_some() || password.is_some() {
            config.credentials = Some(Credentials::new(
                username.unwrap_or_default(),
                password.unwrap_or_default(),
            ));
        }
        config
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Point the client at another server, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Timeout for the default transport. Ignored when a custom transport is
    /// supplied.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

/// Blocking client for the OpenSky REST API.
#[derive(Clone)]
pub struct OpenSkyClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl OpenSkyClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let transport = config
            .transport
            .unwrap_or_else(|| Arc::new(UreqTransport::new(config.timeout)));

        Ok(Self {
            transport,
            base_url,
            credentials: config.credentials,
        })
    }

    /// Client for the public API without credentials.
    pub fn anonymous() -> Result<Self, ApiError> {
        Self::new(ClientConfig::default())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn states(&self) -> StatesService<'_> {
        StatesService::new(self)
    }

    pub fn flights(&self) -> FlightsService<'_> {
        FlightsService::new(self)
    }

    /// Compose, authenticate, dispatch and classify one GET request.
    pub(crate) fn send(
        &self,
        endpoint: &str,
        params: &[(&str, QueryValue<'_>)],
        auth: AuthPolicy,
        policy: StatusPolicy,
    ) -> Result<(StatusOutcome, HttpResponse), ApiError> {
        let url = compose_url(&self.base_url, endpoint, params)?;
        let mut request = HttpRequest::get(url.as_str());
        let authenticated = authorize(auth, self.credentials.as_ref(), &mut request)?;

        debug!(url = %url, authenticated, "dispatching request");
        let response = self.transport.execute(&request)?;

        match classify(response.status, policy) {
            Ok(outcome) => {
                debug!(status = response.status, ?outcome, "response classified");
                Ok((outcome, response))
            }
            Err(e) => {
                warn!(url = %url, status = response.status, error = %e, "request failed");
                Err(e)
            }
        }
    }
}

impl fmt::Debug for OpenSkyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenSkyClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
