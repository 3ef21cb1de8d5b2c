use std::fmt::Debug;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Deserialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::info;

pub const STATES_FIXTURE: &str = include_str!("../../test-vectors/fixtures/states.json");
pub const FLIGHTS_FIXTURE: &str = include_str!("../../test-vectors/fixtures/flights.json");

/// Widest `begin..end` window `/api/flights/all` accepts, in seconds.
const MAX_FLIGHT_WINDOW_SECS: i64 = 2 * 60 * 60;

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub username: String,
    pub password: String,
    /// Answer every request with this status and an empty body.
    pub forced_status: Option<StatusCode>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            username: "user".to_string(),
            password: "password".to_string(),
            forced_status: None,
        }
    }
}

impl MockConfig {
    pub fn with_forced_status(mut self, status: u16) -> Self {
        self.forced_status = StatusCode::from_u16(status).ok();
        self
    }
}

#[derive(Clone, Debug)]
pub struct MockState {
    config: Arc<MockConfig>,
    hits: Arc<AtomicUsize>,
}

impl MockState {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config: Arc::new(config),
            hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Requests received so far, on any route.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Count and log one request. Returns the forced response, if any.
    fn record(&self, route: &'static str, params: &impl Debug) -> Option<Response> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        match self.config.forced_status {
            Some(status) => {
                info!(route, ?params, status = status.as_u16(), "request (forced status)");
                Some(status.into_response())
            }
            None => {
                info!(route, ?params, "request");
                None
            }
        }
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!(
            "Basic {}",
            BASE64.encode(format!("{}:{}", self.config.username, self.config.password))
        );
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected)
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StatesParams {
    pub time: Option<i64>,
    pub icao24: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlightsParams {
    pub begin: Option<i64>,
    pub end: Option<i64>,
}

pub fn app(state: MockState) -> Router {
    Router::new()
        .route("/api/states/all", get(all_states))
        .route("/api/states/own", get(own_states))
        .route("/api/flights/all", get(all_flights))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

/// The states fixture, filtered by `icao24` and stamped with `time` when
/// given. `states` is `null` when nothing matches, as upstream does.
pub fn filter_states(params: &StatesParams) -> Value {
    let mut body: Value = serde_json::from_str(STATES_FIXTURE).unwrap_or(Value::Null);
    if let Some(time) = params.time {
        body["time"] = Value::from(time);
    }
    if let Some(icao24) = params.icao24.as_deref() {
        let matching: Vec<Value> = body["states"]
            .as_array()
            .map(|states| {
                states
                    .iter()
                    .filter(|s| s[0].as_str() == Some(icao24))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        body["states"] = if matching.is_empty() {
            Value::Null
        } else {
            Value::Array(matching)
        };
    }
    body
}

/// Fixture flights overlapping `begin..=end`.
pub fn filter_flights(begin: i64, end: i64) -> Vec<Value> {
    let flights: Vec<Value> = serde_json::from_str(FLIGHTS_FIXTURE).unwrap_or_default();
    flights
        .into_iter()
        .filter(|f| {
            let first_seen = f["firstSeen"].as_i64().unwrap_or(i64::MAX);
            let last_seen = f["lastSeen"].as_i64().unwrap_or(i64::MIN);
            first_seen <= end && last_seen >= begin
        })
        .collect()
}

async fn all_states(State(state): State<MockState>, Query(params): Query<StatesParams>) -> Response {
    if let Some(forced) = state.record("/api/states/all", &params) {
        return forced;
    }
    Json(filter_states(&params)).into_response()
}

async fn own_states(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<StatesParams>,
) -> Response {
    if let Some(forced) = state.record("/api/states/own", &params) {
        return forced;
    }
    if !state.authorized(&headers) {
        return StatusCode::FORBIDDEN.into_response();
    }
    Json(filter_states(&params)).into_response()
}

async fn all_flights(State(state): State<MockState>, Query(params): Query<FlightsParams>) -> Response {
    if let Some(forced) = state.record("/api/flights/all", &params) {
        return forced;
    }
    let (Some(begin), Some(end)) = (params.begin, params.end) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    if end < begin || end - begin > MAX_FLIGHT_WINDOW_SECS {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let flights = filter_flights(begin, end);
    if flights.is_empty() {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(flights).into_response()
}
