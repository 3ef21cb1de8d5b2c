//! Flight queries (`/api/flights/*`).

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::auth::AuthPolicy;
use crate::client::OpenSkyClient;
use crate::error::ApiError;
use crate::query::QueryValue;
use crate::status::{StatusOutcome, StatusPolicy};
use crate::types::Flight;

pub const ALL_FLIGHTS_ENDPOINT: &str = "/api/flights/all";

/// Widest window `/api/flights/all` accepts.
pub const MAX_FLIGHT_WINDOW_HOURS: i64 = 2;

/// Check a flights time window before anything is sent.
pub fn validate_time_range(begin: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ApiError> {
    if end < begin {
        return Err(ApiError::EndBeforeBegin);
    }
    if end - begin > TimeDelta::hours(MAX_FLIGHT_WINDOW_HOURS) {
        return Err(ApiError::TimeRangeTooBig);
    }
    Ok(())
}

/// Access to the flights endpoints. Obtained from `OpenSkyClient::flights`.
#[derive(Debug, Clone, Copy)]
pub struct FlightsService<'a> {
    client: &'a OpenSkyClient,
}

impl<'a> FlightsService<'a> {
    pub(crate) fn new(client: &'a OpenSkyClient) -> Self {
        Self { client }
    }

    /// All flights seen between `begin` and `end` (at most two hours apart).
    ///
    /// A window with no flights yields an empty vector, not an error.
    pub fn get_flights_in_time(
        &self,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Flight>, ApiError> {
        validate_time_range(begin, end)?;

        let params = [
            ("begin", QueryValue::Required(begin)),
            ("end", QueryValue::Required(end)),
        ];
        let (outcome, response) = self.client.send(
            ALL_FLIGHTS_ENDPOINT,
            &params,
            AuthPolicy::Optional,
            StatusPolicy::Flights,
        )?;

        if outcome == StatusOutcome::EmptyResult {
            debug!(begin = %begin, end = %end, "no flights in window");
            return Ok(Vec::new());
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}
