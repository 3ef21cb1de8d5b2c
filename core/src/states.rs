//! State vector queries (`/api/states/*`).

use chrono::{DateTime, Utc};

use crate::auth::AuthPolicy;
use crate::client::OpenSkyClient;
use crate::decode::decode_states_response;
use crate::error::ApiError;
use crate::query::QueryValue;
use crate::status::StatusPolicy;
use crate::types::StatesResponse;

pub const ALL_STATES_ENDPOINT: &str = "/api/states/all";
pub const OWN_STATES_ENDPOINT: &str = "/api/states/own";

/// Optional filters for a states query. The default asks for the most recent
/// states of every aircraft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatesQuery {
    pub time: Option<DateTime<Utc>>,
    pub icao24: Option<String>,
}

impl StatesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// States as of `time` instead of now.
    pub fn at(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Restrict to one transponder. The address is normalized to lowercase.
    pub fn icao24(mut self, address: &str) -> Self {
        self.icao24 = Some(address.trim().to_ascii_lowercase());
        self
    }

    fn params(&self) -> [(&'static str, QueryValue<'_>); 2] {
        [
            ("time", QueryValue::Timestamp(self.time)),
            ("icao24", QueryValue::Text(self.icao24.as_deref())),
        ]
    }
}

/// Access to the states endpoints. Obtained from `OpenSkyClient::states`.
#[derive(Debug, Clone, Copy)]
pub struct StatesService<'a> {
    client: &'a OpenSkyClient,
}

impl<'a> StatesService<'a> {
    pub(crate) fn new(client: &'a OpenSkyClient) -> Self {
        Self { client }
    }

    /// Public state vectors. Authenticates when credentials are configured.
    pub fn get_all_states(&self, query: &StatesQuery) -> Result<StatesResponse, ApiError> {
        self.fetch(ALL_STATES_ENDPOINT, query, AuthPolicy::Optional)
    }

    /// State vectors from the caller's own receivers. Fails with
    /// `InvalidCredentials`, without contacting the server, unless both a
    /// username and a password are configured.
    pub fn get_own_states(&self, query: &StatesQuery) -> Result<StatesResponse, ApiError> {
        self.fetch(OWN_STATES_ENDPOINT, query, AuthPolicy::Required)
    }

    fn fetch(
        &self,
        endpoint: &str,
        query: &StatesQuery,
        auth: AuthPolicy,
    ) -> Result<StatesResponse, ApiError> {
        // StatusPolicy::States never yields an empty outcome.
        let (_, response) = self
            .client
            .send(endpoint, &query.params(), auth, StatusPolicy::States)?;
        decode_states_response(&response.body)
    }
}
