//! Blocking client for the OpenSky Network REST API.
//!
//! # Overview
//! Fetches aircraft state vectors (`/api/states/*`) and historical flights
//! (`/api/flights/*`) as typed records. Each call composes the URL, applies
//! the endpoint's authentication policy, dispatches through a `Transport`,
//! classifies the status code and decodes the body.
//!
//! # Design
//! - `OpenSkyClient` is immutable after construction and `Send + Sync`.
//! - The transport is a trait; `UreqTransport` is the default and tests
//!   substitute their own, so the pipeline is testable without a network.
//! - State vectors arrive as positional JSON arrays and are decoded by index
//!   in `decode`, with `Option` for every nullable slot.
//! - All failures are variants of one `ApiError` enum.
//!
//! ```no_run
//! use opensky_core::{ClientConfig, OpenSkyClient, StatesQuery};
//!
//! let client = OpenSkyClient::new(ClientConfig::from_env())?;
//! let response = client.states().get_all_states(&StatesQuery::new().icao24("3c6444"))?;
//! for state in &response.states {
//!     println!("{} {:?}", state.icao24, state.callsign);
//! }
//! # Ok::<(), opensky_core::ApiError>(())
//! ```

pub mod auth;
pub mod client;
pub mod decode;
pub mod error;
pub mod flights;
pub mod http;
pub mod query;
pub mod states;
pub mod status;
pub mod types;

#[cfg(test)]
mod testing;

pub use auth::{AuthPolicy, Credentials};
pub use client::{ClientConfig, OpenSkyClient, DEFAULT_BASE_URL};
pub use decode::{decode_state_vector, encode_state_vector, STATE_VECTOR_ARITY};
pub use error::ApiError;
pub use flights::FlightsService;
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use states::{StatesQuery, StatesService};
pub use types::{Flight, PositionSource, StateVector, StatesResponse};
