//! Error types for the OpenSky API client.
//!
//! # Design
//! One closed enum covers every failure a call can produce, whether it was
//! detected locally (credentials, time windows, schema) or reported by the
//! server. Payloads are owned strings so the enum stays `Clone + Eq` and tests
//! can compare errors structurally.

use thiserror::Error;

/// Errors returned by `OpenSkyClient` service calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// An endpoint that requires authentication was called without both a
    /// username and a password. Raised before any request is sent.
    #[error("incorrect client credentials received")]
    InvalidCredentials,

    /// The server returned 403 for the supplied credentials.
    #[error("you don't have permission to access this resource (403)")]
    UnauthorizedAccess,

    /// A flights query whose `end` lies before its `begin`.
    #[error("end time is before begin time")]
    EndBeforeBegin,

    /// A flights query spanning more than two hours.
    #[error("time range exceeds the maximum of 2 hours")]
    TimeRangeTooBig,

    /// A state vector did not match the 17-field positional schema.
    #[error("state vector schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The server returned a non-2xx status not covered by another variant.
    /// `status_text` is the canonical reason phrase for `status`; the
    /// server's own phrase is not available through ureq 3.
    #[error("HTTP {status} {status_text}")]
    HttpError { status: u16, status_text: String },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The base URL or an endpoint path could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::InvalidUrl(e.to_string())
    }
}
