//! HTTP status classification.
//!
//! The flights endpoints answer 404 when no flight matches the window, which
//! is an ordinary empty result. The states endpoints have no such case: any
//! non-2xx there is an error.

use crate::error::ApiError;

/// Which endpoint family a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    States,
    Flights,
}

/// Non-error outcome of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// 2xx; the body should be decoded.
    Success,
    /// Nothing matched; the body should be ignored.
    EmptyResult,
}

pub fn classify(status: u16, policy: StatusPolicy) -> Result<StatusOutcome, ApiError> {
    match (status, policy) {
        (200..=299, _) => Ok(StatusOutcome::Success),
        (404, StatusPolicy::Flights) => Ok(StatusOutcome::EmptyResult),
        (403, _) => Err(ApiError::UnauthorizedAccess),
        (status, _) => Err(ApiError::HttpError {
            status,
            status_text: status_text(status).to_string(),
        }),
    }
}

/// Canonical reason phrase for `status`, or `""` for unregistered codes.
///
/// ureq 3 does not expose the reason phrase the server actually sent, so this
/// is the registered phrase for the code, not the server's own text.
pub fn status_text(status: u16) -> &'static str {
    ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}
