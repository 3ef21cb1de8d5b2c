//! URL composition for API endpoints.
//!
//! Optional parameters whose value is unset or empty are left out of the
//! query string entirely rather than sent with a blank value. Required
//! parameters are always sent.

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::ApiError;

/// Value of one query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryValue<'a> {
    /// Rendered as integer seconds since the Unix epoch. Absent when `None`
    /// or not after the epoch.
    Timestamp(Option<DateTime<Utc>>),
    /// Rendered verbatim. Absent when `None` or empty.
    Text(Option<&'a str>),
    /// Rendered as integer seconds since the Unix epoch, including zero and
    /// negative values. Never absent.
    Required(DateTime<Utc>),
}

impl QueryValue<'_> {
    /// The rendered value, or `None` when the parameter should be omitted.
    pub fn render(&self) -> Option<String> {
        match *self {
            QueryValue::Timestamp(Some(t)) if t.timestamp() > 0 => Some(t.timestamp().to_string()),
            QueryValue::Text(Some(s)) if !s.is_empty() => Some(s.to_string()),
            QueryValue::Required(t) => Some(t.timestamp().to_string()),
            _ => None,
        }
    }
}

/// Resolve `endpoint` against `base` and append every present parameter.
pub fn compose_url(
    base: &Url,
    endpoint: &str,
    params: &[(&str, QueryValue<'_>)],
) -> Result<Url, ApiError> {
    let mut url = base.join(endpoint)?;

    let present: Vec<(&str, String)> = params
        .iter()
        .filter_map(|(name, value)| value.render().map(|v| (*name, v)))
        .collect();

    // query_pairs_mut() leaves a bare '?' behind even when nothing is added.
    if !present.is_empty() {
        url.query_pairs_mut().extend_pairs(present);
    }
    Ok(url)
}
