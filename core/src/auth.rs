//! Per-endpoint authentication policy.
//!
//! Public aggregate data may be read anonymously, so most endpoints only
//! attach credentials when a complete pair is configured. Endpoints that
//! expose the caller's own data refuse to send a request without them.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::ApiError;
use crate::http::HttpRequest;

/// Username and password for HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both parts are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Value for the `authorization` header.
    pub fn basic_auth_header(&self) -> String {
        let token = BASE64.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Whether an endpoint needs credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Authenticate when a complete credential pair is available.
    Optional,
    /// Fail with `InvalidCredentials` unless a complete pair is available.
    Required,
}

/// Apply `policy` to `request`. Returns whether credentials were attached.
pub fn authorize(
    policy: AuthPolicy,
    credentials: Option<&Credentials>,
    request: &mut HttpRequest,
) -> Result<bool, ApiError> {
    match credentials.filter(|c| c.is_complete()) {
        Some(creds) => {
            request
                .headers
                .push(("authorization".to_string(), creds.basic_auth_header()));
            Ok(true)
        }
        None if policy == AuthPolicy::Required => Err(ApiError::InvalidCredentials),
        None => Ok(false),
    }
}
