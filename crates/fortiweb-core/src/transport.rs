//! Transport abstraction and response handling.
//!
//! A [`Transport`] performs one HTTP exchange against a path below the API
//! prefix. It reports transport failures as errors and returns every
//! completed exchange as a [`RawResponse`], whatever its status; deciding
//! whether the appliance accepted the request is left to
//! [`RawResponse::into_result`].

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::warn;

use crate::error::{Error, Result};

/// Status the appliance returns when it accepts a request.
pub const ACCEPTED_STATUS: u16 = 200;

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status
    pub status_text: String,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Create a response, deriving the reason phrase from the status code.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let status_text = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            status,
            status_text,
            body: body.into(),
        }
    }

    /// Returns true if the appliance accepted the request.
    ///
    /// FortiWeb answers 200 for every successful operation, so other 2xx
    /// codes are not treated as success.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.status == ACCEPTED_STATUS
    }

    /// Turn a non-200 response into [`Error::Rejected`].
    pub fn into_result(self) -> Result<Self> {
        if self.is_accepted() {
            return Ok(self);
        }

        warn!(
            status = self.status,
            status_text = %self.status_text,
            "FortiWeb rejected request"
        );

        Err(Error::Rejected {
            status: self.status,
            status_text: self.status_text,
            body: self.body,
        })
    }
}

/// Primitive HTTP verbs against the appliance.
///
/// Paths are relative to the API prefix, e.g. `ServerObjects/Server/ServerPool`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET without a body.
    async fn get(&self, path: &str) -> Result<RawResponse>;

    /// Issue a POST with a JSON body sent as-is.
    async fn post(&self, path: &str, body: String) -> Result<RawResponse>;

    /// Issue a DELETE without a body.
    async fn delete(&self, path: &str) -> Result<RawResponse>;
}
