//! Error types for FortiWeb operations.
//!
//! Failures fall into three groups: transport failures (the exchange never
//! completed), appliance rejections (the exchange completed with a status
//! other than 200) and local failures raised before anything is sent
//! (configuration, URL composition, payload encoding).

use thiserror::Error;

/// Main error type for FortiWeb operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The appliance could not be reached (connection refused, DNS failure)
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The request did not complete before the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// TLS setup or handshake failed
    #[error("TLS error: {0}")]
    Tls(String),

    /// Any other transport-level failure
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// The appliance answered with a status other than 200
    #[error("Request rejected with HTTP {status} {status_text}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        status_text: String,
        /// Raw response body
        body: String,
    },

    /// The request payload could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A request URL could not be composed
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for FortiWeb operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "CONNECTION_FAILED",
            Self::Timeout(_) => "TIMEOUT",
            Self::Tls(_) => "TLS_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Rejected { .. } => "REJECTED",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// HTTP status of a rejected request. Transport and local failures have none.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a rejected request.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true if the exchange with the appliance never completed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Timeout(_) | Self::Tls(_) | Self::Transport(_)
        )
    }

    /// Returns true if the appliance answered and refused the request.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_builder() {
            Self::Config(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}
