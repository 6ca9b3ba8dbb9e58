//! Authorization header construction.
//!
//! FortiWeb authenticates every REST call with the base64 encoding of
//! `username:password`. Firmware seen in the field accepts the bare token
//! without the RFC 7617 `Basic ` prefix, which is what earlier clients sent;
//! [`AuthScheme`] keeps both forms available.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// How the encoded credentials are rendered in the `Authorization` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// Send only the base64 token.
    #[default]
    Bare,
    /// Send `Basic <token>`.
    Basic,
}

/// Encode `username:password` with the standard base64 alphabet.
#[must_use]
pub fn encode_credentials(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{username}:{password}"))
}

/// Username and password for the appliance.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// The login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Render the `Authorization` header value.
    ///
    /// The token is recomputed on every call rather than cached.
    #[must_use]
    pub fn header_value(&self, scheme: AuthScheme) -> String {
        let token = encode_credentials(&self.username, self.password.expose_secret());
        match scheme {
            AuthScheme::Bare => token,
            AuthScheme::Basic => format!("Basic {token}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_username_and_password() {
        assert_eq!(encode_credentials("admin", "pass"), "YWRtaW46cGFzcw==");
    }

    #[test]
    fn encodes_empty_password() {
        // "admin:" is the factory default login
        assert_eq!(encode_credentials("admin", ""), "YWRtaW46");
    }

    #[test]
    fn header_value_follows_scheme() {
        let credentials = Credentials::new("admin", SecretString::from("pass"));
        assert_eq!(credentials.header_value(AuthScheme::Bare), "YWRtaW46cGFzcw==");
        assert_eq!(
            credentials.header_value(AuthScheme::Basic),
            "Basic YWRtaW46cGFzcw=="
        );
    }

    #[test]
    fn default_scheme_is_bare() {
        assert_eq!(AuthScheme::default(), AuthScheme::Bare);
    }

    #[test]
    fn debug_output_hides_password() {
        let credentials = Credentials::new("admin", SecretString::from("hunter2"));
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }
}
