//! Connection configuration for FortiWeb clients.
//!
//! The caller supplies every value; nothing is read from files or the
//! environment here.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;
use validator::Validate;

use crate::auth::{AuthScheme, Credentials};
use crate::types::API_PREFIX;
use crate::Error;

/// How the server certificate of the appliance is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Verify against the built-in root store.
    #[default]
    Verify,
    /// Verify against an additional CA certificate (PEM file).
    CustomCa(PathBuf),
    /// Accept any certificate, including self-signed ones.
    ///
    /// Appliances ship with a self-signed certificate; choosing this is an
    /// explicit trust decision by the caller.
    DangerAcceptInvalid,
}

/// Configuration for a connection to one FortiWeb appliance.
#[derive(Debug, Clone, Validate)]
pub struct FortiWebConfig {
    /// Management base URL (e.g., "https://fortiweb.example.com:90/")
    #[validate(url)]
    pub base_url: String,

    /// Administrator login
    #[validate(length(min = 1))]
    pub username: String,

    /// Administrator password
    pub password: SecretString,

    /// Certificate verification policy
    pub tls: TlsVerification,

    /// Rendering of the `Authorization` header
    pub auth_scheme: AuthScheme,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl FortiWebConfig {
    /// Create a new configuration with required parameters.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Management URL of the appliance
    /// * `username` - Administrator login
    /// * `password` - Administrator password (may be empty)
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
            tls: TlsVerification::default(),
            auth_scheme: AuthScheme::default(),
            request_timeout_secs: default_request_timeout_secs(),
        };

        config
            .validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the certificate verification policy.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsVerification) -> Self {
        self.tls = tls;
        self
    }

    /// Skip certificate verification entirely.
    #[must_use]
    pub fn danger_accept_invalid_certs(self) -> Self {
        self.with_tls(TlsVerification::DangerAcceptInvalid)
    }

    /// Set the `Authorization` header rendering.
    #[must_use]
    pub const fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Credentials used to sign each request.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// Parse the base URL, guaranteeing a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid FortiWeb URL: {e}")))?;

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    /// URL every resource path is resolved against (`<base>/api/v1.0/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn api_url(&self) -> Result<Url, Error> {
        Ok(self.parse_base_url()?.join(API_PREFIX)?)
    }
}
