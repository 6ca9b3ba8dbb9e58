//! HTTP transport for the FortiWeb REST API.
//!
//! [`HttpTransport`] owns its `reqwest` client, so TLS policy and timeouts
//! are scoped to one connection configuration and never touch global state.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use validator::Validate;

use crate::auth::{AuthScheme, Credentials};
use crate::config::{FortiWebConfig, TlsVerification};
use crate::error::{Error, Result};
use crate::transport::{RawResponse, Transport};

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

const USER_AGENT: &str = concat!("fortiweb-core/", env!("CARGO_PKG_VERSION"));

/// HTTP client tuning.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    config: FortiWebConfig,
    http_config: ClientConfig,
    user_agent: String,
}

impl HttpTransportBuilder {
    /// Create a builder from a connection configuration.
    #[must_use]
    pub fn new(config: FortiWebConfig) -> Self {
        Self {
            config,
            http_config: ClientConfig::new(),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Override the HTTP client configuration.
    ///
    /// The request timeout always comes from [`FortiWebConfig`].
    #[must_use]
    pub fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<HttpTransport> {
        self.config.validate()?;
        let api_url = self.config.api_url()?;

        let http_config = self.http_config.with_timeout(self.config.timeout());

        let mut builder = ClientBuilder::new()
            .user_agent(self.user_agent)
            .timeout(http_config.timeout)
            .connect_timeout(http_config.connect_timeout)
            .pool_idle_timeout(http_config.pool_idle_timeout)
            .pool_max_idle_per_host(http_config.pool_max_idle_per_host);

        match &self.config.tls {
            TlsVerification::Verify => {}
            TlsVerification::CustomCa(path) => {
                debug!("loading FortiWeb CA certificate from {}", path.display());
                let bytes = std::fs::read(path).map_err(|err| {
                    Error::Tls(format!(
                        "Failed to read CA certificate {}: {err}",
                        path.display()
                    ))
                })?;
                let cert = reqwest::Certificate::from_pem(&bytes)
                    .map_err(|err| Error::Tls(format!("Invalid CA certificate: {err}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsVerification::DangerAcceptInvalid => {
                warn!(url = %api_url, "TLS verification disabled for FortiWeb transport");
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        let http = builder
            .build()
            .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(HttpTransport {
            http,
            api_url,
            credentials: self.config.credentials(),
            auth_scheme: self.config.auth_scheme,
        })
    }
}

/// `reqwest`-backed [`Transport`].
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    api_url: Url,
    credentials: Credentials,
    auth_scheme: AuthScheme,
}

impl HttpTransport {
    /// Construct a transport directly from the configuration.
    pub fn from_config(config: &FortiWebConfig) -> Result<Self> {
        HttpTransportBuilder::new(config.clone()).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: FortiWebConfig) -> HttpTransportBuilder {
        HttpTransportBuilder::new(config)
    }

    /// URL resource paths are resolved against.
    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid FortiWeb path `{path}`: {err}")))
    }

    async fn execute(&self, method: Method, path: &str, body: Option<String>) -> Result<RawResponse> {
        let url = self.build_url(path)?;

        let mut request = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, self.credentials.header_value(self.auth_scheme))
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(path = %path, status, "FortiWeb response received");

        Ok(RawResponse::new(status, text))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<RawResponse> {
        self.execute(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: String) -> Result<RawResponse> {
        self.execute(Method::POST, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<RawResponse> {
        self.execute(Method::DELETE, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> FortiWebConfig {
        FortiWebConfig::new(base_url, "admin", "pass").unwrap()
    }

    fn test_transport(server: &MockServer) -> HttpTransport {
        HttpTransport::from_config(&test_config(&server.uri())).unwrap()
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(60))
            .with_connect_timeout(Duration::from_secs(3))
            .with_pool_idle_timeout(Duration::from_secs(120))
            .with_pool_max_idle(20);

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(120));
        assert_eq!(config.pool_max_idle_per_host, 20);
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT));
        assert_eq!(config.pool_max_idle_per_host, DEFAULT_POOL_MAX_IDLE_PER_HOST);
    }

    #[tokio::test]
    async fn get_sends_bare_authorization_under_api_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1.0/System/Status/Status"))
            .and(header("Authorization", "YWRtaW46cGFzcw=="))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"status\":\"up\"}"))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_transport(&server)
            .get("System/Status/Status")
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{\"status\":\"up\"}");
    }

    #[tokio::test]
    async fn basic_scheme_prefixes_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1.0/System/Status/Status"))
            .and(header("Authorization", "Basic YWRtaW46cGFzcw=="))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server.uri()).with_auth_scheme(AuthScheme::Basic);
        let transport = HttpTransport::from_config(&config).unwrap();
        let response = transport.get("System/Status/Status").await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn post_sends_body_verbatim() {
        let server = MockServer::start().await;
        let body = r#"{"name":"vs1","enable":true}"#;

        Mock::given(method("POST"))
            .and(path("/api/v1.0/ServerObjects/Server/VirtualServer"))
            .and(header("Content-Type", "application/json"))
            .and(body_string(body))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_transport(&server)
            .post("ServerObjects/Server/VirtualServer", body.to_string())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn non_success_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1.0/ServerObjects/Server/ServerPool/p1"))
            .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"error":"in use"}"#))
            .mount(&server)
            .await;

        let response = test_transport(&server)
            .delete("ServerObjects/Server/ServerPool/p1")
            .await
            .unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(response.status_text, "Internal Server Error");
        assert_eq!(response.body, r#"{"error":"in use"}"#);
    }

    #[tokio::test]
    async fn leading_slash_stays_under_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1.0/System/Status/Status"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        test_transport(&server)
            .get("/System/Status/Status")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let transport = HttpTransport::from_config(&test_config("http://127.0.0.1:9")).unwrap();
        let err = transport.get("System/Status/Status").await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn danger_accept_invalid_builds() {
        let config = test_config("https://fortiweb.local").danger_accept_invalid_certs();
        assert!(HttpTransport::from_config(&config).is_ok());
    }

    #[test]
    fn missing_ca_certificate_is_tls_error() {
        let config = test_config("https://fortiweb.local").with_tls(TlsVerification::CustomCa(
            "/nonexistent/fortiweb-ca.pem".into(),
        ));
        let err = HttpTransport::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::Tls(_)));
    }

    #[test]
    fn invalid_timeout_fails_validation() {
        let config = test_config("https://fortiweb.local").with_timeout(0);
        let err = HttpTransport::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
