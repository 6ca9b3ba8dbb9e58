//! Server policy models.

use fortiweb_core::body::JsonFields;
use fortiweb_core::request::ResourceRequest;
use fortiweb_core::types::{ResourceKind, Selector};
use fortiweb_core::Result;

/// Default HTTP service object of a fresh appliance.
pub const DEFAULT_HTTP_SERVICE: &str = "HTTP";

/// How a server policy forwards traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentMode {
    /// Forward to one server pool
    SingleServerOrServerBalance,
    /// Choose a pool per request through content-routing policies
    HttpContentRouting,
    /// Monitor a pool out of band
    OfflineProtection,
    /// Bridge to a pool transparently
    TransparentServers,
    /// Receive traffic redirected over WCCP
    WccpServers,
}

impl Selector for DeploymentMode {
    fn code(&self) -> u32 {
        match self {
            Self::SingleServerOrServerBalance => 1,
            Self::HttpContentRouting => 2,
            Self::OfflineProtection => 3,
            Self::TransparentServers => 4,
            Self::WccpServers => 5,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::SingleServerOrServerBalance => "Single Server/Server Balance",
            Self::HttpContentRouting => "HTTP Content Routing",
            Self::OfflineProtection => "Offline Protection",
            Self::TransparentServers => "Transparent Servers",
            Self::WccpServers => "WCCP Servers",
        }
    }
}

/// Where a server policy sends traffic.
///
/// The deployment mode is derived from the backend, so a pool can only be
/// given for modes that use one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyBackend {
    /// A single server pool
    ServerPool(String),
    /// Content-routing policies attached after the policy is created
    ContentRouting,
    /// A pool monitored in offline protection mode
    OfflineProtection(String),
    /// A pool reached in transparent mode
    TransparentServers(String),
    /// A pool reached through WCCP
    WccpServers(String),
}

impl PolicyBackend {
    /// Deployment mode implied by this backend.
    #[must_use]
    pub const fn deployment_mode(&self) -> DeploymentMode {
        match self {
            Self::ServerPool(_) => DeploymentMode::SingleServerOrServerBalance,
            Self::ContentRouting => DeploymentMode::HttpContentRouting,
            Self::OfflineProtection(_) => DeploymentMode::OfflineProtection,
            Self::TransparentServers(_) => DeploymentMode::TransparentServers,
            Self::WccpServers(_) => DeploymentMode::WccpServers,
        }
    }

    /// Name of the pool, if the mode uses one.
    #[must_use]
    pub fn server_pool(&self) -> Option<&str> {
        match self {
            Self::ServerPool(pool)
            | Self::OfflineProtection(pool)
            | Self::TransparentServers(pool)
            | Self::WccpServers(pool) => Some(pool),
            Self::ContentRouting => None,
        }
    }
}

/// Request payload for creating a server policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateServerPolicyRequest {
    /// Object name.
    pub name: String,
    /// Virtual server the policy listens on.
    pub virtual_server: String,
    /// Traffic destination.
    pub backend: PolicyBackend,
    /// Protected host names object.
    pub protected_hostnames: Option<String>,
    /// Web protection profile.
    pub web_protection_profile: Option<String>,
    /// Service object for plain HTTP.
    pub http_service: String,
    /// Service object for HTTPS.
    pub https_service: Option<String>,
    /// Server certificate used for HTTPS.
    pub certificate: Option<String>,
    /// Log violations without blocking.
    pub monitor_mode: bool,
    /// Treat URLs as case sensitive.
    pub url_case_sensitivity: bool,
    /// Free-form comment.
    pub comments: Option<String>,
}

impl CreateServerPolicyRequest {
    /// Policy on `virtual_server` forwarding to `backend` over plain HTTP.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        virtual_server: impl Into<String>,
        backend: PolicyBackend,
    ) -> Self {
        Self {
            name: name.into(),
            virtual_server: virtual_server.into(),
            backend,
            protected_hostnames: None,
            web_protection_profile: None,
            http_service: DEFAULT_HTTP_SERVICE.to_string(),
            https_service: None,
            certificate: None,
            monitor_mode: false,
            url_case_sensitivity: false,
            comments: None,
        }
    }

    /// Set the protected host names object.
    #[must_use]
    pub fn with_protected_hostnames(mut self, hostnames: impl Into<String>) -> Self {
        self.protected_hostnames = Some(hostnames.into());
        self
    }

    /// Set the web protection profile.
    #[must_use]
    pub fn with_web_protection_profile(mut self, profile: impl Into<String>) -> Self {
        self.web_protection_profile = Some(profile.into());
        self
    }

    /// Serve HTTPS with the given service object and certificate.
    #[must_use]
    pub fn with_https(mut self, service: impl Into<String>, certificate: impl Into<String>) -> Self {
        self.https_service = Some(service.into());
        self.certificate = Some(certificate.into());
        self
    }
}

impl ResourceRequest for CreateServerPolicyRequest {
    const KIND: ResourceKind = ResourceKind::ServerPolicy;

    fn fields(&self) -> Result<JsonFields> {
        let mut fields = JsonFields::new();
        fields.push_name("name", &self.name);
        fields.push_mirrored("depInMode", "disdepInMode", self.backend.deployment_mode());
        fields.push_name("virtualServer", &self.virtual_server);
        if let Some(pool) = self.backend.server_pool() {
            fields.push_name("serverPool", pool);
        }
        fields.push_non_empty("protectedHostnames", self.protected_hostnames.as_deref());
        fields.push_non_empty(
            "InlineProtectionProfile",
            self.web_protection_profile.as_deref(),
        );
        fields.push("httpService", self.http_service.as_str());
        fields.push_non_empty("httpsService", self.https_service.as_deref());
        fields.push_non_empty("certificate", self.certificate.as_deref());
        fields.push("MonitorMode", self.monitor_mode);
        fields.push("URLCaseSensitivity", self.url_case_sensitivity);
        fields.push_non_empty("comments", self.comments.as_deref());
        Ok(fields)
    }
}

/// Request payload for attaching a content-routing policy to a server policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateServerPolicyContentRuleRequest {
    /// Name of the owning server policy.
    pub policy_name: String,
    /// Content-routing policy to attach.
    pub content_routing_policy: String,
    /// Use the server policy's protection profile.
    pub inherit_web_protection_profile: bool,
    /// Profile used when not inheriting.
    pub web_protection_profile: Option<String>,
    /// Use this rule when no other rule matches.
    pub is_default: bool,
}

impl CreateServerPolicyContentRuleRequest {
    /// Attach `content_routing_policy`, inheriting the policy's profile.
    #[must_use]
    pub fn new(policy_name: impl Into<String>, content_routing_policy: impl Into<String>) -> Self {
        Self {
            policy_name: policy_name.into(),
            content_routing_policy: content_routing_policy.into(),
            inherit_web_protection_profile: true,
            web_protection_profile: None,
            is_default: false,
        }
    }
}

impl ResourceRequest for CreateServerPolicyContentRuleRequest {
    const KIND: ResourceKind = ResourceKind::ServerPolicyContentRule;

    fn parent(&self) -> Option<&str> {
        Some(&self.policy_name)
    }

    fn fields(&self) -> Result<JsonFields> {
        let mut fields = JsonFields::new();
        fields.push_name("contentRoutingPolicy", &self.content_routing_policy);
        fields.push(
            "inheritWebProtectionProfile",
            self.inherit_web_protection_profile,
        );
        fields.push_non_empty("webProtectionProfile", self.web_protection_profile.as_deref());
        fields.push("isDefault", self.is_default);
        Ok(fields)
    }
}
