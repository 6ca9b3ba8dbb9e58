//! Server object models: option selectors and create requests.
//!
//! Requests assemble the JSON body the appliance expects. Names that become
//! path segments or are referenced by other objects are sanitized, and
//! optional fields are only sent when they hold a value.

use fortiweb_core::body::JsonFields;
use fortiweb_core::request::ResourceRequest;
use fortiweb_core::types::{ResourceKind, Selector};
use fortiweb_core::Result;

/// Whether a pool holds a single server or balances across several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PoolMode {
    /// One backend server
    #[default]
    SingleServer,
    /// Load-balanced cluster of servers
    ServerBalance,
}

impl Selector for PoolMode {
    fn code(&self) -> u32 {
        match self {
            Self::SingleServer => 1,
            Self::ServerBalance => 2,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::SingleServer => "Single Server",
            Self::ServerBalance => "Server Balance",
        }
    }
}

/// Operation mode of a server pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ServerPoolType {
    /// Reverse proxy
    #[default]
    ReverseProxy,
    /// Out-of-band monitoring
    OfflineProtection,
    /// Bridge mode without address translation
    TrueTransparentProxy,
    /// Asynchronous inline inspection
    TransparentInspection,
    /// WCCP redirection
    Wccp,
}

impl Selector for ServerPoolType {
    fn code(&self) -> u32 {
        match self {
            Self::ReverseProxy => 1,
            Self::OfflineProtection => 2,
            Self::TrueTransparentProxy => 3,
            Self::TransparentInspection => 4,
            Self::Wccp => 5,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::ReverseProxy => "Reverse Proxy",
            Self::OfflineProtection => "Offline Protection",
            Self::TrueTransparentProxy => "True Transparent Proxy",
            // The appliance spells this one without a space.
            Self::TransparentInspection => "TransparentInspection",
            Self::Wccp => "WCCP",
        }
    }
}

/// Load-balancing algorithm of a server-balance pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LoadBalancingAlgorithm {
    /// Round robin
    #[default]
    RoundRobin,
    /// Round robin weighted by server weight
    WeightedRoundRobin,
    /// Fewest open connections
    LeastConnection,
    /// Hash of the URI path
    UriHash,
    /// Hash of the full URI including the query
    FullUriHash,
    /// Hash of the Host header
    HostHash,
    /// Hash of the Host header's domain
    HostDomainHash,
    /// Hash of the client address
    SourceIpHash,
}

impl Selector for LoadBalancingAlgorithm {
    fn code(&self) -> u32 {
        match self {
            Self::RoundRobin => 1,
            Self::WeightedRoundRobin => 2,
            Self::LeastConnection => 3,
            Self::UriHash => 4,
            Self::FullUriHash => 5,
            Self::HostHash => 6,
            Self::HostDomainHash => 7,
            Self::SourceIpHash => 8,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::RoundRobin => "Round Robin",
            Self::WeightedRoundRobin => "Weighted Round Robin",
            Self::LeastConnection => "Least Connection",
            Self::UriHash => "URI Hash",
            Self::FullUriHash => "Full URI Hash",
            Self::HostHash => "Host Hash",
            Self::HostDomainHash => "Host Domain Hash",
            Self::SourceIpHash => "Source IP Hash",
        }
    }
}

/// Administrative state of a pool member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ServerStatus {
    /// Receives traffic
    #[default]
    Enable,
    /// Receives no traffic
    Disable,
    /// Finishes existing sessions, accepts no new ones
    Maintenance,
}

impl Selector for ServerStatus {
    fn code(&self) -> u32 {
        match self {
            Self::Enable => 1,
            Self::Disable => 2,
            Self::Maintenance => 3,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Enable => "Enable",
            Self::Disable => "Disable",
            Self::Maintenance => "Maintenance",
        }
    }
}

/// Request attribute a content-routing rule matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchObject {
    /// Host header
    HttpHost,
    /// Request URL
    HttpUrl,
    /// Query parameter
    UrlParameter,
    /// Referer header
    HttpReferer,
    /// Cookie
    HttpCookie,
    /// Arbitrary header
    HttpHeader,
    /// Client address
    SourceIp,
    /// Client certificate subject
    X509CertificateSubject,
    /// Client certificate extension
    X509CertificateExtension,
    /// TLS server name indication
    HttpsSni,
}

impl MatchObject {
    /// Field holding the match condition for this object.
    #[must_use]
    pub const fn condition_key(&self) -> &'static str {
        match self {
            Self::HttpHost => "hostCondition",
            Self::HttpUrl => "urlCondition",
            Self::UrlParameter => "paramCondition",
            Self::HttpReferer => "refererCondition",
            Self::HttpCookie => "cookieCondition",
            Self::HttpHeader => "headerCondition",
            Self::SourceIp => "sourceIPCondition",
            Self::X509CertificateSubject => "x509SubjectCondition",
            Self::X509CertificateExtension => "x509ExtensionCondition",
            Self::HttpsSni => "sniCondition",
        }
    }

    /// Whether the object is a named item (parameter, cookie, header).
    #[must_use]
    pub const fn is_named(&self) -> bool {
        matches!(self, Self::UrlParameter | Self::HttpCookie | Self::HttpHeader)
    }
}

impl Selector for MatchObject {
    fn code(&self) -> u32 {
        match self {
            Self::HttpHost => 1,
            Self::HttpUrl => 2,
            Self::UrlParameter => 3,
            Self::HttpReferer => 4,
            Self::HttpCookie => 5,
            Self::HttpHeader => 6,
            Self::SourceIp => 7,
            Self::X509CertificateSubject => 8,
            Self::X509CertificateExtension => 9,
            Self::HttpsSni => 10,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::HttpHost => "HTTP Host",
            Self::HttpUrl => "HTTP Request URL",
            Self::UrlParameter => "URL Parameter",
            Self::HttpReferer => "HTTP Referer",
            Self::HttpCookie => "HTTP Cookie",
            Self::HttpHeader => "HTTP Header",
            Self::SourceIp => "Source IP",
            Self::X509CertificateSubject => "X509 Certificate Subject",
            Self::X509CertificateExtension => "X509 Certificate Extension",
            Self::HttpsSni => "HTTPS SNI",
        }
    }
}

/// How the match expression is compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchCondition {
    /// Regular expression match
    #[default]
    MatchesRegex,
    /// Exact match
    EqualTo,
    /// Regular expression does not match
    DoesNotMatchRegex,
    /// Not an exact match
    NotEqualTo,
}

impl Selector for MatchCondition {
    fn code(&self) -> u32 {
        match self {
            Self::MatchesRegex => 1,
            Self::EqualTo => 2,
            Self::DoesNotMatchRegex => 3,
            Self::NotEqualTo => 4,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::MatchesRegex => "Matches Regular Expression",
            Self::EqualTo => "Is Equal To",
            Self::DoesNotMatchRegex => "Does Not Match Regular Expression",
            Self::NotEqualTo => "Is Not Equal To",
        }
    }
}

/// Logical operator joining a rule to the rules created before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConcatenateOperator {
    /// Both conditions must hold
    #[default]
    And,
    /// Either condition may hold
    Or,
}

impl Selector for ConcatenateOperator {
    fn code(&self) -> u32 {
        match self {
            Self::And => 2,
            Self::Or => 3,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Request payload for creating a virtual server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateVirtualServerRequest {
    /// Object name.
    pub name: String,
    /// IPv4 address with prefix length, e.g. `10.0.0.10/24`.
    pub ipv4_address: Option<String>,
    /// IPv6 address with prefix length.
    pub ipv6_address: Option<String>,
    /// Network interface the server listens on.
    pub interface: String,
    /// Listen on the interface's own address instead of a dedicated one.
    pub use_interface_ip: bool,
    /// Enabled flag.
    pub enable: bool,
}

impl CreateVirtualServerRequest {
    /// Virtual server with its own IPv4 address on `interface`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        ipv4_address: impl Into<String>,
        interface: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ipv4_address: Some(ipv4_address.into()),
            interface: interface.into(),
            enable: true,
            ..Self::default()
        }
    }
}

impl ResourceRequest for CreateVirtualServerRequest {
    const KIND: ResourceKind = ResourceKind::VirtualServer;

    fn fields(&self) -> Result<JsonFields> {
        let mut fields = JsonFields::new();
        fields.push_name("name", &self.name);
        fields.push_non_empty("ipv4Address", self.ipv4_address.as_deref());
        fields.push_non_empty("ipv6Address", self.ipv6_address.as_deref());
        fields.push("interface", self.interface.as_str());
        fields.push("useInterfaceIP", self.use_interface_ip);
        fields.push("enable", self.enable);
        fields.push("can_delete", true);
        Ok(fields)
    }
}

/// Request payload for creating a server pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateServerPoolRequest {
    /// Object name.
    pub name: String,
    /// Single server or server balance.
    pub mode: PoolMode,
    /// Operation mode.
    pub pool_type: ServerPoolType,
    /// Algorithm used by server-balance pools; ignored for single-server pools.
    pub algorithm: LoadBalancingAlgorithm,
    /// Health check name.
    pub health_check: Option<String>,
    /// Free-form comment.
    pub comments: Option<String>,
}

impl CreateServerPoolRequest {
    /// Pool with the given name, mode and type.
    #[must_use]
    pub fn new(name: impl Into<String>, mode: PoolMode, pool_type: ServerPoolType) -> Self {
        Self {
            name: name.into(),
            mode,
            pool_type,
            ..Self::default()
        }
    }
}

impl ResourceRequest for CreateServerPoolRequest {
    const KIND: ResourceKind = ResourceKind::ServerPool;

    fn fields(&self) -> Result<JsonFields> {
        let mut fields = JsonFields::new();
        fields.push_name("name", &self.name);
        fields.push_mirrored(
            "singleServerOrServerBalance",
            "dissingleServerOrServerBalance",
            self.mode,
        );
        fields.push_mirrored("type", "distype", self.pool_type);
        if self.mode == PoolMode::ServerBalance {
            fields.push_mirrored("serverBalanceAlgo", "disserverBalanceAlgo", self.algorithm);
        }
        fields.push_non_empty("healthCheck", self.health_check.as_deref());
        fields.push_non_empty("comments", self.comments.as_deref());
        fields.push("can_delete", true);
        Ok(fields)
    }
}

/// Request payload for adding a member to a server pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateServerPoolRuleRequest {
    /// Name of the owning pool.
    pub pool_name: String,
    /// Backend address.
    pub ip: String,
    /// Backend port.
    pub port: u16,
    /// Administrative state.
    pub status: ServerStatus,
    /// Weight for weighted algorithms.
    pub weight: u32,
    /// Maximum concurrent connections, 0 for unlimited.
    pub connection_limit: u32,
    /// Use TLS towards the backend.
    pub ssl: bool,
    /// Free-form comment.
    pub comments: Option<String>,
}

impl CreateServerPoolRuleRequest {
    /// Enabled member at `ip:port` with weight 1 and no connection limit.
    #[must_use]
    pub fn new(pool_name: impl Into<String>, ip: impl Into<String>, port: u16) -> Self {
        Self {
            pool_name: pool_name.into(),
            ip: ip.into(),
            port,
            status: ServerStatus::Enable,
            weight: 1,
            connection_limit: 0,
            ssl: false,
            comments: None,
        }
    }
}

impl ResourceRequest for CreateServerPoolRuleRequest {
    const KIND: ResourceKind = ResourceKind::ServerPoolRule;

    fn parent(&self) -> Option<&str> {
        Some(&self.pool_name)
    }

    fn fields(&self) -> Result<JsonFields> {
        let mut fields = JsonFields::new();
        fields.push("ip", self.ip.as_str());
        fields.push("port", self.port);
        fields.push_code("status", self.status);
        fields.push("weight", self.weight);
        fields.push("connectLimit", self.connection_limit);
        fields.push("ssl", self.ssl);
        fields.push_non_empty("comments", self.comments.as_deref());
        Ok(fields)
    }
}

/// Request payload for creating an HTTP content-routing policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateContentRoutingPolicyRequest {
    /// Object name.
    pub name: String,
    /// Pool that receives matching requests.
    pub server_pool: String,
    /// Match sequence identifier.
    pub match_sequence: Option<String>,
}

impl CreateContentRoutingPolicyRequest {
    /// Policy routing to `server_pool`.
    #[must_use]
    pub fn new(name: impl Into<String>, server_pool: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server_pool: server_pool.into(),
            match_sequence: None,
        }
    }

    /// Set the match sequence identifier.
    #[must_use]
    pub fn with_match_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.match_sequence = Some(sequence.into());
        self
    }
}

impl ResourceRequest for CreateContentRoutingPolicyRequest {
    const KIND: ResourceKind = ResourceKind::ContentRoutingPolicy;

    fn fields(&self) -> Result<JsonFields> {
        let mut fields = JsonFields::new();
        fields.push_name("name", &self.name);
        fields.push_name("serverPool", &self.server_pool);
        fields.push_non_empty("matchSeq", self.match_sequence.as_deref());
        fields.push("can_delete", true);
        Ok(fields)
    }
}

/// Request payload for appending a match rule to a content-routing policy.
///
/// Rules are evaluated in the order they are created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMatchRuleRequest {
    /// Name of the owning policy.
    pub policy_name: String,
    /// Attribute matched.
    pub match_object: MatchObject,
    /// Value or pattern compared against the attribute.
    pub match_expression: String,
    /// Comparison.
    pub condition: MatchCondition,
    /// Parameter, cookie or header name. Only sent for named objects.
    pub name_expression: Option<String>,
    /// Operator joining this rule to the previous ones.
    pub concatenate: ConcatenateOperator,
}

impl CreateMatchRuleRequest {
    /// Regex match on `match_object`, joined with AND.
    #[must_use]
    pub fn new(
        policy_name: impl Into<String>,
        match_object: MatchObject,
        match_expression: impl Into<String>,
    ) -> Self {
        Self {
            policy_name: policy_name.into(),
            match_object,
            match_expression: match_expression.into(),
            condition: MatchCondition::default(),
            name_expression: None,
            concatenate: ConcatenateOperator::default(),
        }
    }

    /// Set the comparison.
    #[must_use]
    pub fn with_condition(mut self, condition: MatchCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Set the parameter, cookie or header name.
    #[must_use]
    pub fn with_name_expression(mut self, name: impl Into<String>) -> Self {
        self.name_expression = Some(name.into());
        self
    }

    /// Set the concatenation operator.
    #[must_use]
    pub fn with_concatenate(mut self, concatenate: ConcatenateOperator) -> Self {
        self.concatenate = concatenate;
        self
    }
}

impl ResourceRequest for CreateMatchRuleRequest {
    const KIND: ResourceKind = ResourceKind::ContentRoutingMatchRule;

    fn parent(&self) -> Option<&str> {
        Some(&self.policy_name)
    }

    fn fields(&self) -> Result<JsonFields> {
        let mut fields = JsonFields::new();
        fields.push_code("matchObject", self.match_object);
        fields.push("matchExpression", self.match_expression.as_str());
        fields.push_code(self.match_object.condition_key(), self.condition);
        if self.match_object.is_named() {
            fields.push_non_empty("nameExpression", self.name_expression.as_deref());
        }
        fields.push_code("concatenate", self.concatenate);
        Ok(fields)
    }
}
