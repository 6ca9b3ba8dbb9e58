//! Core FortiWeb domain types.
//!
//! Resource kinds, their location in the REST tree, and the trait shared by
//! the enumerated option values the appliance accepts.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::name::{encode_segment, object_path};

/// Prefix of every REST resource path.
pub const API_PREFIX: &str = "api/v1.0/";

/// Collection of virtual servers
pub const VIRTUAL_SERVER_PATH: &str = "ServerObjects/Server/VirtualServer";
/// Collection of server pools
pub const SERVER_POOL_PATH: &str = "ServerObjects/Server/ServerPool";
/// Collection of HTTP content-routing policies
pub const CONTENT_ROUTING_POLICY_PATH: &str = "ServerObjects/Server/HTTPContentRoutingPolicy";
/// Collection of server policies
pub const SERVER_POLICY_PATH: &str = "Policy/ServerPolicy/ServerPolicy/";
/// System status document
pub const SYSTEM_STATUS_PATH: &str = "System/Status/Status";

/// An appliance option value with a numeric code and a display label.
///
/// Older firmware accepted either form of a selector, and some payloads
/// still need both.
pub trait Selector: Copy {
    /// Numeric code sent to the appliance.
    fn code(&self) -> u32;

    /// Display label shown by the appliance GUI.
    fn label(&self) -> &'static str;
}

/// Kinds of objects this client can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Client-facing IP/interface endpoint
    VirtualServer,
    /// Set of load-balanced backend servers
    ServerPool,
    /// One backend member of a server pool
    ServerPoolRule,
    /// Ordered match rules selecting a server pool
    ContentRoutingPolicy,
    /// One match rule inside a content-routing policy
    ContentRoutingMatchRule,
    /// Binding of a virtual server to a pool or content-routing policy
    ServerPolicy,
    /// Content-routing policy attached to a server policy
    ServerPolicyContentRule,
}

impl ResourceKind {
    /// Returns the kind name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::VirtualServer => "virtual-server",
            Self::ServerPool => "server-pool",
            Self::ServerPoolRule => "server-pool-rule",
            Self::ContentRoutingPolicy => "content-routing-policy",
            Self::ContentRoutingMatchRule => "content-routing-match-rule",
            Self::ServerPolicy => "server-policy",
            Self::ServerPolicyContentRule => "server-policy-content-rule",
        }
    }

    /// Returns all resource kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::VirtualServer,
            Self::ServerPool,
            Self::ServerPoolRule,
            Self::ContentRoutingPolicy,
            Self::ContentRoutingMatchRule,
            Self::ServerPolicy,
            Self::ServerPolicyContentRule,
        ]
    }

    /// Kind of the object this kind is nested under, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<Self> {
        match self {
            Self::ServerPoolRule => Some(Self::ServerPool),
            Self::ContentRoutingMatchRule => Some(Self::ContentRoutingPolicy),
            Self::ServerPolicyContentRule => Some(Self::ServerPolicy),
            _ => None,
        }
    }

    /// Path of the flat collection holding objects of this kind.
    ///
    /// Nested kinds return `None`; their location depends on the parent name.
    #[must_use]
    pub const fn collection_path(&self) -> Option<&'static str> {
        match self {
            Self::VirtualServer => Some(VIRTUAL_SERVER_PATH),
            Self::ServerPool => Some(SERVER_POOL_PATH),
            Self::ContentRoutingPolicy => Some(CONTENT_ROUTING_POLICY_PATH),
            Self::ServerPolicy => Some(SERVER_POLICY_PATH),
            _ => None,
        }
    }

    const fn child_segment(&self) -> Option<&'static str> {
        match self {
            Self::ServerPoolRule => Some("EditServerPoolRule"),
            Self::ContentRoutingMatchRule => Some("HTTPContentRoutingPolicyNewHTTPContentRouting"),
            Self::ServerPolicyContentRule => Some("EditContentRouting"),
            _ => None,
        }
    }

    /// Whether the client exposes a delete operation for this kind.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        matches!(
            self,
            Self::VirtualServer | Self::ServerPool | Self::ContentRoutingPolicy
        )
    }

    /// Path a create request is posted to.
    ///
    /// `parent` names the owning object for nested kinds and is sanitized
    /// and encoded as one path segment.
    pub fn create_path(&self, parent: Option<&str>) -> Result<String> {
        let parent = parent.map(encode_segment).transpose()?;
        self.compose_create_path(parent.as_deref())
    }

    /// Like [`ResourceKind::create_path`], but uses `parent` exactly as given.
    pub fn create_path_verbatim(&self, parent: Option<&str>) -> Result<String> {
        self.compose_create_path(parent)
    }

    fn compose_create_path(&self, parent: Option<&str>) -> Result<String> {
        match (self.collection_path(), self.parent(), self.child_segment()) {
            (Some(path), _, _) => Ok(path.to_string()),
            (None, Some(parent_kind), Some(segment)) => {
                let parent_name = parent.ok_or_else(|| {
                    Error::InvalidEndpoint(format!(
                        "{} requires the name of its parent {}",
                        self.name(),
                        parent_kind.name()
                    ))
                })?;
                let collection = parent_kind.collection_path().unwrap_or_default();
                Ok(format!(
                    "{}/{parent_name}/{segment}",
                    collection.trim_end_matches('/')
                ))
            }
            _ => Err(Error::InvalidEndpoint(format!(
                "No create path for {}",
                self.name()
            ))),
        }
    }

    /// Path a delete request for the named object is sent to.
    pub fn delete_path(&self, name: &str) -> Result<String> {
        match self.collection_path() {
            Some(collection) if self.is_deletable() => {
                object_path(collection, name)
            }
            _ => Err(Error::InvalidEndpoint(format!(
                "{} cannot be deleted directly",
                self.name()
            ))),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s.to_lowercase())
            .ok_or_else(|| Error::Validation(format!("Unknown resource kind: {s}")))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
