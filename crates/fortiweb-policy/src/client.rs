//! Asynchronous client for FortiWeb server policies.

use crate::models::{CreateServerPolicyContentRuleRequest, CreateServerPolicyRequest};
use crate::Result;
use fortiweb_core::request::{submit, RawRequest};
use fortiweb_core::{FortiWebConfig, HttpTransport, RawResponse, Transport};
use std::sync::Arc;
use tracing::info;

const USER_AGENT: &str = concat!("fortiweb-policy/", env!("CARGO_PKG_VERSION"));

/// Client for `Policy/ServerPolicy/*` resources.
#[derive(Clone)]
pub struct ServerPolicyClient {
    transport: Arc<dyn Transport>,
}

impl ServerPolicyClient {
    /// Wrap an existing transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Build an HTTP transport from the configuration and wrap it.
    pub fn from_config(config: &FortiWebConfig) -> Result<Self> {
        let transport = HttpTransport::builder(config.clone())
            .with_user_agent(USER_AGENT)
            .build()?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// The underlying transport, for raw GET/POST/DELETE calls.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Create a server policy. The virtual server and pool must already exist.
    pub async fn create_server_policy(&self, request: &CreateServerPolicyRequest) -> Result<()> {
        info!(
            name = %request.name,
            mode = ?request.backend.deployment_mode(),
            "Creating server policy"
        );
        submit(self.transport.as_ref(), request).await.map(|_| ())
    }

    /// Attach a content-routing policy to an existing server policy.
    pub async fn create_server_policy_content_rule(
        &self,
        request: &CreateServerPolicyContentRuleRequest,
    ) -> Result<()> {
        info!(
            policy = %request.policy_name,
            content_routing_policy = %request.content_routing_policy,
            "Attaching content-routing policy"
        );
        submit(self.transport.as_ref(), request).await.map(|_| ())
    }

    /// Post a pre-built body for any resource kind.
    pub async fn create_raw(&self, request: &RawRequest) -> Result<RawResponse> {
        submit(self.transport.as_ref(), request).await
    }
}
