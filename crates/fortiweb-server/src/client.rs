//! Asynchronous client for FortiWeb server objects.

use crate::models::{
    CreateContentRoutingPolicyRequest, CreateMatchRuleRequest, CreateServerPoolRequest,
    CreateServerPoolRuleRequest, CreateVirtualServerRequest,
};
use crate::Result;
use fortiweb_core::request::{submit, ApplianceRequest, DeleteRequest, RawJson, RawRequest};
use fortiweb_core::types::ResourceKind;
use fortiweb_core::{FortiWebConfig, HttpTransport, RawResponse, Transport};
use std::sync::Arc;
use tracing::info;

const USER_AGENT: &str = concat!("fortiweb-server/", env!("CARGO_PKG_VERSION"));

/// Client for `ServerObjects/Server/*` resources.
#[derive(Clone)]
pub struct ServerObjectsClient {
    transport: Arc<dyn Transport>,
}

impl ServerObjectsClient {
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

    /// Create a virtual server.
    pub async fn create_virtual_server(&self, request: &CreateVirtualServerRequest) -> Result<()> {
        info!(name = %request.name, "Creating virtual server");
        self.send(request).await
    }

    /// Delete a virtual server by name.
    pub async fn delete_virtual_server(&self, name: &str) -> Result<()> {
        self.send(&DeleteRequest::new(ResourceKind::VirtualServer, name))
            .await
    }

    /// Create a server pool.
    pub async fn create_server_pool(&self, request: &CreateServerPoolRequest) -> Result<()> {
        info!(name = %request.name, mode = ?request.mode, "Creating server pool");
        self.send(request).await
    }

    /// Delete a server pool by name. The appliance removes its members.
    pub async fn delete_server_pool(&self, name: &str) -> Result<()> {
        self.send(&DeleteRequest::new(ResourceKind::ServerPool, name))
            .await
    }

    /// Add a member to an existing server pool.
    pub async fn create_server_pool_rule(
        &self,
        request: &CreateServerPoolRuleRequest,
    ) -> Result<()> {
        info!(pool = %request.pool_name, ip = %request.ip, port = request.port, "Adding server pool member");
        self.send(request).await
    }

    /// Create an HTTP content-routing policy.
    pub async fn create_content_routing_policy(
        &self,
        request: &CreateContentRoutingPolicyRequest,
    ) -> Result<()> {
        info!(name = %request.name, "Creating content-routing policy");
        self.send(request).await
    }

    /// Delete a content-routing policy by name. The appliance removes its rules.
    pub async fn delete_content_routing_policy(&self, name: &str) -> Result<()> {
        self.send(&DeleteRequest::new(ResourceKind::ContentRoutingPolicy, name))
            .await
    }

    /// Append a match rule to an existing content-routing policy.
    pub async fn create_match_rule(&self, request: &CreateMatchRuleRequest) -> Result<()> {
        info!(policy = %request.policy_name, object = ?request.match_object, "Adding content-routing match rule");
        self.send(request).await
    }

    /// Post a pre-built match rule body to `policy_name`.
    ///
    /// Neither the body nor the policy name is checked or sanitized; this is
    /// the way to send fields the typed request does not model, such as an
    /// explicit sequence number.
    pub async fn create_match_rule_raw(
        &self,
        policy_name: &str,
        body: RawJson,
    ) -> Result<RawResponse> {
        let request =
            RawRequest::new(ResourceKind::ContentRoutingMatchRule, body).with_parent(policy_name);
        submit(self.transport.as_ref(), &request).await
    }

    /// Post a pre-built body for any resource kind.
    pub async fn create_raw(&self, request: &RawRequest) -> Result<RawResponse> {
        submit(self.transport.as_ref(), request).await
    }

    async fn send<R>(&self, request: &R) -> Result<()>
    where
        R: ApplianceRequest + Sync,
    {
        submit(self.transport.as_ref(), request).await.map(|_| ())
    }
}
