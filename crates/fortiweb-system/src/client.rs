//! Asynchronous client for `System/*` resources.

use crate::Result;
use fortiweb_core::request::{submit, ApplianceRequest, RequestDescriptor};
use fortiweb_core::types::SYSTEM_STATUS_PATH;
use fortiweb_core::{FortiWebConfig, HttpTransport, Transport};
use std::sync::Arc;
use tracing::debug;

const USER_AGENT: &str = concat!("fortiweb-system/", env!("CARGO_PKG_VERSION"));

/// Client for appliance-wide system information.
#[derive(Clone)]
pub struct SystemClient {
    transport: Arc<dyn Transport>,
}

impl SystemClient {
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

    /// Fetch the appliance status document.
    ///
    /// The body is returned as text without parsing.
    pub async fn status(&self) -> Result<String> {
        let response = submit(self.transport.as_ref(), &StatusQuery).await?;
        debug!(bytes = response.body.len(), "Received system status");
        Ok(response.body)
    }
}

/// GET of the status document.
struct StatusQuery;

impl ApplianceRequest for StatusQuery {
    fn descriptor(&self) -> Result<RequestDescriptor> {
        Ok(RequestDescriptor::get(SYSTEM_STATUS_PATH))
    }
}
