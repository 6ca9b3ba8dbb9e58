//! Server policy client and models for FortiWeb.
//!
//! A server policy binds a virtual server to a server pool or to a set of
//! content-routing policies, together with its protection settings.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::ServerPolicyClient;
pub use models::{
    CreateServerPolicyContentRuleRequest, CreateServerPolicyRequest, DeploymentMode,
    PolicyBackend,
};

/// Convenient result alias that reuses the shared FortiWeb error type.
pub type Result<T> = fortiweb_core::Result<T>;
