//! Server object client and models for FortiWeb.
//!
//! Covers virtual servers, server pools and their members, and HTTP
//! content-routing policies with their match rules.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::ServerObjectsClient;
pub use models::{
    ConcatenateOperator, CreateContentRoutingPolicyRequest, CreateMatchRuleRequest,
    CreateServerPoolRequest, CreateServerPoolRuleRequest, CreateVirtualServerRequest,
    LoadBalancingAlgorithm, MatchCondition, MatchObject, PoolMode, ServerPoolType, ServerStatus,
};

/// Convenient result alias that reuses the shared FortiWeb error type.
pub type Result<T> = fortiweb_core::Result<T>;
