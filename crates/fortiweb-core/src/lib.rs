//! # fortiweb-core
//!
//! Transport and request primitives for the FortiWeb REST management API.
//!
//! ## Modules
//!
//! - [`error`] - Error types and the uniform outcome contract
//! - [`config`] - Connection configuration and TLS policy
//! - [`auth`] - `Authorization` header encoding
//! - [`client`] - `reqwest`-backed HTTP transport
//! - [`transport`] - Transport trait and raw responses
//! - [`request`] - Typed and raw request descriptors
//! - [`body`] - JSON body assembly
//! - [`name`] - Resource name sanitization
//! - [`types`] - Resource kinds, API paths and option selectors

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod body;
pub mod client;
pub mod config;
pub mod error;
pub mod name;
pub mod request;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use client::{HttpTransport, HttpTransportBuilder};
pub use config::{FortiWebConfig, TlsVerification};
pub use error::{Error, Result};
pub use request::{submit, ApplianceRequest, RawJson, RawRequest, ResourceRequest};
pub use transport::{RawResponse, Transport};
