//! System queries for FortiWeb.

#![deny(missing_docs)]

pub mod client;

pub use client::SystemClient;

/// Convenient result alias that reuses the shared FortiWeb error type.
pub type Result<T> = fortiweb_core::Result<T>;
