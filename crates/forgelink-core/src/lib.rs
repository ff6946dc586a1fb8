//! Core types, errors, and configuration for forgelink.
//!
//! This crate provides the foundational abstractions used across all forgelink components.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, EndpointConfig};
pub use error::{Error, Result};
pub use types::{CommandResult, ProviderFamily, RemoteEndpoint};
