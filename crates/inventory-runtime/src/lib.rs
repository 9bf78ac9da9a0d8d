//! # Inventory Runtime Library
//!
//! Exposes the runtime's modules for testing. The entry point is the
//! `main.rs` binary.
//!
//! ## Modules
//!
//! - `config` - Environment-driven configuration
//! - `adapters` - Webhook signature checks and reply sinks
//! - `webhook` - HTTP routes
//! - `runtime` - Subsystem wiring and server lifecycle

pub mod adapters;
pub mod config;
pub mod runtime;
pub mod webhook;

pub use config::{load_config, load_config_from, ConfigError, RuntimeConfig};
pub use runtime::InventoryRuntime;
