//! # Shared Types Crate
//!
//! This crate contains the records exchanged between the Box-Ledger
//! subsystems: catalog entries, inbound chat messages and the clock port.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem records are defined here.
//! - **Explicit Records**: Catalog rows are decoded into typed structs with
//!   defaults resolved at load time, never passed around as string-keyed maps.
//! - **Injected Time**: Every component that needs "now" receives a
//!   [`TimeSource`], so retention and freshness rules are testable.

pub mod entities;
pub mod errors;
pub mod lenient;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use time::*;
