//! # Domain Layer - Scan Processor
//!
//! - `command`: free text → Restore / Set / Scan intent
//! - `outcome`: result of one dispatched event
//! - `reply`: outcome → single reply string, per locale
//! - `errors`: CommandError and ProcessError

pub mod command;
pub mod errors;
pub mod outcome;
pub mod reply;

pub use command::*;
pub use errors::*;
pub use outcome::*;
pub use reply::*;
