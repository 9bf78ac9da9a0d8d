//! Adapters for the Ledger subsystem.
//!
//! - `json_file`: production store, one pretty-printed JSON file per document
//! - `memory`: in-memory store for tests and ephemeral runs
//! - `lock`: exclusive ownership of the data directory (fs2)

pub mod json_file;
pub mod lock;
pub mod memory;

pub use json_file::*;
pub use lock::*;
pub use memory::*;
