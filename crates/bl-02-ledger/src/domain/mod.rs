//! # Domain Layer - Ledger Subsystem
//!
//! - `ledger`: lot id → remaining box count
//! - `dedup`: message id → first-seen record, with time-based pruning
//! - `errors`: LedgerError and StoreError

pub mod dedup;
pub mod errors;
pub mod ledger;

pub use dedup::*;
pub use errors::*;
pub use ledger::*;
