//! Ports layer for the Ledger subsystem.
//!
//! Outbound (Driven) ports only: the documents are loaded and saved through
//! these traits so the processor never touches the filesystem directly.

pub mod outbound;

pub use outbound::*;
