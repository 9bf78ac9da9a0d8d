//! Ports layer for the Scan Processor.
//!
//! - Inbound (Driving) port: `MessageHandler`, called once per chat event
//! - Outbound (Driven) port: `ReplySink`, delivers the reply to chat

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
