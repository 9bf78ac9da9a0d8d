//! Ports layer for the Catalog subsystem.
//!
//! - Inbound (Driving) port: snapshot access for the scan processor
//! - Outbound (Driven) port: retrieval of the catalog document

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
