//! # Box-Ledger Test Suite
//!
//! Unified test crate for flows that span subsystems.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs     # Catalog → processor → JSON documents on disk
//!     └── webhook.rs   # Signed HTTP callbacks through the real processor
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bl-tests
//! cargo test -p bl-tests integration::webhook
//! ```

pub mod integration;
