//! # Scan Processor Subsystem (bl-03)
//!
//! Turns one inbound chat message into at most one ledger mutation and at
//! most one reply. Repeated deliveries of the same message id are ignored.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Duplicate message ids get no reply and no write | `service/mod.rs` - `process()` returns before dispatch |
//! | INVARIANT-2 | Every accepted event records its message id | `service/mod.rs` - `persist()` after every dispatch branch |
//! | INVARIANT-3 | Catalog failure changes nothing | `service/mod.rs` - early return before persist |
//! | INVARIANT-4 | One event at a time end to end | `service/mod.rs` - `cycle` mutex held for load → persist |
//! | INVARIANT-5 | Per-event errors never reach the transport | `ports/inbound.rs` - `handle()` returns `Option<String>` |
//!
//! ## Command Surface
//!
//! | Text | Effect |
//! |------|--------|
//! | `restore <lot>` / `還原 <lot>` | Reset lot to catalog original count |
//! | `set <lot> <digits>` / `設定 <lot> <digits>` | Overwrite remaining count |
//! | anything else | Scan probe, decrement the first matching lot |
//!
//! `<lot>` may carry a `lot` / `編號` prefix.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::{EventResult, ProcessorConfig, ScanProcessor};
