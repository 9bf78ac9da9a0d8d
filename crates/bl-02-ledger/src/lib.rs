//! # Ledger Subsystem (bl-02)
//!
//! Mutable per-lot remaining box counts and the message dedup window, plus
//! the persistence adapters that load and rewrite them as whole documents.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Remaining count never goes below zero | `domain/ledger.rs` - `decrement()` saturates |
//! | INVARIANT-2 | Ledger entries exist only for catalog lots | `domain/ledger.rs` - every mutation checks the catalog first |
//! | INVARIANT-3 | Dedup entries older than the retention window are gone after any processed event | `domain/dedup.rs` - `prune()` |
//! | INVARIANT-4 | A message id is admitted at most once | `domain/dedup.rs` - `admit()` |
//! | INVARIANT-5 | Store writes are all-or-nothing | `adapters/json_file.rs` - temp file + rename |
//! | INVARIANT-6 | One process owns a data directory | `adapters/lock.rs` - `DataDirLock` |
//!
//! ## Lifecycle
//!
//! ```text
//! [event start] ──load──→ Ledger + DedupWindow ──mutate──→ ──save (full rewrite)──→ [event end]
//! ```
//!
//! Nothing is patched incrementally: each processed event reads both
//! documents fully and rewrites both fully.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
