//! # Catalog Subsystem (bl-01)
//!
//! Read-only snapshot of lot definitions and their scannable codes, plus the
//! matcher that resolves a raw scan probe to at most one lot.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Catalog is never mutated by event handling | `domain/catalog.rs` - no `&mut` API |
//! | INVARIANT-2 | At most one lot per scan, first match wins | `domain/matcher.rs` - `match_probe()` returns `Option` |
//! | INVARIANT-3 | Snapshot older than `max_age` is refetched before use | `adapters/cache.rs` - `current()` |
//! | INVARIANT-4 | Concurrent refreshes coalesce onto one fetch | `adapters/cache.rs` - refresh under mutex, re-check after lock |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - CatalogCache, FileCatalogFetcher, HttpCatalogFetcher│
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - CatalogProvider trait                      │
//! │  ports/outbound.rs - CatalogFetcher trait                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/catalog.rs - Catalog snapshot with lot index            │
//! │  domain/matcher.rs - match_probe()                              │
//! │  domain/errors.rs  - CatalogError                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
