//! Adapters for the Catalog subsystem.
//!
//! - `cache`: freshness-gated local snapshot (`CatalogProvider`)
//! - `fetcher`: file mirror and HTTP sources (`CatalogFetcher`)

pub mod cache;
pub mod fetcher;

pub use cache::*;
pub use fetcher::*;
