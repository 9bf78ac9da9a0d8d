//! # Domain Layer - Catalog Subsystem
//!
//! - `catalog`: immutable snapshot with a lot-id index
//! - `matcher`: scan probe resolution
//! - `errors`: CatalogError enumeration

pub mod catalog;
pub mod errors;
pub mod matcher;

pub use catalog::*;
pub use errors::*;
pub use matcher::*;
