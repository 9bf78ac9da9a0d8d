//! Catalog error types.

use shared_types::RecordError;
use thiserror::Error;

/// Catalog error type.
///
/// Any of these makes the catalog unavailable for the current event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The configured source does not exist.
    #[error("Catalog source not found: {0}")]
    SourceNotFound(String),

    /// The remote or mirrored source could not be read.
    #[error("Catalog fetch failed: {0}")]
    FetchFailed(String),

    /// The fetched or cached document is not a valid catalog.
    #[error(transparent)]
    Malformed(#[from] RecordError),

    /// The local snapshot could not be read or replaced.
    #[error("Catalog snapshot I/O error: {0}")]
    Io(String),
}
