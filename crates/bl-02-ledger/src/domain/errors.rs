//! Ledger error types.

use std::path::PathBuf;

use shared_types::LotId;
use thiserror::Error;

/// Ledger mutation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The lot id is not defined in the catalog.
    #[error("Lot not found: {lot_id}")]
    LotNotFound { lot_id: LotId },
}

/// Persistence errors for the ledger and dedup documents.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the document failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document exists but is not valid JSON of the expected shape.
    #[error("Corrupt store {}: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },

    /// Another process holds the data directory.
    #[error("Data directory already in use ({}, holder pid {pid:?})", .path.display())]
    Locked { pid: Option<u32>, path: PathBuf },
}
