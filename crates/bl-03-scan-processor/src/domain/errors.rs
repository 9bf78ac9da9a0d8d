//! Scan processor error types.

use shared_types::LotId;
use thiserror::Error;

/// Malformed `restore` / `set` command.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CommandError {
    /// `restore` needs exactly one lot token.
    #[error("usage: restore <lot>")]
    RestoreUsage,

    /// `set` needs one lot token and an all-digit count.
    #[error("usage: set <lot> <count>")]
    SetUsage,
}

/// Per-event failure. Every variant is turned into a reply; none reaches
/// the transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// The catalog could not be fetched or parsed. Nothing was changed.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Malformed restore/set command.
    #[error(transparent)]
    CommandSyntax(#[from] CommandError),

    /// The command names a lot the catalog does not define.
    #[error("Lot not found: {lot_id}")]
    LotNotFound {
        lot_id: LotId,
        /// A few known lot ids, offered as a hint.
        known: Vec<LotId>,
    },

    /// No lot carries the scanned code.
    #[error("No lot matches the scanned code")]
    ScanNoMatch,

    /// The ledger or dedup document could not be loaded or saved.
    #[error("Storage failure: {0}")]
    Storage(String),
}
