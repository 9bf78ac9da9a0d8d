//! Outbound (Driven) ports for the Ledger subsystem.

use crate::domain::{DedupWindow, Ledger, StoreError};

/// Whole-document persistence of the ledger.
pub trait LedgerStore: Send + Sync {
    /// Reads the full ledger. A store that was never written loads empty.
    fn load(&self) -> Result<Ledger, StoreError>;

    /// Replaces the full ledger.
    fn save(&self, ledger: &Ledger) -> Result<(), StoreError>;
}

/// Whole-document persistence of the dedup window.
pub trait DedupStore: Send + Sync {
    /// Reads the full window. A store that was never written loads empty.
    fn load(&self) -> Result<DedupWindow, StoreError>;

    /// Replaces the full window.
    fn save(&self, window: &DedupWindow) -> Result<(), StoreError>;
}
