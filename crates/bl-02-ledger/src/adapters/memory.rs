use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::domain::{DedupWindow, Ledger, StoreError};
use crate::ports::outbound::{DedupStore, LedgerStore};

/// In-memory document store.
///
/// Holds the last saved document and counts saves, which lets tests assert
/// on persistence behaviour without touching the filesystem.
#[derive(Debug, Default)]
pub struct InMemoryStore<T> {
    doc: Mutex<T>,
    saves: AtomicUsize,
}

impl<T: Clone + Default> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `doc`.
    pub fn with(doc: T) -> Self {
        Self {
            doc: Mutex::new(doc),
            saves: AtomicUsize::new(0),
        }
    }

    /// Copy of the stored document.
    pub fn snapshot(&self) -> T {
        self.doc.lock().clone()
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn replace(&self, doc: &T) {
        *self.doc.lock() = doc.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
    }
}

impl LedgerStore for InMemoryStore<Ledger> {
    fn load(&self) -> Result<Ledger, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        self.replace(ledger);
        Ok(())
    }
}

impl DedupStore for InMemoryStore<DedupWindow> {
    fn load(&self) -> Result<DedupWindow, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, window: &DedupWindow) -> Result<(), StoreError> {
        self.replace(window);
        Ok(())
    }
}
