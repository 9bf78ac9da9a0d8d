//! Immutable catalog snapshot.

use std::collections::HashMap;

use shared_types::{parse_catalog, BoxCount, CatalogEntry, LotId};

use super::errors::CatalogError;

/// Number of lot ids offered as a hint when a lot is not found.
pub const LOT_HINT_LIMIT: usize = 5;

/// A loaded catalog snapshot.
///
/// Entries keep their stored order, which decides scan precedence. When a
/// lot id appears twice, lookups by id resolve to the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<LotId, usize>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            by_id.entry(entry.lot_id.clone()).or_insert(idx);
        }
        Self { entries, by_id }
    }

    /// Decodes a catalog document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        Ok(Self::new(parse_catalog(bytes)?))
    }

    /// Entries in stored order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, lot_id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(lot_id).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, lot_id: &str) -> bool {
        self.by_id.contains_key(lot_id)
    }

    /// Original box count of a lot, if the lot exists.
    pub fn original_count(&self, lot_id: &str) -> Option<BoxCount> {
        self.get(lot_id).map(|e| e.box_count)
    }

    /// The first `limit` lot ids in stored order.
    pub fn known_lot_ids(&self, limit: usize) -> Vec<LotId> {
        self.entries
            .iter()
            .take(limit)
            .map(|e| e.lot_id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
