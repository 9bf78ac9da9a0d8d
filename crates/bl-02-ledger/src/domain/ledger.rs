//! Per-lot remaining box counts.
//!
//! A lot's entry is seeded lazily from the catalog's original count the
//! first time it is referenced; afterwards it evolves independently of the
//! catalog. A scan seeds from the row it matched, so a lot id listed twice
//! starts from that row's count.

use std::collections::BTreeMap;

use bl_01_catalog::Catalog;
use serde::{Deserialize, Serialize};
use shared_types::{BoxCount, CatalogEntry, LotId};
use tracing::debug;

use super::errors::LedgerError;

/// Remaining box counts keyed by lot id.
///
/// Keys are ordered so that an unchanged ledger always serializes to the
/// same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    remaining: BTreeMap<LotId, BoxCount>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value, without seeding.
    pub fn get(&self, lot_id: &str) -> Option<BoxCount> {
        self.remaining.get(lot_id).copied()
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LotId, &BoxCount)> {
        self.remaining.iter()
    }

    /// Returns the stored value, seeding it from the catalog on first use.
    ///
    /// # Errors
    /// - `LotNotFound`: no stored value and the lot is absent from the catalog
    pub fn get_or_init(&mut self, catalog: &Catalog, lot_id: &str) -> Result<BoxCount, LedgerError> {
        if let Some(value) = self.get(lot_id) {
            return Ok(value);
        }
        let original = catalog
            .original_count(lot_id)
            .ok_or_else(|| not_found(lot_id))?;
        Ok(*self.seeded(lot_id, original))
    }

    /// Takes one box off the matched lot, flooring at zero.
    ///
    /// A lot with no stored value is seeded from `entry.box_count`.
    pub fn decrement(&mut self, entry: &CatalogEntry) -> BoxCount {
        let value = self.seeded(&entry.lot_id, entry.box_count);
        *value = value.saturating_sub(1);
        *value
    }

    /// Stored slot for the lot, inserting `original` if absent.
    fn seeded(&mut self, lot_id: &str, original: BoxCount) -> &mut BoxCount {
        self.remaining.entry(lot_id.to_string()).or_insert_with(|| {
            debug!(lot_id, original, "Seeding ledger entry");
            original
        })
    }

    /// Resets the lot to its catalog original count.
    ///
    /// # Errors
    /// - `LotNotFound`: the lot is absent from the catalog
    pub fn restore(&mut self, catalog: &Catalog, lot_id: &str) -> Result<BoxCount, LedgerError> {
        let original = catalog
            .original_count(lot_id)
            .ok_or_else(|| not_found(lot_id))?;
        self.remaining.insert(lot_id.to_string(), original);
        Ok(original)
    }

    /// Stores `count` verbatim. No bound check against the original count.
    ///
    /// # Errors
    /// - `LotNotFound`: the lot is absent from the catalog
    pub fn set(
        &mut self,
        catalog: &Catalog,
        lot_id: &str,
        count: BoxCount,
    ) -> Result<BoxCount, LedgerError> {
        if !catalog.contains(lot_id) {
            return Err(not_found(lot_id));
        }
        self.remaining.insert(lot_id.to_string(), count);
        Ok(count)
    }
}

fn not_found(lot_id: &str) -> LedgerError {
    LedgerError::LotNotFound {
        lot_id: lot_id.to_string(),
    }
}
