//! # Core Domain Entities
//!
//! Defines the records shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Catalog**: `CatalogEntry`, `ItemRecord` (read-only lot definitions)
//! - **Messaging**: `InboundMessage` (one chat event delivered by the transport)
//!
//! Catalog documents come from a spreadsheet exporter that writes the
//! original column headers as JSON keys. Each field is renamed to that key
//! and also accepts an English alias.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::errors::RecordError;
use crate::lenient;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// Catalog-assigned lot identifier.
pub type LotId = String;

/// Remaining quantity unit tracked per lot.
pub type BoxCount = u64;

/// UTC epoch seconds.
pub type Timestamp = u64;

/// Seconds in one day.
pub const SECONDS_PER_DAY: u64 = 86_400;

// =============================================================================
// CATALOG
// =============================================================================

/// One scannable item belonging to a lot.
///
/// Product code and barcode are interchangeable scan targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemRecord {
    /// Vendor product code.
    #[serde(
        rename = "商品編號",
        alias = "product_code",
        default,
        deserialize_with = "lenient::code"
    )]
    pub product_code: String,
    /// Printed barcode.
    #[serde(
        rename = "條碼",
        alias = "barcode",
        default,
        deserialize_with = "lenient::code"
    )]
    pub barcode: String,
}

impl ItemRecord {
    /// Creates an item with both scan targets.
    pub fn new(product_code: impl Into<String>, barcode: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
            barcode: barcode.into(),
        }
    }
}

/// A lot definition from the catalog snapshot.
///
/// Immutable for the lifetime of one snapshot.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogEntry {
    /// Lot identifier.
    #[serde(
        rename = "編號",
        alias = "lot_id",
        default,
        deserialize_with = "lenient::code"
    )]
    pub lot_id: LotId,
    /// Box count the lot started with.
    #[serde(
        rename = "箱數",
        alias = "box_count",
        default,
        deserialize_with = "lenient::count"
    )]
    pub box_count: BoxCount,
    /// Items in the lot, in export order.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "資料", alias = "items", default)]
    pub items: Vec<ItemRecord>,
}

impl CatalogEntry {
    /// Creates an entry.
    pub fn new(lot_id: impl Into<LotId>, box_count: BoxCount, items: Vec<ItemRecord>) -> Self {
        Self {
            lot_id: lot_id.into(),
            box_count,
            items,
        }
    }

    /// Every product code and barcode of this lot.
    ///
    /// Empty codes are left out so that an empty probe never matches.
    pub fn scan_codes(&self) -> HashSet<&str> {
        self.items
            .iter()
            .flat_map(|item| [item.product_code.as_str(), item.barcode.as_str()])
            .filter(|code| !code.is_empty())
            .collect()
    }
}

/// Decodes a catalog document (a JSON array of entries).
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<CatalogEntry>, RecordError> {
    Ok(serde_json::from_slice(bytes)?)
}

// =============================================================================
// MESSAGING
// =============================================================================

/// A text message delivered by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Transport-assigned message id; repeated deliveries share it.
    pub message_id: String,
    /// Sender id.
    pub user_id: String,
    /// Raw message text.
    pub text: String,
}

impl InboundMessage {
    /// Creates a message.
    pub fn new(
        message_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}
