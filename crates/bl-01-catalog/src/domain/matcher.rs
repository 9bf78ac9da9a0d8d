//! Scan probe resolution.
//!
//! A probe is compared against the product codes and barcodes of each lot in
//! catalog order. The first lot containing the probe wins and the search
//! stops there, even if later lots share the code.

use shared_types::CatalogEntry;

use super::catalog::Catalog;

/// Resolves a raw scan probe to at most one lot.
pub fn match_probe<'a>(catalog: &'a Catalog, probe: &str) -> Option<&'a CatalogEntry> {
    if probe.is_empty() {
        return None;
    }
    catalog
        .entries()
        .iter()
        .find(|entry| entry.scan_codes().contains(probe))
}
