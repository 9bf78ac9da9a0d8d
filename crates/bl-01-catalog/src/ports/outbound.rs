//! Outbound (Driven) ports for the Catalog subsystem.

use crate::domain::CatalogError;

/// Retrieves the raw catalog document from its authoritative source.
///
/// The returned bytes are validated by the caller before they replace the
/// local snapshot.
#[async_trait::async_trait]
pub trait CatalogFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>, CatalogError>;

    /// Human-readable source description for logs.
    fn describe(&self) -> String;
}
