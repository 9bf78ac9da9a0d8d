//! # Inbound Port - CatalogProvider

use std::sync::Arc;

use crate::domain::{Catalog, CatalogError};

/// Hands out the catalog snapshot to use for one event.
///
/// Implementations decide whether the snapshot must be refreshed first. A
/// failure means the event cannot be processed and must not change state.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn current(&self) -> Result<Arc<Catalog>, CatalogError>;
}

/// Fixed in-memory catalog, never refreshed.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    catalog: Arc<Catalog>,
}

impl StaticCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for StaticCatalog {
    async fn current(&self) -> Result<Arc<Catalog>, CatalogError> {
        Ok(Arc::clone(&self.catalog))
    }
}
