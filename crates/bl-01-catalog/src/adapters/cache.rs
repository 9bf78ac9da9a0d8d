//! # Freshness-Gated Catalog Cache
//!
//! Keeps a local snapshot file of the catalog and refetches it when the file
//! is absent or its modification time is older than `max_age`.
//!
//! The whole check-and-refresh runs under one async mutex. A caller that had
//! to wait re-checks freshness after acquiring it, so events arriving during
//! a refresh reuse that fetch instead of starting their own.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use shared_types::TimeSource;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{Catalog, CatalogError};
use crate::ports::inbound::CatalogProvider;
use crate::ports::outbound::CatalogFetcher;

/// Default snapshot freshness window (10 minutes).
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(600);

/// Snapshot file name inside the data directory.
pub const CATALOG_FILE: &str = "all_data.json";

struct Loaded {
    catalog: Arc<Catalog>,
    modified: SystemTime,
}

/// Catalog provider backed by a local snapshot file and a remote fetcher.
pub struct CatalogCache {
    snapshot_path: PathBuf,
    max_age: Duration,
    fetcher: Arc<dyn CatalogFetcher>,
    clock: Arc<dyn TimeSource>,
    loaded: Mutex<Option<Loaded>>,
    fetches: AtomicU64,
}

impl CatalogCache {
    pub fn new<P: AsRef<Path>>(
        snapshot_path: P,
        fetcher: Arc<dyn CatalogFetcher>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            snapshot_path: snapshot_path.as_ref().to_path_buf(),
            max_age: DEFAULT_MAX_AGE,
            fetcher,
            clock,
            loaded: Mutex::new(None),
            fetches: AtomicU64::new(0),
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Number of fetches performed so far.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    async fn snapshot_mtime(&self) -> Option<SystemTime> {
        tokio::fs::metadata(&self.snapshot_path)
            .await
            .and_then(|m| m.modified())
            .ok()
    }

    fn is_fresh(&self, modified: SystemTime) -> bool {
        let modified_secs = modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.clock.now().saturating_sub(modified_secs) <= self.max_age.as_secs()
    }

    async fn refresh(&self) -> Result<Loaded, CatalogError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let source = self.fetcher.describe();
        let bytes = self.fetcher.fetch().await.inspect_err(|e| {
            warn!(%source, error = %e, "Catalog fetch failed");
        })?;

        // Validate before replacing the snapshot on disk.
        let catalog = Catalog::from_json(&bytes)?;
        write_atomic(&self.snapshot_path, &bytes).await?;

        let modified = self
            .snapshot_mtime()
            .await
            .ok_or_else(|| CatalogError::Io("snapshot vanished after write".to_string()))?;
        info!(%source, lots = catalog.len(), "Catalog refreshed");

        Ok(Loaded {
            catalog: Arc::new(catalog),
            modified,
        })
    }
}

#[async_trait::async_trait]
impl CatalogProvider for CatalogCache {
    async fn current(&self) -> Result<Arc<Catalog>, CatalogError> {
        let mut loaded = self.loaded.lock().await;

        let next = match self.snapshot_mtime().await {
            Some(modified) if self.is_fresh(modified) => {
                if let Some(current) = loaded.as_ref() {
                    if current.modified == modified {
                        return Ok(Arc::clone(&current.catalog));
                    }
                }
                debug!(path = %self.snapshot_path.display(), "Loading catalog snapshot");
                let bytes = tokio::fs::read(&self.snapshot_path)
                    .await
                    .map_err(|e| CatalogError::Io(e.to_string()))?;
                Loaded {
                    catalog: Arc::new(Catalog::from_json(&bytes)?),
                    modified,
                }
            }
            _ => self.refresh().await?,
        };

        let catalog = Arc::clone(&next.catalog);
        *loaded = Some(next);
        Ok(catalog)
    }
}

/// Writes via a temp file and rename so readers never see a partial snapshot.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CatalogError> {
    let io = |e: std::io::Error| CatalogError::Io(e.to_string());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(io)?;
        }
    }
    let temp_path = path.with_extension("tmp");
    let mut file = tokio::fs::File::create(&temp_path).await.map_err(io)?;
    file.write_all(bytes).await.map_err(io)?;
    file.sync_all().await.map_err(io)?;
    tokio::fs::rename(&temp_path, path).await.map_err(io)?;
    Ok(())
}
