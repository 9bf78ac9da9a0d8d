//! Subsystem wiring.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use bl_01_catalog::{
    CatalogCache, CatalogFetcher, FileCatalogFetcher, HttpCatalogFetcher, CATALOG_FILE,
};
use bl_02_ledger::{DataDirLock, DedupWindow, JsonFileStore, Ledger, DEDUP_FILE, LEDGER_FILE};
use bl_03_scan_processor::{ProcessorConfig, ReplySink, ScanProcessor};
use shared_types::{SystemTimeSource, TimeSource};
use tracing::{info, warn};

use crate::adapters::{LineReplyClient, LogReplySink};
use crate::config::RuntimeConfig;
use crate::webhook::{router, WebhookState};

/// The assembled service.
///
/// Holds the data directory lock for its whole lifetime.
pub struct InventoryRuntime {
    config: RuntimeConfig,
    processor: Arc<ScanProcessor>,
    sink: Arc<dyn ReplySink>,
    _lock: DataDirLock,
}

impl InventoryRuntime {
    /// Acquires the data directory and builds every subsystem.
    ///
    /// ## Initialization Order
    ///
    /// 1. Lock the data directory (fails if another process holds it)
    /// 2. Catalog cache over the configured source
    /// 3. Ledger and dedup stores
    /// 4. Scan processor
    /// 5. Reply sink
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let data_dir = config.storage.data_dir.clone();
        let lock = DataDirLock::acquire(&data_dir)
            .with_context(|| format!("cannot take ownership of {}", data_dir.display()))?;
        info!(data_dir = %data_dir.display(), pid = lock.pid(), "Data directory locked");

        let clock: Arc<dyn TimeSource> = Arc::new(SystemTimeSource);

        let fetcher: Arc<dyn CatalogFetcher> = if config.catalog.is_remote() {
            Arc::new(HttpCatalogFetcher::new(config.catalog.source.clone()))
        } else {
            Arc::new(FileCatalogFetcher::new(&config.catalog.source))
        };
        info!(source = %fetcher.describe(), max_age_secs = config.catalog.max_age.as_secs(), "Catalog source configured");
        let catalog = Arc::new(
            CatalogCache::new(data_dir.join(CATALOG_FILE), fetcher, clock.clone())
                .with_max_age(config.catalog.max_age),
        );

        let ledger_store = Arc::new(JsonFileStore::<Ledger>::new(data_dir.join(LEDGER_FILE)));
        let dedup_store = Arc::new(JsonFileStore::<DedupWindow>::new(data_dir.join(DEDUP_FILE)));

        let processor = Arc::new(ScanProcessor::new(
            catalog,
            ledger_store,
            dedup_store,
            clock,
            ProcessorConfig {
                retention_secs: config.dedup.retention_secs,
                locale: config.reply.locale,
            },
        ));

        let sink: Arc<dyn ReplySink> = match &config.line.access_token {
            Some(token) => Arc::new(LineReplyClient::new(token.clone())),
            None => {
                warn!("LINE_CHANNEL_ACCESS_TOKEN not set, replies are only logged");
                Arc::new(LogReplySink)
            }
        };

        Ok(Self {
            config,
            processor,
            sink,
            _lock: lock,
        })
    }

    pub fn processor(&self) -> &Arc<ScanProcessor> {
        &self.processor
    }

    /// Serves the webhook until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let state = WebhookState::new(
            self.processor.clone(),
            self.sink.clone(),
            self.config.line.channel_secret.as_deref(),
        );
        let app = router(state);

        let addr = self.config.http.listen_addr;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("cannot bind {addr}"))?;
        info!(%addr, "Webhook listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")?;

        info!("Webhook stopped");
        Ok(())
    }
}
