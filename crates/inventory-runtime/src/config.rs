//! # Runtime Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//! Defaults are overridden from environment variables by [`load_config`].
//!
//! ## Security Requirements
//!
//! - `line.channel_secret` SHOULD be set in production; without it webhook
//!   signatures are not checked.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use bl_03_scan_processor::Locale;
use shared_types::SECONDS_PER_DAY;
use thiserror::Error;
use tracing::{info, warn};

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub http: HttpConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub dedup: DedupConfig,
    pub reply: ReplyConfig,
    pub line: LineConfig,
}

impl RuntimeConfig {
    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - no channel secret is configured
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        match &self.line.channel_secret {
            Some(secret) if !secret.is_empty() => Ok(()),
            _ => Err(ConfigError::MissingChannelSecret),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "SECURITY VIOLATION: webhook signatures are not verified. \
         Set LINE_CHANNEL_SECRET environment variable."
    )]
    MissingChannelSecret,
}

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub listen_addr: SocketAddr,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8886)),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the catalog snapshot, ledger and dedup documents.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Catalog source configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Mirrored file path, or an `http(s)://` URL.
    pub source: String,
    /// Snapshot freshness window.
    pub max_age: Duration,
}

impl CatalogConfig {
    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: "./all_data.json.src".to_string(),
            max_age: bl_01_catalog::DEFAULT_MAX_AGE,
        }
    }
}

/// Dedup window configuration.
#[derive(Debug, Clone)]
pub struct DedupConfig {
    pub retention_secs: u64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            retention_secs: 7 * SECONDS_PER_DAY,
        }
    }
}

/// Reply rendering configuration.
#[derive(Debug, Clone, Default)]
pub struct ReplyConfig {
    pub locale: Locale,
}

/// Chat channel credentials.
#[derive(Clone, Default)]
pub struct LineConfig {
    /// Webhook signing secret.
    pub channel_secret: Option<String>,
    /// Bearer token for the reply endpoint.
    pub access_token: Option<String>,
}

impl std::fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineConfig")
            .field("channel_secret", &self.channel_secret.as_ref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> RuntimeConfig {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary variable lookup.
///
/// Unparseable values are ignored with a warning and the default is kept.
pub fn load_config_from<F>(lookup: F) -> RuntimeConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = RuntimeConfig::default();

    if let Some(addr) = lookup("BL_HTTP_ADDR") {
        match addr.parse() {
            Ok(a) => config.http.listen_addr = a,
            Err(_) => warn!(%addr, "BL_HTTP_ADDR is not a socket address"),
        }
    }
    if let Some(dir) = lookup("BL_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(dir);
    }
    if let Some(source) = lookup("BL_CATALOG_SOURCE") {
        config.catalog.source = source;
    }
    if let Some(secs) = lookup("BL_CATALOG_MAX_AGE_SECS") {
        match secs.parse() {
            Ok(s) => config.catalog.max_age = Duration::from_secs(s),
            Err(_) => warn!(%secs, "BL_CATALOG_MAX_AGE_SECS must be an integer"),
        }
    }
    if let Some(secs) = lookup("BL_DEDUP_RETENTION_SECS") {
        match secs.parse() {
            Ok(s) => config.dedup.retention_secs = s,
            Err(_) => warn!(%secs, "BL_DEDUP_RETENTION_SECS must be an integer"),
        }
    }
    if let Some(locale) = lookup("BL_LOCALE") {
        match locale.parse() {
            Ok(l) => config.reply.locale = l,
            Err(e) => warn!(error = %e, "Ignoring BL_LOCALE"),
        }
    }
    if let Some(secret) = lookup("LINE_CHANNEL_SECRET").filter(|s| !s.is_empty()) {
        config.line.channel_secret = Some(secret);
        info!("Loaded channel secret from environment");
    }
    if let Some(token) = lookup("LINE_CHANNEL_ACCESS_TOKEN").filter(|s| !s.is_empty()) {
        config.line.access_token = Some(token);
        info!("Loaded channel access token from environment");
    }

    config
}
