//! Catalog sources: a mirrored file or an HTTP(S) URL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::domain::CatalogError;
use crate::ports::outbound::CatalogFetcher;

/// Reads the catalog from a mirrored file, e.g. a folder kept in sync with
/// the file-sync backend.
#[derive(Debug, Clone)]
pub struct FileCatalogFetcher {
    source: PathBuf,
}

impl FileCatalogFetcher {
    pub fn new<P: AsRef<Path>>(source: P) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogFetcher for FileCatalogFetcher {
    async fn fetch(&self) -> Result<Vec<u8>, CatalogError> {
        match tokio::fs::read(&self.source).await {
            Ok(bytes) => {
                debug!(source = %self.source.display(), bytes = bytes.len(), "Read catalog mirror");
                Ok(bytes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
                CatalogError::SourceNotFound(self.source.display().to_string()),
            ),
            Err(e) => Err(CatalogError::FetchFailed(e.to_string())),
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.source.display())
    }
}

/// Upper bound on one catalog download.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads the catalog document over HTTP(S).
///
/// Fetches run while events wait on the processor, so every request is
/// bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct HttpCatalogFetcher {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpCatalogFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait::async_trait]
impl CatalogFetcher for HttpCatalogFetcher {
    async fn fetch(&self) -> Result<Vec<u8>, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CatalogError::FetchFailed(e.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::SourceNotFound(self.url.clone()));
        }
        let response = response
            .error_for_status()
            .map_err(|e| CatalogError::FetchFailed(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CatalogError::FetchFailed(e.to_string()))?;
        debug!(url = %self.url, bytes = bytes.len(), "Downloaded catalog");
        Ok(bytes.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
