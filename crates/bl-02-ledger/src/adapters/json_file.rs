use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::{DedupWindow, Ledger, StoreError};
use crate::ports::outbound::{DedupStore, LedgerStore};

/// File name of the ledger document inside the data directory.
pub const LEDGER_FILE: &str = "query_log.json";

/// File name of the dedup document inside the data directory.
pub const DEDUP_FILE: &str = "query_history.json";

/// JSON-file-backed document store.
///
/// Reads the whole file on `load` and rewrites it on `save`. Writes go to a
/// sibling temp file which is synced and then renamed over the target, so a
/// crash mid-write leaves the previous document intact. Output is
/// pretty-printed with stable key order; saving an unchanged document
/// reproduces the same bytes.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<T, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Store file absent, starting empty");
                return Ok(T::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write(&self, value: &T) -> Result<(), StoreError> {
        let mut bytes = serde_json::to_vec_pretty(value).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        bytes.push(b'\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(|e| self.io_error(e))?;
        file.write_all(&bytes).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl LedgerStore for JsonFileStore<Ledger> {
    fn load(&self) -> Result<Ledger, StoreError> {
        self.read()
    }

    fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        self.write(ledger)
    }
}

impl DedupStore for JsonFileStore<DedupWindow> {
    fn load(&self) -> Result<DedupWindow, StoreError> {
        self.read()
    }

    fn save(&self, window: &DedupWindow) -> Result<(), StoreError> {
        self.write(window)
    }
}
