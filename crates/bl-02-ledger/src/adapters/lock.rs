//! # Data Directory Locking
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on
//! Windows). The runtime holds the lock for its whole lifetime so that no
//! second process can interleave read-modify-write cycles on the same
//! ledger and dedup files.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::info;

use crate::domain::StoreError;

/// Exclusive lock on a data directory, released on drop.
///
/// The `LOCK` file itself is never deleted: every process must lock the
/// same inode.
///
/// ```ignore
/// let lock = DataDirLock::acquire(Path::new("./data"))?;
/// // Lock is held until `lock` goes out of scope
/// ```
#[derive(Debug)]
pub struct DataDirLock {
    file: File,
    path: PathBuf,
    pid: u32,
}

impl DataDirLock {
    /// Lock file name
    pub const LOCK_FILE: &'static str = "LOCK";

    /// Acquires the lock without waiting.
    ///
    /// # Errors
    /// - `Locked`: another process holds the directory
    /// - `Io`: the directory or lock file could not be created
    pub fn acquire(data_dir: &Path) -> Result<Self, StoreError> {
        let lock_path = data_dir.join(Self::LOCK_FILE);
        let io = |source| StoreError::Io {
            path: lock_path.clone(),
            source,
        };

        std::fs::create_dir_all(data_dir).map_err(io)?;
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(io)?;

        if file.try_lock_exclusive().is_err() {
            return Err(StoreError::Locked {
                pid: read_pid(&lock_path),
                path: lock_path,
            });
        }

        let pid = std::process::id();
        file.set_len(0).map_err(io)?;
        writeln!(file, "{pid}").map_err(io)?;
        file.sync_all().map_err(io)?;
        info!(path = %lock_path.display(), pid, "Acquired data directory lock");

        Ok(Self {
            file,
            path: lock_path,
            pid,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        #[allow(clippy::incompatible_msrv)]
        let _ = self.file.unlock();
    }
}

fn read_pid(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}
