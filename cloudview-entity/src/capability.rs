//! Capabilities injected into components instead of reaching for global state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{EntityError, Result};

/// Clears cached renders after records change.
///
/// Invalidation is coarse: implementors drop everything they hold.
pub trait CacheInvalidator: Send + Sync {
    fn invalidate_all(&self);
}

/// Invalidator for callers that keep no caches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn invalidate_all(&self) {}
}

/// Short-lived blobs handed from one request to a later one, e.g. a freshly
/// generated key pair's private key waiting to be downloaded.
///
/// `take` returns the blob at most once.
pub trait TempResourceStore: Send + Sync {
    fn put(&self, key: &str, data: &[u8]) -> Result<()>;
    fn take(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

/// Keys become file names, so only plain names are accepted.
fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(EntityError::InvalidKey {
            key: key.to_string(),
        })
    }
}

/// In-process temp store.
#[derive(Debug, Default)]
pub struct MemoryTempStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryTempStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // a panic while holding the lock leaves the map itself intact
        self.blobs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TempResourceStore for MemoryTempStore {
    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        check_key(key)?;
        self.blobs().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn take(&self, key: &str) -> Result<Option<Vec<u8>>> {
        check_key(key)?;
        Ok(self.blobs().remove(key))
    }
}

/// Temp store backed by one file per key in a directory.
#[derive(Debug, Clone)]
pub struct DirTempStore {
    root: PathBuf,
}

impl DirTempStore {
    /// Use `root`, creating it if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TempResourceStore for DirTempStore {
    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        check_key(key)?;
        let tmp = self.root.join(format!(".tmp_{}", ulid::Ulid::new()));
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, self.root.join(key))?;
        debug!(key, bytes = data.len(), "stored temp resource");
        Ok(())
    }

    fn take(&self, key: &str) -> Result<Option<Vec<u8>>> {
        check_key(key)?;
        let path = self.root.join(key);
        match std::fs::read(&path) {
            Ok(data) => {
                std::fs::remove_file(&path)?;
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
