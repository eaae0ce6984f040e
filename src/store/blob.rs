//! Keyed JSON blob persistence.
//!
//! Three named blobs back the whole store: document records, the
//! activity log, and the last computed stats snapshot. The trait keeps
//! callers independent of where blobs actually live, the file-backed
//! implementation writes through a temp file so a crash mid-save never
//! leaves a torn blob behind.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use super::StoreError;

pub const DOCUMENTS_BLOB: &str = "documents";
pub const ACTIVITIES_BLOB: &str = "activities";
pub const STATS_BLOB: &str = "stats";

/// Storage backend for named JSON blobs.
pub trait BlobStore: Send + Sync {
    /// Load a blob. `Ok(None)` means the key was never saved.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Save a blob, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a blob. Missing keys are a no-op.
    fn clear(&self, key: &str) -> Result<(), StoreError>;
}

// ═══════════════════════════════════════════════════════════
// File-backed store
// ═══════════════════════════════════════════════════════════

/// One `<key>.json` file per blob under a fixed directory.
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Open the store, creating the directory if needed.
    pub fn new(dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Write-then-rename so readers only ever see complete blobs
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.persist(self.path(key)).map_err(|e| StoreError::Io(e.error))?;
        tracing::debug!(key = %key, bytes = value.len(), "Blob saved");
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// In-memory store
// ═══════════════════════════════════════════════════════════

/// Map-backed store for tests and ephemeral sessions.
pub struct MemoryBlobStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.map.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.map.lock().map_err(|_| StoreError::LockPoisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.map.lock().map_err(|_| StoreError::LockPoisoned)?;
        map.remove(key);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
