//! Temp-file spill for backend extraction.
//!
//! Word and PDF backends read from disk, so uploaded bytes are spilled
//! to a temp file for the duration of the call. Release is guaranteed
//! on every exit path: explicit cleanup on the happy path, `Drop` when
//! the owning future is abandoned.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::ExtractionError;

/// A temp file holding one upload's bytes, deleted when released.
pub struct SpillFile {
    inner: Option<tempfile::NamedTempFile>,
    path: PathBuf,
}

impl SpillFile {
    /// Spill the bytes to a fresh temp file.
    pub fn create(bytes: &[u8]) -> Result<Self, ExtractionError> {
        let mut file =
            tempfile::NamedTempFile::new().map_err(|e| ExtractionError::Resource(e.to_string()))?;
        file.write_all(bytes)
            .map_err(|e| ExtractionError::Resource(e.to_string()))?;
        file.flush()
            .map_err(|e| ExtractionError::Resource(e.to_string()))?;
        let path = file.path().to_path_buf();
        Ok(Self {
            inner: Some(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the temp file now. A failed delete is logged and
    /// swallowed, it must never mask the extraction result.
    pub fn cleanup(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(file) = self.inner.take() {
            if let Err(e) = file.close() {
                tracing::warn!(path = %self.path.display(), error = %e, "Spill file cleanup failed");
            }
        }
    }
}

impl Drop for SpillFile {
    fn drop(&mut self) {
        self.release();
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_writes_bytes_to_disk() {
        let spill = SpillFile::create(b"hello spill").unwrap();
        let read = std::fs::read(spill.path()).unwrap();
        assert_eq!(read, b"hello spill");
        spill.cleanup();
    }

    #[test]
    fn cleanup_removes_file() {
        let spill = SpillFile::create(b"temporary").unwrap();
        let path = spill.path().to_path_buf();
        assert!(path.exists());
        spill.cleanup();
        assert!(!path.exists());
    }

    #[test]
    fn drop_removes_file() {
        let path = {
            let spill = SpillFile::create(b"abandoned").unwrap();
            spill.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn empty_payload_is_fine() {
        let spill = SpillFile::create(b"").unwrap();
        let read = std::fs::read(spill.path()).unwrap();
        assert!(read.is_empty());
        spill.cleanup();
    }
}
