//! Content extraction pipeline.
//!
//! Classification picks a strategy for an uploaded file, the coordinator
//! drives it and always hands back a well-formed report, degrading to
//! synthesized fallback content when a backend lets a Word or PDF file
//! down. Errors cross this boundary as report fields, never as panics.

pub mod classify;
pub mod coordinator;
pub mod spill;
pub mod strategy;
pub mod types;

pub use classify::{classify, resolve_mime, FileClass};
pub use coordinator::ExtractionCoordinator;
pub use spill::SpillFile;
pub use types::{
    ContentType, ExtractionOutcome, ExtractionReport, PdfBackend, UploadedFile, WordBackend,
};

/// Errors raised while running an extraction strategy.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Content is not valid UTF-8: {0}")]
    Encoding(String),
    #[error("Backend extraction failed: {0}")]
    Backend(String),
    #[error("Backend call exceeded {0}s")]
    BackendTimeout(u64),
    #[error("Temp resource error: {0}")]
    Resource(String),
    #[error("Unexpected extraction failure: {0}")]
    Unexpected(String),
}

impl ExtractionError {
    /// True for failures a fallback-capable class absorbs into a
    /// degraded result instead of failing the whole extraction.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            Self::Encoding(_) | Self::Backend(_) | Self::BackendTimeout(_)
        )
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
