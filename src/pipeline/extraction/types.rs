//! Extraction boundary types.
//!
//! An `UploadedFile` goes in, an `ExtractionReport` comes out. The
//! report is always well formed whatever happened in between, the
//! `outcome` field says out-of-band how much trust to put in it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ExtractionError;

// ═══════════════════════════════════════════════════════════
// Input
// ═══════════════════════════════════════════════════════════

/// One file handed to the pipeline: raw bytes plus caller metadata.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    /// MIME type as declared by the uploader, possibly empty.
    pub declared_mime: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// ═══════════════════════════════════════════════════════════
// Content type tag
// ═══════════════════════════════════════════════════════════

/// Wire tag describing what kind of content a report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "word")]
    Word,
    #[serde(rename = "word-fallback")]
    WordFallback,
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "pdf-fallback")]
    PdfFallback,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "error")]
    Error,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Word => "word",
            Self::WordFallback => "word-fallback",
            Self::Pdf => "pdf",
            Self::PdfFallback => "pdf-fallback",
            Self::Image => "image",
            Self::Other => "other",
            Self::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "word" => Some(Self::Word),
            "word-fallback" => Some(Self::WordFallback),
            "pdf" => Some(Self::Pdf),
            "pdf-fallback" => Some(Self::PdfFallback),
            "image" => Some(Self::Image),
            "other" => Some(Self::Other),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn all() -> &'static [ContentType] {
        &[
            Self::Text,
            Self::Word,
            Self::WordFallback,
            Self::Pdf,
            Self::PdfFallback,
            Self::Image,
            Self::Other,
            Self::Error,
        ]
    }

    /// True for synthesized stand-in content after a backend failure.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::WordFallback | Self::PdfFallback)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════
// Outcome and report
// ═══════════════════════════════════════════════════════════

/// How the extraction concluded, out of band from the content itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// The chosen strategy produced real content.
    Succeeded,
    /// A backend failed and fallback content was synthesized.
    Degraded,
    /// Nothing usable could be produced, content describes the failure.
    Failed,
}

impl ExtractionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Degraded => "degraded",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ExtractionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The pipeline's output for one file. Always fully populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub file_name: String,
    /// Resolved MIME type the classification ran against.
    pub file_type: String,
    pub file_size: u64,
    pub content: String,
    pub content_type: ContentType,
    pub extracted_at: String,
    /// One-line account of how the content was obtained.
    pub note: String,
    pub outcome: ExtractionOutcome,
}

// ═══════════════════════════════════════════════════════════
// Backend traits
// ═══════════════════════════════════════════════════════════

/// External Word-document text extractor.
///
/// Implementations read the spilled file from disk and may block, the
/// coordinator wraps calls in a worker thread and a timeout.
pub trait WordBackend: Send + Sync {
    fn extract_text(&self, spill_path: &Path, file_name: &str) -> Result<String, ExtractionError>;
}

/// External PDF text extractor. Same contract as [`WordBackend`].
pub trait PdfBackend: Send + Sync {
    fn extract_text(&self, spill_path: &Path, file_name: &str) -> Result<String, ExtractionError>;
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
