//! Per-class content production.
//!
//! Plain text is decoded in-process, image and generic files get a
//! descriptive placeholder, and Word/PDF fallback bodies are synthesized
//! here when a backend fails. Every producer returns the content string
//! together with the wire tag and a confidence score.

use super::types::{ContentType, UploadedFile};
use super::ExtractionError;

/// Confidence for verbatim UTF-8 decoding.
pub const PLAIN_TEXT_CONFIDENCE: u8 = 99;
/// Confidence for content produced by an external backend.
pub const BACKEND_CONFIDENCE: u8 = 90;
/// Confidence for synthesized fallback bodies.
pub const FALLBACK_CONFIDENCE: u8 = 40;
/// Confidence for metadata-only placeholders.
pub const PLACEHOLDER_CONFIDENCE: u8 = 30;

/// Content plus its wire tag and confidence.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    pub text: String,
    pub content_type: ContentType,
    pub confidence: u8,
}

/// Decode the upload as UTF-8, byte for byte.
pub fn extract_plain_text(file: &UploadedFile) -> Result<ExtractedContent, ExtractionError> {
    let text = std::str::from_utf8(&file.bytes)
        .map_err(|e| ExtractionError::Encoding(e.to_string()))?
        .to_string();
    Ok(ExtractedContent {
        text,
        content_type: ContentType::Text,
        confidence: PLAIN_TEXT_CONFIDENCE,
    })
}

/// Metadata placeholder for image uploads.
pub fn image_placeholder(file: &UploadedFile) -> ExtractedContent {
    ExtractedContent {
        text: format!(
            "Image file: {}\nType: {}\nSize: {} bytes\n\nVisual content is stored but not transcribed.",
            file.name,
            file.declared_mime,
            file.size()
        ),
        content_type: ContentType::Image,
        confidence: PLACEHOLDER_CONFIDENCE,
    }
}

/// Metadata placeholder for files no other strategy claims.
pub fn generic_placeholder(file: &UploadedFile) -> ExtractedContent {
    ExtractedContent {
        text: format!(
            "File: {}\nType: {}\nSize: {} bytes\n\nNo text extraction is available for this format.",
            file.name,
            file.declared_mime,
            file.size()
        ),
        content_type: ContentType::Other,
        confidence: PLACEHOLDER_CONFIDENCE,
    }
}

/// Synthesized stand-in body after a Word or PDF backend failure.
///
/// Non-empty, names the file, and carries the matching `-fallback` tag.
pub fn fallback_content(
    content_type: ContentType,
    file: &UploadedFile,
    error: &ExtractionError,
) -> ExtractedContent {
    debug_assert!(content_type.is_fallback());
    let format_label = match content_type {
        ContentType::WordFallback => "Word document",
        _ => "PDF document",
    };
    ExtractedContent {
        text: format!(
            "{format_label}: {}\nSize: {} bytes\n\nText extraction did not complete ({error}). \
             The original file is retained and can be reprocessed.",
            file.name,
            file.size()
        ),
        content_type,
        confidence: FALLBACK_CONFIDENCE,
    }
}

/// Failure body for extractions that cannot even degrade.
pub fn failure_content(file: &UploadedFile, error: &ExtractionError) -> ExtractedContent {
    ExtractedContent {
        text: format!("Extraction failed for {}: {error}", file.name),
        content_type: ContentType::Error,
        confidence: 0,
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
