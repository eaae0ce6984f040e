//! File classification.
//!
//! An ordered table of (predicate, class) pairs, walked top to bottom
//! with first match winning. Text outranks Word outranks PDF outranks
//! Image, anything unmatched lands on the generic catch-all.

use super::types::UploadedFile;

// ═══════════════════════════════════════════════════════════
// File classes
// ═══════════════════════════════════════════════════════════

/// Which extraction strategy a file is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileClass {
    Text,
    Word,
    Pdf,
    Image,
    Generic,
}

impl FileClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Word => "word",
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Generic => "generic",
        }
    }

    /// True for classes that degrade to synthesized fallback content
    /// when their backend fails.
    pub fn has_fallback(&self) -> bool {
        matches!(self, Self::Word | Self::Pdf)
    }
}

impl std::fmt::Display for FileClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════
// Classification table
// ═══════════════════════════════════════════════════════════

/// Predicates take the resolved MIME type and the lowercased file name.
type Predicate = fn(&str, &str) -> bool;

/// Walked in order, first match wins. [`FileClass::Generic`] is the
/// implicit last row.
const CLASSIFICATION_TABLE: &[(Predicate, FileClass)] = &[
    (is_text, FileClass::Text),
    (is_word, FileClass::Word),
    (is_pdf, FileClass::Pdf),
    (is_image, FileClass::Image),
];

fn is_text(mime: &str, name: &str) -> bool {
    mime.starts_with("text/") || name.ends_with(".txt") || name.ends_with(".md")
}

fn is_word(_mime: &str, name: &str) -> bool {
    name.ends_with(".doc") || name.ends_with(".docx")
}

fn is_pdf(mime: &str, name: &str) -> bool {
    mime == "application/pdf" || name.ends_with(".pdf")
}

fn is_image(mime: &str, _name: &str) -> bool {
    mime.starts_with("image/")
}

/// Classify a file against the table.
pub fn classify(file: &UploadedFile) -> FileClass {
    let mime = resolve_mime(&file.declared_mime, &file.name);
    let name = file.name.to_lowercase();
    for (predicate, class) in CLASSIFICATION_TABLE {
        if predicate(&mime, &name) {
            return *class;
        }
    }
    FileClass::Generic
}

/// Resolve the MIME type classification runs against.
///
/// The declared type wins when present. An empty declaration falls back
/// to an extension guess, then to the binary catch-all.
pub fn resolve_mime(declared: &str, file_name: &str) -> String {
    if !declared.is_empty() {
        return declared.to_lowercase();
    }
    mime_guess::from_path(file_name)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
