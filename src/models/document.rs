//! Document lifecycle records.
//!
//! One `Document` per uploaded file, from the moment the upload starts
//! until the record is removed. Status transitions are applied through
//! `DocumentPatch` merges in the store layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

// ═══════════════════════════════════════════════════════════
// Status and priority enums
// ═══════════════════════════════════════════════════════════

/// Lifecycle status of a tracked document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Uploading,
    Processing,
    Completed,
    Error,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploading => "uploading",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "uploading" => Some(Self::Uploading),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn all() -> &'static [DocumentStatus] {
        &[Self::Uploading, Self::Processing, Self::Completed, Self::Error]
    }

    /// True once the lifecycle can no longer advance.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Advisory upload priority. Does not affect scheduling in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "normal" => Some(Self::Normal),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════
// Document record
// ═══════════════════════════════════════════════════════════

/// One tracked upload.
///
/// `id`, `name`, `size`, `mime_type`, and `upload_date` are fixed at
/// creation. `content` is set exactly once, when extraction concludes,
/// and only together with a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub status: DocumentStatus,
    /// 0-100, never moves backwards while the lifecycle is live.
    pub progress: u8,
    /// Human-readable current-step label, advisory only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Extraction-quality score 0-100, present only once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub upload_date: String,
    /// Advisory processing-time estimate, one time-unit per megabyte.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_secs: Option<u32>,
}

/// Input for creating a document record.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub priority: Priority,
}

/// Partial update merged into an existing record by the store.
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub status: Option<DocumentStatus>,
    pub progress: Option<u8>,
    pub stage: Option<String>,
    pub confidence: Option<u8>,
    pub content: Option<String>,
}

impl Document {
    /// Build a fresh record: new id, `Uploading`, progress 0.
    pub fn create(input: NewDocument) -> Self {
        let estimated_secs = estimate_processing_secs(input.size);
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            size: input.size,
            mime_type: input.mime_type,
            status: DocumentStatus::Uploading,
            progress: 0,
            stage: None,
            confidence: None,
            priority: input.priority,
            content: None,
            upload_date: super::now_timestamp(),
            estimated_secs: Some(estimated_secs),
        }
    }
}

/// One time-unit per megabyte of file size, rounded up.
fn estimate_processing_secs(size: u64) -> u32 {
    (size as f64 / config::BYTES_PER_MEGABYTE).ceil().max(1.0) as u32
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, size: u64) -> NewDocument {
        NewDocument {
            name: name.to_string(),
            size,
            mime_type: "text/plain".to_string(),
            priority: Priority::Normal,
        }
    }

    #[test]
    fn create_starts_uploading_at_zero() {
        let doc = Document::create(input("notes.txt", 20));
        assert_eq!(doc.status, DocumentStatus::Uploading);
        assert_eq!(doc.progress, 0);
        assert!(doc.content.is_none());
        assert!(doc.confidence.is_none());
        assert!(doc.stage.is_none());
    }

    #[test]
    fn create_assigns_distinct_ids() {
        let a = Document::create(input("a.txt", 1));
        let b = Document::create(input("b.txt", 1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn estimate_rounds_up_per_megabyte() {
        assert_eq!(estimate_processing_secs(20), 1);
        assert_eq!(estimate_processing_secs(1_048_576), 1);
        assert_eq!(estimate_processing_secs(1_048_577), 2);
        assert_eq!(estimate_processing_secs(5 * 1_048_576), 5);
    }

    #[test]
    fn status_roundtrip() {
        for status in DocumentStatus::all() {
            let s = status.as_str();
            assert_eq!(DocumentStatus::from_str(s), Some(*status), "Roundtrip failed for {s}");
        }
        assert_eq!(DocumentStatus::from_str("unknown"), None);
    }

    #[test]
    fn status_terminal_variants() {
        assert!(DocumentStatus::Completed.is_terminal());
        assert!(DocumentStatus::Error.is_terminal());
        assert!(!DocumentStatus::Uploading.is_terminal());
        assert!(!DocumentStatus::Processing.is_terminal());
    }

    #[test]
    fn priority_defaults_to_normal() {
        assert_eq!(Priority::default(), Priority::Normal);
    }

    #[test]
    fn priority_roundtrip() {
        for p in [Priority::High, Priority::Normal, Priority::Low] {
            assert_eq!(Priority::from_str(p.as_str()), Some(p));
        }
        assert_eq!(Priority::from_str(""), None);
    }

    #[test]
    fn status_serde_uses_snake_case() {
        let json = serde_json::to_string(&DocumentStatus::Uploading).unwrap();
        assert_eq!(json, "\"uploading\"");
        let parsed: DocumentStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, DocumentStatus::Completed);
    }

    #[test]
    fn document_serde_skips_unset_options() {
        let doc = Document::create(input("report.pdf", 2048));
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("\"content\""));
        assert!(!json.contains("\"confidence\""));
        assert!(!json.contains("\"stage\""));
        assert!(json.contains("\"report.pdf\""));
    }

    #[test]
    fn document_serde_roundtrip() {
        let mut doc = Document::create(input("scan.pdf", 4096));
        doc.status = DocumentStatus::Completed;
        doc.progress = 100;
        doc.confidence = Some(92);
        doc.content = Some("extracted".to_string());
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, doc.id);
        assert_eq!(parsed.status, DocumentStatus::Completed);
        assert_eq!(parsed.content.as_deref(), Some("extracted"));
    }
}
