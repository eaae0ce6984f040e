//! Activity event records.
//!
//! Immutable entries describing user- or system-initiated events. The
//! `document` field is a name-only back-reference: removing a document
//! does not touch activities that mention it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ═══════════════════════════════════════════════════════════
// Kind enum
// ═══════════════════════════════════════════════════════════

/// What kind of event an activity describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Upload,
    Query,
    Search,
    Processing,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Query => "query",
            Self::Search => "search",
            Self::Processing => "processing",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "upload" => Some(Self::Upload),
            "query" => Some(Self::Query),
            "search" => Some(Self::Search),
            "processing" => Some(Self::Processing),
            _ => None,
        }
    }

    pub fn all() -> &'static [ActivityKind] {
        &[Self::Upload, Self::Query, Self::Search, Self::Processing]
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════
// Activity record
// ═══════════════════════════════════════════════════════════

/// One immutable log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub user: String,
    /// Free-text description of what happened.
    pub action: String,
    /// Name of the document involved, not an ownership link.
    pub document: String,
    pub time: String,
}

/// Input for appending an activity.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub kind: ActivityKind,
    pub user: String,
    pub action: String,
    pub document: String,
}

impl Activity {
    /// Stamp an input with a fresh id and the current time.
    pub fn record(input: NewActivity) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: input.kind,
            user: input.user,
            action: input.action,
            document: input.document,
            time: super::now_timestamp(),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
