//! Domain records tracked by the store layer.

pub mod activity;
pub mod document;

pub use activity::{Activity, ActivityKind, NewActivity};
pub use document::{Document, DocumentPatch, DocumentStatus, NewDocument, Priority};

use chrono::Utc;

/// Current UTC time in the persisted wire format.
pub(crate) fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
