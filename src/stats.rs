//! Dashboard statistics.
//!
//! Stats are a pure projection of the current records and activities,
//! recomputed on every read. Nothing here is cached or persisted as a
//! source of truth, the stats blob is only a convenience snapshot.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{Activity, ActivityKind, Document, DocumentStatus};

/// Aggregate view over all records and activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Count of records in the `Completed` status.
    pub documents_processed: usize,
    /// Sum of all record sizes in bytes, whatever their status.
    pub storage_used_bytes: u64,
    /// Mean processing estimate over completed records, one time-unit
    /// per megabyte. Zero when nothing has completed.
    pub avg_processing_time: f64,
    /// Count of `Query` activities still retained in the log.
    pub queries_answered: usize,
}

/// Recompute the aggregate from scratch.
pub fn compute_stats(documents: &[Document], activities: &[Activity]) -> DashboardStats {
    let completed: Vec<&Document> = documents
        .iter()
        .filter(|d| d.status == DocumentStatus::Completed)
        .collect();

    let avg_processing_time = if completed.is_empty() {
        0.0
    } else {
        let total: f64 = completed
            .iter()
            .map(|d| d.size as f64 / config::BYTES_PER_MEGABYTE)
            .sum();
        total / completed.len() as f64
    };

    DashboardStats {
        documents_processed: completed.len(),
        storage_used_bytes: documents.iter().map(|d| d.size).sum(),
        avg_processing_time,
        queries_answered: activities
            .iter()
            .filter(|a| a.kind == ActivityKind::Query)
            .count(),
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
