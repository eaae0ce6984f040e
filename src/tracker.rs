//! Top-level application state.
//!
//! One `Tracker` owns the document store, the activity log, and the
//! blob store they persist through. There is no process-global
//! instance, callers construct a tracker at startup and tear it down
//! by dropping it.

use std::sync::Arc;

use uuid::Uuid;

use crate::config;
use crate::models::{Activity, ActivityKind, Document, DocumentPatch, DocumentStatus, NewActivity, NewDocument, Priority};
use crate::stats::{compute_stats, DashboardStats};
use crate::store::{
    ActivityLog, BlobStore, DocumentStore, FileBlobStore, MemoryBlobStore, StoreError,
    ACTIVITIES_BLOB, DOCUMENTS_BLOB, STATS_BLOB,
};

pub struct Tracker {
    documents: DocumentStore,
    activities: ActivityLog,
    blobs: Arc<dyn BlobStore>,
}

impl Tracker {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            documents: DocumentStore::new(),
            activities: ActivityLog::new(),
            blobs,
        }
    }

    /// Tracker over in-memory blobs, for tests and ephemeral sessions.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBlobStore::new()))
    }

    /// Tracker persisting under the default store directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let blobs = FileBlobStore::new(config::store_dir())?;
        Ok(Self::new(Arc::new(blobs)))
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn activities(&self) -> &ActivityLog {
        &self.activities
    }

    /// Create a record and log the matching upload activity.
    pub fn create_document(
        &self,
        input: NewDocument,
        user: &str,
    ) -> Result<Document, StoreError> {
        let name = input.name.clone();
        let document = self.documents.create(input)?;
        self.activities.append(NewActivity {
            kind: ActivityKind::Upload,
            user: user.to_string(),
            action: format!("Uploaded {name}"),
            document: name,
        })?;
        Ok(document)
    }

    pub fn log_activity(&self, input: NewActivity) -> Result<Activity, StoreError> {
        self.activities.append(input)
    }

    /// Remove a record. Activities that name it stay in the log, the
    /// back-reference is by name only and is allowed to dangle.
    pub fn remove_document(&self, id: &Uuid) -> Result<(), StoreError> {
        self.documents.remove(id)
    }

    /// Recompute the dashboard aggregate from current state.
    pub fn stats(&self) -> Result<DashboardStats, StoreError> {
        Ok(compute_stats(
            &self.documents.list()?,
            &self.activities.list()?,
        ))
    }

    /// Persist records, activities, and a stats snapshot as three
    /// keyed blobs.
    pub fn save(&self) -> Result<(), StoreError> {
        let documents = self.documents.list()?;
        let activities = self.activities.list()?;
        let stats = compute_stats(&documents, &activities);

        self.blobs.save(DOCUMENTS_BLOB, &serde_json::to_string(&documents)?)?;
        self.blobs.save(ACTIVITIES_BLOB, &serde_json::to_string(&activities)?)?;
        self.blobs.save(STATS_BLOB, &serde_json::to_string(&stats)?)?;
        tracing::debug!(
            documents = documents.len(),
            activities = activities.len(),
            "State persisted"
        );
        Ok(())
    }

    /// Hydrate records and activities from the blobs. Missing blobs
    /// leave the matching store untouched. The stats blob is only a
    /// snapshot and is never read back.
    pub fn load(&self) -> Result<(), StoreError> {
        if let Some(json) = self.blobs.load(DOCUMENTS_BLOB)? {
            let documents: Vec<Document> = serde_json::from_str(&json)?;
            tracing::info!(count = documents.len(), "Loaded document records");
            self.documents.replace(documents)?;
        }
        if let Some(json) = self.blobs.load(ACTIVITIES_BLOB)? {
            let activities: Vec<Activity> = serde_json::from_str(&json)?;
            tracing::info!(count = activities.len(), "Loaded activity log");
            self.activities.replace(activities)?;
        }
        Ok(())
    }

    /// Drop all state, in memory and persisted.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.documents.replace(Vec::new())?;
        self.activities.replace(Vec::new())?;
        self.blobs.clear(DOCUMENTS_BLOB)?;
        self.blobs.clear(ACTIVITIES_BLOB)?;
        self.blobs.clear(STATS_BLOB)?;
        Ok(())
    }

    /// Populate demo content on first run. Does nothing unless both
    /// stores are empty, returns whether seeding happened.
    pub fn seed_sample_data(&self) -> Result<bool, StoreError> {
        if !self.documents.is_empty()? || !self.activities.is_empty()? {
            return Ok(false);
        }

        let report = self.create_document(
            NewDocument {
                name: "Quarterly Report.pdf".to_string(),
                size: 2_516_582,
                mime_type: "application/pdf".to_string(),
                priority: Priority::High,
            },
            "demo",
        )?;
        self.documents.update(
            &report.id,
            DocumentPatch {
                status: Some(DocumentStatus::Completed),
                progress: Some(100),
                confidence: Some(94),
                content: Some(
                    "Q3 revenue grew 12% quarter over quarter, driven by the enterprise tier. \
                     Operating costs held flat."
                        .to_string(),
                ),
                ..Default::default()
            },
        )?;

        let notes = self.create_document(
            NewDocument {
                name: "Meeting Notes.txt".to_string(),
                size: 4_096,
                mime_type: "text/plain".to_string(),
                priority: Priority::Normal,
            },
            "demo",
        )?;
        self.documents.update(
            &notes.id,
            DocumentPatch {
                status: Some(DocumentStatus::Completed),
                progress: Some(100),
                confidence: Some(99),
                content: Some(
                    "Action items: finalize the onboarding flow, schedule the security review, \
                     follow up on the vendor contract."
                        .to_string(),
                ),
                ..Default::default()
            },
        )?;

        let roadmap = self.create_document(
            NewDocument {
                name: "Product Roadmap.docx".to_string(),
                size: 1_258_291,
                mime_type:
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                        .to_string(),
                priority: Priority::Normal,
            },
            "demo",
        )?;
        self.documents.update(
            &roadmap.id,
            DocumentPatch {
                status: Some(DocumentStatus::Completed),
                progress: Some(100),
                confidence: Some(91),
                content: Some(
                    "H1 focus: search quality and mobile upload. H2 focus: workspace sharing."
                        .to_string(),
                ),
                ..Default::default()
            },
        )?;

        self.activities.append(NewActivity {
            kind: ActivityKind::Query,
            user: "demo".to_string(),
            action: "Asked about quarterly revenue".to_string(),
            document: "Quarterly Report.pdf".to_string(),
        })?;
        self.activities.append(NewActivity {
            kind: ActivityKind::Search,
            user: "demo".to_string(),
            action: "Searched for roadmap".to_string(),
            document: "Product Roadmap.docx".to_string(),
        })?;

        tracing::info!("Seeded sample documents and activities");
        Ok(true)
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
