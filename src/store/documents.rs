//! Document record store.
//!
//! Durable mapping from document id to `Document`, insertion-ordered.
//! Owns all status transitions: callers describe changes as a
//! `DocumentPatch` and the store merges them atomically.

use std::sync::RwLock;

use uuid::Uuid;

use crate::models::{Document, DocumentPatch, DocumentStatus, NewDocument};

use super::StoreError;

/// In-memory record store behind a single `RwLock`.
///
/// Reads take the shared lock, merges take the exclusive lock, so a
/// reader can never observe a half-applied patch.
pub struct DocumentStore {
    records: RwLock<Vec<Document>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Create a fresh record and append it in insertion order.
    pub fn create(&self, input: NewDocument) -> Result<Document, StoreError> {
        let doc = Document::create(input);
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.push(doc.clone());
        tracing::debug!(document_id = %doc.id, name = %doc.name, "Document record created");
        Ok(doc)
    }

    /// Merge a patch into the record with this id.
    ///
    /// A missing id is a silent no-op. Callers must not rely on update
    /// for existence checking.
    pub fn update(&self, id: &Uuid, patch: DocumentPatch) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(doc) = records.iter_mut().find(|d| d.id == *id) {
            apply_patch(doc, patch);
        }
        Ok(())
    }

    /// Delete the record. Activities that reference it by name are left
    /// untouched.
    pub fn remove(&self, id: &Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.retain(|d| d.id != *id);
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<Document>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.iter().find(|d| d.id == *id).cloned())
    }

    /// All records in insertion order.
    pub fn list(&self) -> Result<Vec<Document>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.clone())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Swap in a full record set (blob hydration, clear).
    pub fn replace(&self, records: Vec<Document>) -> Result<(), StoreError> {
        let mut guard = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        *guard = records;
        Ok(())
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge semantics for a single record.
///
/// Progress never moves backwards while the lifecycle is live, and is
/// frozen at 100 once the record completes.
fn apply_patch(doc: &mut Document, patch: DocumentPatch) {
    if let Some(status) = patch.status {
        doc.status = status;
    }
    if let Some(progress) = patch.progress {
        doc.progress = doc.progress.max(progress.min(100));
    }
    if let Some(stage) = patch.stage {
        doc.stage = Some(stage);
    }
    if let Some(confidence) = patch.confidence {
        doc.confidence = Some(confidence);
    }
    if let Some(content) = patch.content {
        doc.content = Some(content);
    }
    if doc.status == DocumentStatus::Completed {
        doc.progress = 100;
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
