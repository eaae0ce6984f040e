//! Extraction coordinator.
//!
//! Drives one upload from classification to a finished report. Backends
//! run on a worker thread behind a timeout, and every exit path hands
//! back a fully populated `ExtractionReport`. A Word or PDF backend
//! failure degrades to synthesized fallback content, anything else that
//! goes wrong becomes a failed-but-well-formed report.

use std::sync::Arc;
use std::time::Duration;

use crate::config;
use crate::models::{self, Document, DocumentPatch, DocumentStatus, NewDocument, Priority};
use crate::store::StoreError;
use crate::tracker::Tracker;

use super::classify::{classify, resolve_mime, FileClass};
use super::spill::SpillFile;
use super::strategy::{self, ExtractedContent};
use super::types::{
    ContentType, ExtractionOutcome, ExtractionReport, PdfBackend, UploadedFile, WordBackend,
};
use super::ExtractionError;

pub struct ExtractionCoordinator {
    word_backend: Arc<dyn WordBackend>,
    pdf_backend: Arc<dyn PdfBackend>,
    backend_timeout: Duration,
}

impl ExtractionCoordinator {
    pub fn new(word_backend: Arc<dyn WordBackend>, pdf_backend: Arc<dyn PdfBackend>) -> Self {
        Self {
            word_backend,
            pdf_backend,
            backend_timeout: Duration::from_secs(config::BACKEND_TIMEOUT_SECS),
        }
    }

    /// Override the backend timeout, mainly for tests.
    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    /// Extract content from one file. Never fails, the report's
    /// `outcome` field says how it went.
    pub async fn extract(&self, file: &UploadedFile) -> ExtractionReport {
        self.extract_scored(file).await.0
    }

    /// Extract plus the confidence score for the produced content.
    pub(crate) async fn extract_scored(&self, file: &UploadedFile) -> (ExtractionReport, u8) {
        let class = classify(file);
        tracing::info!(
            file = %file.name,
            class = %class,
            size = file.size(),
            "Starting extraction"
        );

        let (content, outcome, note) = match self.run_strategy(class, file).await {
            Ok(content) => {
                let note = success_note(content.content_type).to_string();
                (content, ExtractionOutcome::Succeeded, note)
            }
            Err(e) if class.has_fallback() && e.is_degradable() => {
                tracing::warn!(file = %file.name, error = %e, "Backend failed, degrading");
                let tag = match class {
                    FileClass::Word => ContentType::WordFallback,
                    _ => ContentType::PdfFallback,
                };
                let content = strategy::fallback_content(tag, file, &e);
                let note = format!("Fallback content synthesized after backend failure: {e}");
                (content, ExtractionOutcome::Degraded, note)
            }
            Err(e) => {
                tracing::error!(file = %file.name, error = %e, "Extraction failed");
                let content = strategy::failure_content(file, &e);
                let note = format!("Extraction failed: {e}");
                (content, ExtractionOutcome::Failed, note)
            }
        };

        let report = ExtractionReport {
            file_name: file.name.clone(),
            file_type: resolve_mime(&file.declared_mime, &file.name),
            file_size: file.size(),
            content: content.text,
            content_type: content.content_type,
            extracted_at: models::now_timestamp(),
            note,
            outcome,
        };
        (report, content.confidence)
    }

    async fn run_strategy(
        &self,
        class: FileClass,
        file: &UploadedFile,
    ) -> Result<ExtractedContent, ExtractionError> {
        match class {
            FileClass::Text => strategy::extract_plain_text(file),
            FileClass::Word => {
                let backend = Arc::clone(&self.word_backend);
                let text = self
                    .spilled_backend_call(file, move |path, name| backend.extract_text(path, name))
                    .await?;
                Ok(ExtractedContent {
                    text,
                    content_type: ContentType::Word,
                    confidence: strategy::BACKEND_CONFIDENCE,
                })
            }
            FileClass::Pdf => {
                let backend = Arc::clone(&self.pdf_backend);
                let text = self
                    .spilled_backend_call(file, move |path, name| backend.extract_text(path, name))
                    .await?;
                Ok(ExtractedContent {
                    text,
                    content_type: ContentType::Pdf,
                    confidence: strategy::BACKEND_CONFIDENCE,
                })
            }
            FileClass::Image => Ok(strategy::image_placeholder(file)),
            FileClass::Generic => Ok(strategy::generic_placeholder(file)),
        }
    }

    /// Spill the bytes, run the backend on a worker thread behind the
    /// timeout, then release the spill whatever happened.
    async fn spilled_backend_call<F>(
        &self,
        file: &UploadedFile,
        call: F,
    ) -> Result<String, ExtractionError>
    where
        F: FnOnce(&std::path::Path, &str) -> Result<String, ExtractionError> + Send + 'static,
    {
        let spill = SpillFile::create(&file.bytes)?;
        let path = spill.path().to_path_buf();
        let name = file.name.clone();
        let secs = self.backend_timeout.as_secs();

        let result = match tokio::time::timeout(
            self.backend_timeout,
            tokio::task::spawn_blocking(move || call(&path, &name)),
        )
        .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(ExtractionError::Unexpected(join.to_string())),
            Err(_) => Err(ExtractionError::BackendTimeout(secs)),
        };

        spill.cleanup();
        result
    }

    /// Run the full upload flow against a tracker: create the record,
    /// extract, and merge the terminal patch.
    pub async fn ingest(
        &self,
        tracker: &Tracker,
        file: UploadedFile,
        priority: Priority,
        user: &str,
    ) -> Result<(Document, ExtractionReport), StoreError> {
        let created = tracker.create_document(
            NewDocument {
                name: file.name.clone(),
                size: file.size(),
                mime_type: resolve_mime(&file.declared_mime, &file.name),
                priority,
            },
            user,
        )?;

        tracker.documents().update(
            &created.id,
            DocumentPatch {
                status: Some(DocumentStatus::Processing),
                progress: Some(10),
                stage: Some("Extracting content".to_string()),
                ..Default::default()
            },
        )?;

        let (report, confidence) = self.extract_scored(&file).await;

        let patch = match report.outcome {
            ExtractionOutcome::Succeeded | ExtractionOutcome::Degraded => DocumentPatch {
                status: Some(DocumentStatus::Completed),
                progress: Some(100),
                stage: Some("Done".to_string()),
                confidence: Some(confidence),
                content: Some(report.content.clone()),
            },
            ExtractionOutcome::Failed => DocumentPatch {
                status: Some(DocumentStatus::Error),
                stage: Some("Failed".to_string()),
                content: Some(report.content.clone()),
                ..Default::default()
            },
        };
        tracker.documents().update(&created.id, patch)?;

        let document = tracker.documents().get(&created.id)?.unwrap_or(created);
        Ok((document, report))
    }
}

fn success_note(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Text => "Decoded as UTF-8 text",
        ContentType::Word => "Text extracted by the Word backend",
        ContentType::Pdf => "Text extracted by the PDF backend",
        ContentType::Image => "Image stored with a metadata placeholder",
        _ => "Unrecognized format, metadata placeholder stored",
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
