//! Shared mutable state: document records, activity log, persisted blobs.
//!
//! The document store and activity log are the only shared mutable state
//! in the crate. Both serialize writes behind locks so concurrent readers
//! never observe a partially merged update.

pub mod activity_log;
pub mod blob;
pub mod documents;

pub use activity_log::{ActivityLog, ACTIVITY_LOG_CAPACITY};
pub use blob::{
    BlobStore, FileBlobStore, MemoryBlobStore, ACTIVITIES_BLOB, DOCUMENTS_BLOB, STATS_BLOB,
};
pub use documents::DocumentStore;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
