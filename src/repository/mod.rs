//! Record persistence for documents and their derived outputs.
//!
//! Repositories are trait seams so the pipeline can run against in-memory
//! fakes in tests and a JSON-file store in the CLI. Both stores support
//! per-key independent writes only; there are no cross-document
//! transactions.

mod local;
mod memory;

pub use local::{LocalDocumentRepository, LocalOutputRepository};
pub use memory::{MemoryDocumentRepository, MemoryOutputRepository};

use async_trait::async_trait;

use crate::models::{DocumentRecord, OutputRecord};

/// Error surfaced by a repository operation.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("document {0} not found")]
    NotFound(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Persist a freshly ingested record. A failure here is fatal for the
    /// ingestion: nothing else marks the object processed.
    async fn create(&self, record: DocumentRecord) -> Result<(), RepositoryError>;

    async fn get(&self, document_id: &str) -> Result<Option<DocumentRecord>, RepositoryError>;

    async fn list(&self) -> Result<Vec<DocumentRecord>, RepositoryError>;

    /// Transition a record to `Completed` with a fresh timestamp.
    ///
    /// Idempotent by overwrite: a duplicate call refreshes the timestamp
    /// rather than failing.
    async fn mark_completed(&self, document_id: &str) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait OutputRepository: Send + Sync {
    /// Register a derived artifact, write-if-absent.
    ///
    /// Returns `false` when a record with the same (`document_id`,
    /// `output_type`) already exists; the existing record is kept.
    async fn create(&self, record: OutputRecord) -> Result<bool, RepositoryError>;

    /// All outputs registered for one document.
    async fn list_for_document(
        &self,
        document_id: &str,
    ) -> Result<Vec<OutputRecord>, RepositoryError>;
}
