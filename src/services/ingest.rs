//! Ingestion: document record creation and job-start dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::clients::MessageQueue;
use crate::models::{DocumentRecord, JobStartMessage};
use crate::repository::DocumentRepository;

/// Handles the storage ingestion event for a newly uploaded object.
pub struct IngestService {
    documents: Arc<dyn DocumentRepository>,
    queue: Arc<dyn MessageQueue>,
}

impl IngestService {
    pub fn new(documents: Arc<dyn DocumentRepository>, queue: Arc<dyn MessageQueue>) -> Self {
        Self { documents, queue }
    }

    /// Create the document record (IN_PROGRESS) and enqueue the job-start
    /// message. Returns the generated document id.
    ///
    /// A record-store failure is fatal: nothing else marks the object as
    /// seen, so the error propagates instead of being swallowed.
    pub async fn ingest(
        &self,
        bucket_name: &str,
        object_name: &str,
        department: Option<String>,
    ) -> Result<String> {
        let document_id = uuid::Uuid::new_v4().to_string();

        self.documents
            .create(DocumentRecord::new(
                document_id.clone(),
                bucket_name.to_string(),
                object_name.to_string(),
                department,
            ))
            .await
            .context("failed to create document record")?;
        tracing::info!(document_id = %document_id, object = %object_name, "created document");

        let message = JobStartMessage {
            bucket_name: bucket_name.to_string(),
            object_name: object_name.to_string(),
            document_id: document_id.clone(),
        };
        let message_id = self
            .queue
            .send(&serde_json::to_string(&message)?)
            .await
            .context("failed to enqueue job-start message")?;
        tracing::info!(document_id = %document_id, message_id = %message_id, "queued analysis job");

        Ok(document_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MemoryQueue;
    use crate::models::DocumentStatus;
    use crate::repository::MemoryDocumentRepository;

    #[tokio::test]
    async fn test_ingest_creates_record_and_message() {
        let documents = Arc::new(MemoryDocumentRepository::new());
        let queue = Arc::new(MemoryQueue::new());
        let service = IngestService::new(documents.clone(), queue.clone());

        let document_id = service
            .ingest("uploads", "report.pdf", Some("hr".to_string()))
            .await
            .unwrap();

        let record = documents.get(&document_id).await.unwrap().unwrap();
        assert_eq!(record.document_status, DocumentStatus::InProgress);
        assert_eq!(record.department.as_deref(), Some("hr"));

        let message = queue.receive().await.unwrap().unwrap();
        let parsed = JobStartMessage::parse(&message.body).unwrap();
        assert_eq!(parsed.document_id, document_id);
        assert_eq!(parsed.bucket_name, "uploads");
    }
}
