//! In-memory repositories: the test fakes behind the repository traits.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DocumentRepository, OutputRepository, RepositoryError};
use crate::models::{DocumentRecord, OutputRecord};

#[derive(Default)]
pub struct MemoryDocumentRepository {
    records: RwLock<Vec<DocumentRecord>>,
}

impl MemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for MemoryDocumentRepository {
    async fn create(&self, record: DocumentRecord) -> Result<(), RepositoryError> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn get(&self, document_id: &str) -> Result<Option<DocumentRecord>, RepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.document_id == document_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<DocumentRecord>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn mark_completed(&self, document_id: &str) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.document_id == document_id)
            .ok_or_else(|| RepositoryError::NotFound(document_id.to_string()))?;
        record.mark_completed();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryOutputRepository {
    records: RwLock<Vec<OutputRecord>>,
}

impl MemoryOutputRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OutputRepository for MemoryOutputRepository {
    async fn create(&self, record: OutputRecord) -> Result<bool, RepositoryError> {
        let mut records = self.records.write().await;
        let exists = records.iter().any(|r| {
            r.document_id == record.document_id && r.output_type == record.output_type
        });
        if exists {
            return Ok(false);
        }
        records.push(record);
        Ok(true)
    }

    async fn list_for_document(
        &self,
        document_id: &str,
    ) -> Result<Vec<OutputRecord>, RepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.document_id == document_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputType;

    fn record(id: &str) -> DocumentRecord {
        DocumentRecord::new(
            id.to_string(),
            "uploads".to_string(),
            "doc.pdf".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_create_get_list() {
        let repo = MemoryDocumentRepository::new();
        repo.create(record("d-1")).await.unwrap();
        repo.create(record("d-2")).await.unwrap();
        assert!(repo.get("d-1").await.unwrap().is_some());
        assert!(repo.get("d-9").await.unwrap().is_none());
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mark_completed_missing_errors() {
        let repo = MemoryDocumentRepository::new();
        assert!(matches!(
            repo.mark_completed("ghost").await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_output_write_if_absent() {
        let repo = MemoryOutputRepository::new();
        let output = OutputRecord::new(
            "d-1".to_string(),
            OutputType::RawResponse,
            "d-1/textract-response.json".to_string(),
        );
        assert!(repo.create(output.clone()).await.unwrap());
        assert!(!repo.create(output).await.unwrap());
        assert_eq!(repo.list_for_document("d-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_outputs_partitioned_by_document() {
        let repo = MemoryOutputRepository::new();
        repo.create(OutputRecord::new(
            "d-1".to_string(),
            OutputType::Form { page: 1 },
            "d-1/form-1.csv".to_string(),
        ))
        .await
        .unwrap();
        repo.create(OutputRecord::new(
            "d-2".to_string(),
            OutputType::Form { page: 1 },
            "d-2/form-1.csv".to_string(),
        ))
        .await
        .unwrap();
        assert_eq!(repo.list_for_document("d-1").await.unwrap().len(), 1);
    }
}
