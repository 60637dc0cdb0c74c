//! JSON-file repositories backing the CLI's persistent state.
//!
//! Each repository owns one JSON file under the data directory and does
//! whole-file read-modify-write behind a mutex. Fine for a single local
//! process; a deployment would put a real record store behind the same
//! traits.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use super::{DocumentRepository, OutputRepository, RepositoryError};
use crate::models::{DocumentRecord, OutputRecord};

fn load_file<T: DeserializeOwned>(path: &PathBuf) -> Result<Vec<T>, RepositoryError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&raw)?)
}

fn store_file<T: Serialize>(path: &PathBuf, records: &[T]) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_vec_pretty(records)?)?;
    Ok(())
}

pub struct LocalDocumentRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalDocumentRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl DocumentRepository for LocalDocumentRepository {
    async fn create(&self, record: DocumentRecord) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut records: Vec<DocumentRecord> = load_file(&self.path)?;
        records.push(record);
        store_file(&self.path, &records)
    }

    async fn get(&self, document_id: &str) -> Result<Option<DocumentRecord>, RepositoryError> {
        let _guard = self.lock.lock().await;
        let records: Vec<DocumentRecord> = load_file(&self.path)?;
        Ok(records.into_iter().find(|r| r.document_id == document_id))
    }

    async fn list(&self) -> Result<Vec<DocumentRecord>, RepositoryError> {
        let _guard = self.lock.lock().await;
        load_file(&self.path)
    }

    async fn mark_completed(&self, document_id: &str) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut records: Vec<DocumentRecord> = load_file(&self.path)?;
        let record = records
            .iter_mut()
            .find(|r| r.document_id == document_id)
            .ok_or_else(|| RepositoryError::NotFound(document_id.to_string()))?;
        record.mark_completed();
        store_file(&self.path, &records)
    }
}

pub struct LocalOutputRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalOutputRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl OutputRepository for LocalOutputRepository {
    async fn create(&self, record: OutputRecord) -> Result<bool, RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut records: Vec<OutputRecord> = load_file(&self.path)?;
        let exists = records.iter().any(|r| {
            r.document_id == record.document_id && r.output_type == record.output_type
        });
        if exists {
            return Ok(false);
        }
        records.push(record);
        store_file(&self.path, &records)?;
        Ok(true)
    }

    async fn list_for_document(
        &self,
        document_id: &str,
    ) -> Result<Vec<OutputRecord>, RepositoryError> {
        let _guard = self.lock.lock().await;
        let records: Vec<OutputRecord> = load_file(&self.path)?;
        Ok(records
            .into_iter()
            .filter(|r| r.document_id == document_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentStatus, OutputType};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_documents_persist_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("documents.json");

        let writer = LocalDocumentRepository::new(&path);
        writer
            .create(DocumentRecord::new(
                "d-1".to_string(),
                "uploads".to_string(),
                "doc.pdf".to_string(),
                Some("hr".to_string()),
            ))
            .await
            .unwrap();
        writer.mark_completed("d-1").await.unwrap();

        let reader = LocalDocumentRepository::new(&path);
        let record = reader.get("d-1").await.unwrap().unwrap();
        assert_eq!(record.document_status, DocumentStatus::Completed);
        assert_eq!(record.department.as_deref(), Some("hr"));
    }

    #[tokio::test]
    async fn test_output_dedup_survives_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("outputs.json");
        let output = OutputRecord::new(
            "d-1".to_string(),
            OutputType::RawResponse,
            "d-1/textract-response.json".to_string(),
        );

        let writer = LocalOutputRepository::new(&path);
        assert!(writer.create(output.clone()).await.unwrap());

        let reopened = LocalOutputRepository::new(&path);
        assert!(!reopened.create(output).await.unwrap());
        assert_eq!(reopened.list_for_document("d-1").await.unwrap().len(), 1);
    }
}
