//! Search projection: build and upsert the per-document search entry.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::clients::{SearchHit, SearchIndex};
use crate::repository::DocumentRepository;

/// The document shape stored in the search index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    pub document_id: String,
    pub bucket_name: String,
    pub document_name: String,
    /// Flat extracted text, page then line order.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Folded entity mapping; absent when no entities were detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<BTreeMap<String, String>>,
}

/// Upserts search documents under a fixed index name.
pub struct IndexService {
    search: Arc<dyn SearchIndex>,
    documents: Arc<dyn DocumentRepository>,
    index_name: String,
}

impl IndexService {
    pub fn new(
        search: Arc<dyn SearchIndex>,
        documents: Arc<dyn DocumentRepository>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            search,
            documents,
            index_name: index_name.into(),
        }
    }

    /// Index the final enriched document.
    ///
    /// Runs after entity annotation and reads the document record back for
    /// its `department` tag, so it must be the terminal enrichment step.
    pub async fn index_document(
        &self,
        document_id: &str,
        bucket_name: &str,
        document_name: &str,
        content: String,
        entities: Option<BTreeMap<String, String>>,
    ) -> Result<()> {
        let department = self
            .documents
            .get(document_id)
            .await?
            .and_then(|record| record.department);

        let document = SearchDocument {
            document_id: document_id.to_string(),
            bucket_name: bucket_name.to_string(),
            document_name: document_name.to_string(),
            content,
            department,
            entities,
        };
        self.search
            .upsert(&self.index_name, document_id, &serde_json::to_value(&document)?)
            .await?;
        tracing::info!(document_id, index = %self.index_name, "indexed document");
        Ok(())
    }

    /// Keyword search over the index.
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchHit>> {
        Ok(self.search.search(&self.index_name, keyword).await?)
    }
}
