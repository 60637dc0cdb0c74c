//! Search index interface: document upsert and keyword lookup.
//!
//! Ranking and relevance tuning are out of scope; the bundled
//! implementations do naive case-insensitive matching over the indexed
//! `content` field and report per-document match counts.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::ClientError;

/// One search result, projected for display.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub document_id: String,
    pub document_name: String,
    pub bucket_name: String,
    /// Number of keyword occurrences in the document content.
    pub count: usize,
}

#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Insert or replace the document stored under `id`.
    async fn upsert(&self, index: &str, id: &str, document: &Value) -> Result<(), ClientError>;

    /// Keyword search over indexed content.
    async fn search(&self, index: &str, keyword: &str) -> Result<Vec<SearchHit>, ClientError>;
}

fn hit_for(id: &str, document: &Value, keyword: &str) -> Option<SearchHit> {
    let content = document.get("content")?.as_str()?;
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let count = content.to_lowercase().matches(&needle).count();
    if count == 0 {
        return None;
    }
    Some(SearchHit {
        document_id: id.to_string(),
        document_name: document
            .get("documentName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        bucket_name: document
            .get("bucketName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        count,
    })
}

/// In-memory index for tests.
#[derive(Default)]
pub struct MemorySearchIndex {
    indexes: Mutex<HashMap<String, HashMap<String, Value>>>,
}

impl MemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch an indexed document verbatim.
    pub fn get(&self, index: &str, id: &str) -> Option<Value> {
        self.indexes
            .lock()
            .unwrap()
            .get(index)
            .and_then(|docs| docs.get(id))
            .cloned()
    }
}

#[async_trait]
impl SearchIndex for MemorySearchIndex {
    async fn upsert(&self, index: &str, id: &str, document: &Value) -> Result<(), ClientError> {
        self.indexes
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default()
            .insert(id.to_string(), document.clone());
        Ok(())
    }

    async fn search(&self, index: &str, keyword: &str) -> Result<Vec<SearchHit>, ClientError> {
        let indexes = self.indexes.lock().unwrap();
        let Some(docs) = indexes.get(index) else {
            return Ok(Vec::new());
        };
        let mut hits: Vec<SearchHit> = docs
            .iter()
            .filter_map(|(id, doc)| hit_for(id, doc, keyword))
            .collect();
        hits.sort_by(|a, b| b.count.cmp(&a.count).then(a.document_id.cmp(&b.document_id)));
        Ok(hits)
    }
}

/// Filesystem index: one JSON file per document under `<root>/<index>/`.
pub struct LocalSearchIndex {
    root: PathBuf,
}

impl LocalSearchIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl SearchIndex for LocalSearchIndex {
    async fn upsert(&self, index: &str, id: &str, document: &Value) -> Result<(), ClientError> {
        let dir = self.root.join(index);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{id}.json"));
        std::fs::write(&path, serde_json::to_vec_pretty(document)?)?;
        tracing::debug!(index, id, "indexed document");
        Ok(())
    }

    async fn search(&self, index: &str, keyword: &str) -> Result<Vec<SearchHit>, ClientError> {
        let dir = self.root.join(index);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut hits = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let document: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
            if let Some(hit) = hit_for(&id, &document, keyword) {
                hits.push(hit);
            }
        }
        hits.sort_by(|a, b| b.count.cmp(&a.count).then(a.document_id.cmp(&b.document_id)));
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn doc(name: &str, content: &str) -> Value {
        json!({
            "documentId": name,
            "documentName": format!("{name}.pdf"),
            "bucketName": "uploads",
            "content": content,
        })
    }

    #[tokio::test]
    async fn test_memory_search_counts_matches() {
        let index = MemorySearchIndex::new();
        index
            .upsert("docs", "a", &doc("a", "tax tax refund"))
            .await
            .unwrap();
        index.upsert("docs", "b", &doc("b", "tax form")).await.unwrap();
        index
            .upsert("docs", "c", &doc("c", "unrelated"))
            .await
            .unwrap();

        let hits = index.search("docs", "TAX").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].document_id, "a");
        assert_eq!(hits[0].count, 2);
        assert_eq!(hits[1].count, 1);
    }

    #[tokio::test]
    async fn test_memory_upsert_replaces() {
        let index = MemorySearchIndex::new();
        index.upsert("docs", "a", &doc("a", "old")).await.unwrap();
        index.upsert("docs", "a", &doc("a", "new")).await.unwrap();
        assert!(index.search("docs", "old").await.unwrap().is_empty());
        assert_eq!(index.search("docs", "new").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_local_round_trip() {
        let dir = tempdir().unwrap();
        let index = LocalSearchIndex::new(dir.path());
        index
            .upsert("docs", "a", &doc("a", "quarterly report"))
            .await
            .unwrap();
        let hits = index.search("docs", "report").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document_name, "a.pdf");
        assert_eq!(hits[0].bucket_name, "uploads");
    }

    #[tokio::test]
    async fn test_search_missing_index_is_empty() {
        let dir = tempdir().unwrap();
        let index = LocalSearchIndex::new(dir.path());
        assert!(index.search("docs", "x").await.unwrap().is_empty());
    }
}
