//! Document-analysis service interface.
//!
//! The real service runs asynchronously: `start_analysis` registers a job
//! against the source object and completion is signaled out-of-band; results
//! are then pulled page by page with a continuation token.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use super::ClientError;
use crate::analysis::blocks::{Block, ResultsPage};

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Start an analysis job for a stored object.
    ///
    /// `client_request_token` makes the start idempotent; `job_tag` is echoed
    /// back in the completion notification for correlation. Both carry the
    /// document id.
    async fn start_analysis(
        &self,
        bucket_name: &str,
        object_name: &str,
        client_request_token: &str,
        job_tag: &str,
    ) -> Result<String, ClientError>;

    /// Fetch one page of results for a job.
    async fn get_results(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<ResultsPage, ClientError>;
}

#[derive(Default)]
struct FixtureState {
    /// client_request_token -> job id (idempotent start).
    jobs_by_token: HashMap<String, String>,
    /// job id -> (document id tag, started object name).
    jobs: HashMap<String, (String, String)>,
}

/// Analysis client that replays a canned block list in fixed-size pages.
///
/// Used by the CLI demo pipeline and by pagination tests. Continuation
/// tokens are block offsets into the fixture.
pub struct FixtureAnalysisClient {
    blocks: Vec<Block>,
    page_size: usize,
    state: Mutex<FixtureState>,
}

impl FixtureAnalysisClient {
    pub fn new(blocks: Vec<Block>, page_size: usize) -> Self {
        Self {
            blocks,
            page_size: page_size.max(1),
            state: Mutex::new(FixtureState::default()),
        }
    }

    /// Load fixture blocks from a JSON file.
    ///
    /// Accepts either a full results payload (`{"Blocks": [...]}`) or a bare
    /// block array.
    pub fn from_file(path: &Path, page_size: usize) -> Result<Self, ClientError> {
        let raw = std::fs::read_to_string(path)?;
        let blocks = match serde_json::from_str::<ResultsPage>(&raw) {
            Ok(page) => page.blocks,
            Err(_) => serde_json::from_str::<Vec<Block>>(&raw)?,
        };
        Ok(Self::new(blocks, page_size))
    }

    /// The tag supplied when the job was started, if the job exists.
    pub fn job_tag(&self, job_id: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.jobs.get(job_id).map(|(tag, _)| tag.clone())
    }
}

#[async_trait]
impl AnalysisClient for FixtureAnalysisClient {
    async fn start_analysis(
        &self,
        _bucket_name: &str,
        object_name: &str,
        client_request_token: &str,
        job_tag: &str,
    ) -> Result<String, ClientError> {
        let mut state = self.state.lock().unwrap();
        if let Some(job_id) = state.jobs_by_token.get(client_request_token) {
            return Ok(job_id.clone());
        }
        let job_id = uuid::Uuid::new_v4().to_string();
        state
            .jobs_by_token
            .insert(client_request_token.to_string(), job_id.clone());
        state.jobs.insert(
            job_id.clone(),
            (job_tag.to_string(), object_name.to_string()),
        );
        tracing::info!(job_id = %job_id, object = %object_name, "started analysis job");
        Ok(job_id)
    }

    async fn get_results(
        &self,
        job_id: &str,
        next_token: Option<&str>,
    ) -> Result<ResultsPage, ClientError> {
        {
            let state = self.state.lock().unwrap();
            if !state.jobs.contains_key(job_id) {
                return Err(ClientError::NotFound(format!("analysis job {job_id}")));
            }
        }

        let offset: usize = match next_token {
            Some(token) => token
                .parse()
                .map_err(|_| ClientError::Backend(format!("bad continuation token: {token}")))?,
            None => 0,
        };

        let end = (offset + self.page_size).min(self.blocks.len());
        let blocks = self.blocks[offset..end].to_vec();
        let next_token = (end < self.blocks.len()).then(|| end.to_string());

        Ok(ResultsPage {
            document_metadata: None,
            blocks,
            next_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::blocks::BlockType;

    fn line_block(id: &str) -> Block {
        Block {
            block_type: BlockType::Line,
            id: id.to_string(),
            text: Some(id.to_string()),
            entity_types: Vec::new(),
            relationships: Vec::new(),
            row_index: None,
            column_index: None,
            selection_status: None,
            page: None,
        }
    }

    #[tokio::test]
    async fn test_start_is_idempotent_per_token() {
        let client = FixtureAnalysisClient::new(vec![], 10);
        let a = client
            .start_analysis("b", "o", "doc-1", "doc-1")
            .await
            .unwrap();
        let b = client
            .start_analysis("b", "o", "doc-1", "doc-1")
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(client.job_tag(&a).as_deref(), Some("doc-1"));
    }

    #[tokio::test]
    async fn test_paged_results() {
        let blocks: Vec<Block> = (0..5).map(|i| line_block(&format!("l{i}"))).collect();
        let client = FixtureAnalysisClient::new(blocks, 2);
        let job = client
            .start_analysis("b", "o", "doc-1", "doc-1")
            .await
            .unwrap();

        let first = client.get_results(&job, None).await.unwrap();
        assert_eq!(first.blocks.len(), 2);
        let token = first.next_token.unwrap();

        let second = client.get_results(&job, Some(&token)).await.unwrap();
        assert_eq!(second.blocks.len(), 2);

        let third = client
            .get_results(&job, second.next_token.as_deref())
            .await
            .unwrap();
        assert_eq!(third.blocks.len(), 1);
        assert!(third.next_token.is_none());
    }

    #[tokio::test]
    async fn test_unknown_job_rejected() {
        let client = FixtureAnalysisClient::new(vec![], 10);
        assert!(client.get_results("missing", None).await.is_err());
    }
}
