//! Job submission: turns a job-start message into a running analysis job.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::clients::AnalysisClient;
use crate::models::JobStartMessage;

/// Consumes job-start messages and starts the external analysis job.
pub struct SubmitService {
    analysis: Arc<dyn AnalysisClient>,
}

impl SubmitService {
    pub fn new(analysis: Arc<dyn AnalysisClient>) -> Self {
        Self { analysis }
    }

    /// Parse the message and start the job.
    ///
    /// The document id is used as both the idempotency token and the job
    /// tag, so a redelivered message restarts nothing and the completion
    /// notification correlates back to the document.
    pub async fn process(&self, body: &str) -> Result<(String, JobStartMessage)> {
        let message = JobStartMessage::parse(body)?;
        let job_id = self
            .analysis
            .start_analysis(
                &message.bucket_name,
                &message.object_name,
                &message.document_id,
                &message.document_id,
            )
            .await
            .context("failed to start analysis job")?;
        tracing::info!(
            document_id = %message.document_id,
            job_id = %job_id,
            "analysis job started"
        );
        Ok((job_id, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::FixtureAnalysisClient;

    #[tokio::test]
    async fn test_redelivered_message_reuses_job() {
        let client = Arc::new(FixtureAnalysisClient::new(vec![], 10));
        let service = SubmitService::new(client.clone());
        let body = r#"{"bucketName":"uploads","objectName":"doc.pdf","documentId":"d-1"}"#;

        let (job_a, _) = service.process(body).await.unwrap();
        let (job_b, _) = service.process(body).await.unwrap();
        assert_eq!(job_a, job_b);
        assert_eq!(client.job_tag(&job_a).as_deref(), Some("d-1"));
    }

    #[tokio::test]
    async fn test_malformed_message_rejected() {
        let client = Arc::new(FixtureAnalysisClient::new(vec![], 10));
        let service = SubmitService::new(client);
        assert!(service.process("{\"documentId\":\"d-1\"}").await.is_err());
    }
}
