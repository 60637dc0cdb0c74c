//! Completion pipeline: the orchestrator behind the job-completion
//! notification.
//!
//! On SUCCEEDED the chain runs strictly in order: assemble the paginated
//! results, persist the raw payload, extract forms and tables, annotate
//! entities, index for search, then flip the document record to COMPLETED.
//! Each step's failure aborts the remaining steps; artifacts already
//! written stay (no compensating rollback) and the caller relies on
//! at-least-once redelivery to retry the whole message.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::analysis::{fetch_full_results, AnalyzedDocument};
use crate::clients::{AnalysisClient, ArtifactStore};
use crate::models::{CompletionNotification, JobStatus, OutputRecord, OutputType};
use crate::repository::{DocumentRepository, OutputRepository};
use crate::services::annotate::AnnotationService;
use crate::services::extract;
use crate::services::index::IndexService;

/// What processing a notification amounted to.
#[derive(Debug)]
pub enum CompletionOutcome {
    /// Non-SUCCEEDED status: terminal no-op, document left IN_PROGRESS.
    Skipped { status: JobStatus },
    /// Full chain ran; the document is COMPLETED.
    Completed {
        document_id: String,
        forms: usize,
        tables: usize,
        entities_detected: bool,
    },
}

pub struct CompletionService {
    documents: Arc<dyn DocumentRepository>,
    outputs: Arc<dyn OutputRepository>,
    artifacts: Arc<dyn ArtifactStore>,
    analysis: Arc<dyn AnalysisClient>,
    annotation: AnnotationService,
    indexer: IndexService,
}

impl CompletionService {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        outputs: Arc<dyn OutputRepository>,
        artifacts: Arc<dyn ArtifactStore>,
        analysis: Arc<dyn AnalysisClient>,
        annotation: AnnotationService,
        indexer: IndexService,
    ) -> Self {
        Self {
            documents,
            outputs,
            artifacts,
            analysis,
            annotation,
            indexer,
        }
    }

    /// Process one completion notification body.
    pub async fn process(&self, body: &str) -> Result<CompletionOutcome> {
        let notification = CompletionNotification::parse(body)?;
        tracing::info!(
            job_id = %notification.job_id,
            job_tag = %notification.job_tag,
            status = ?notification.status,
            "received completion notification"
        );

        if notification.status != JobStatus::Succeeded {
            tracing::warn!(
                job_id = %notification.job_id,
                status = ?notification.status,
                "job did not succeed; leaving document in progress"
            );
            return Ok(CompletionOutcome::Skipped {
                status: notification.status,
            });
        }

        let document_id = notification.job_tag.clone();
        let bucket = notification.document_location.bucket.clone();

        // Reassemble the paginated result stream into one logical response.
        let full = fetch_full_results(self.analysis.as_ref(), &notification.job_id)
            .await
            .context("failed to assemble analysis results")?;
        tracing::info!(
            document_id = %document_id,
            blocks = full.blocks.len(),
            "assembled analysis results"
        );

        // Persist the raw payload before any interpretation.
        let raw_path = format!("{document_id}/textract-response.json");
        self.artifacts
            .put(&bucket, &raw_path, &serde_json::to_vec(&full)?)
            .await
            .context("failed to store raw analysis response")?;
        self.outputs
            .create(OutputRecord::new(
                document_id.clone(),
                OutputType::RawResponse,
                raw_path,
            ))
            .await?;

        let analyzed = AnalyzedDocument::from_blocks(&full.blocks);

        let forms = extract::store_forms(
            &document_id,
            &bucket,
            &analyzed,
            self.artifacts.as_ref(),
            self.outputs.as_ref(),
        )
        .await?;
        let tables = extract::store_tables(
            &document_id,
            &bucket,
            &analyzed,
            self.artifacts.as_ref(),
            self.outputs.as_ref(),
        )
        .await?;

        let content = extract::document_text(&analyzed);
        let entities = self
            .annotation
            .annotate(&document_id, &bucket, &content)
            .await?;
        let entities_detected = entities.is_some();

        self.indexer
            .index_document(
                &document_id,
                &bucket,
                &notification.document_location.object_name,
                content,
                entities,
            )
            .await?;

        self.documents
            .mark_completed(&document_id)
            .await
            .context("failed to mark document completed")?;
        tracing::info!(document_id = %document_id, "document completed");

        Ok(CompletionOutcome::Completed {
            document_id,
            forms,
            tables,
            entities_detected,
        })
    }
}
