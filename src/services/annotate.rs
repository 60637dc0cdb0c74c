//! Entity annotation: optional enrichment pass over the extracted text.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;

use crate::clients::{ArtifactStore, EntityDetector};
use crate::models::{fold_entities, OutputRecord, OutputType};
use crate::repository::OutputRepository;

/// Detects entities, persists the raw list, and folds it for the search
/// document.
pub struct AnnotationService {
    detector: Arc<dyn EntityDetector>,
    artifacts: Arc<dyn ArtifactStore>,
    outputs: Arc<dyn OutputRepository>,
}

impl AnnotationService {
    pub fn new(
        detector: Arc<dyn EntityDetector>,
        artifacts: Arc<dyn ArtifactStore>,
        outputs: Arc<dyn OutputRepository>,
    ) -> Self {
        Self {
            detector,
            artifacts,
            outputs,
        }
    }

    /// Run detection over `text`.
    ///
    /// Returns the folded type -> space-joined-texts mapping, or `None` when
    /// nothing was detected; in that case no artifact is produced and no
    /// entity fields reach the search document.
    pub async fn annotate(
        &self,
        document_id: &str,
        bucket: &str,
        text: &str,
    ) -> Result<Option<BTreeMap<String, String>>> {
        let entities = self.detector.detect(text).await?;
        if entities.is_empty() {
            tracing::debug!(document_id, "no entities detected");
            return Ok(None);
        }

        let path = format!("{document_id}/entities.json");
        self.artifacts
            .put(bucket, &path, &serde_json::to_vec(&entities)?)
            .await?;
        self.outputs
            .create(OutputRecord::new(
                document_id.to_string(),
                OutputType::Entities,
                path,
            ))
            .await?;
        tracing::info!(document_id, count = entities.len(), "stored entity artifact");

        Ok(Some(fold_entities(&entities)))
    }
}
