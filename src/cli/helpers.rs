//! Shared wiring for CLI commands.

use std::sync::Arc;

use crate::clients::{
    ArtifactStore, LocalArtifactStore, LocalQueue, LocalSearchIndex, MessageQueue, SearchIndex,
};
use crate::config::Settings;
use crate::repository::{
    DocumentRepository, LocalDocumentRepository, LocalOutputRepository, OutputRepository,
};

/// Local store stack assembled from the settings' data directory.
pub struct AppContext {
    pub documents: Arc<dyn DocumentRepository>,
    pub outputs: Arc<dyn OutputRepository>,
    pub artifacts: Arc<dyn ArtifactStore>,
    pub queue: Arc<dyn MessageQueue>,
    pub search: Arc<dyn SearchIndex>,
}

impl AppContext {
    pub fn new(settings: &Settings) -> Self {
        Self {
            documents: Arc::new(LocalDocumentRepository::new(settings.documents_path())),
            outputs: Arc::new(LocalOutputRepository::new(settings.outputs_path())),
            artifacts: Arc::new(LocalArtifactStore::new(settings.artifacts_dir())),
            queue: Arc::new(LocalQueue::new(settings.queue_path())),
            search: Arc::new(LocalSearchIndex::new(settings.index_dir())),
        }
    }
}
