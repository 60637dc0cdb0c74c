//! Collaborator interfaces and their local / in-memory implementations.
//!
//! Every external capability the pipeline touches (artifact store, record
//! queue, analysis service, entity detection, search index) sits behind a
//! dyn-safe trait so services receive their collaborators by injection and
//! tests substitute in-memory fakes.

pub mod analysis;
pub mod artifact;
pub mod entities;
pub mod queue;
pub mod search;

pub use analysis::{AnalysisClient, FixtureAnalysisClient};
pub use artifact::{ArtifactStore, LocalArtifactStore, MemoryArtifactStore};
pub use entities::{EntityDetector, StaticEntityDetector};
pub use queue::{LocalQueue, MemoryQueue, MessageQueue, QueuedMessage};
pub use search::{LocalSearchIndex, MemorySearchIndex, SearchHit, SearchIndex};

/// Error surfaced by a collaborator call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),
}
