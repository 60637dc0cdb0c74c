//! Artifact storage: uniform put/get of byte blobs by (container, path).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use super::ClientError;

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store a blob, overwriting any existing artifact at the same location.
    async fn put(&self, container: &str, path: &str, bytes: &[u8]) -> Result<(), ClientError>;

    /// Fetch a stored blob.
    async fn get(&self, container: &str, path: &str) -> Result<Vec<u8>, ClientError>;
}

/// Filesystem-backed artifact store rooted at a data directory.
///
/// Artifacts land at `<root>/<container>/<path>`.
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn location(&self, container: &str, path: &str) -> PathBuf {
        self.root.join(container).join(path)
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn put(&self, container: &str, path: &str, bytes: &[u8]) -> Result<(), ClientError> {
        let location = self.location(container, path);
        if let Some(parent) = location.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&location, bytes)?;
        tracing::debug!(container, path, size = bytes.len(), "stored artifact");
        Ok(())
    }

    async fn get(&self, container: &str, path: &str) -> Result<Vec<u8>, ClientError> {
        let location = self.location(container, path);
        if !location.exists() {
            return Err(ClientError::NotFound(format!("artifact {container}/{path}")));
        }
        Ok(std::fs::read(&location)?)
    }
}

/// In-memory artifact store for tests.
#[derive(Default)]
pub struct MemoryArtifactStore {
    blobs: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths stored under a container, sorted.
    pub fn paths(&self, container: &str) -> Vec<String> {
        let blobs = self.blobs.lock().unwrap();
        let mut paths: Vec<String> = blobs
            .keys()
            .filter(|(c, _)| c == container)
            .map(|(_, p)| p.clone())
            .collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn put(&self, container: &str, path: &str, bytes: &[u8]) -> Result<(), ClientError> {
        self.blobs
            .lock()
            .unwrap()
            .insert((container.to_string(), path.to_string()), bytes.to_vec());
        Ok(())
    }

    async fn get(&self, container: &str, path: &str) -> Result<Vec<u8>, ClientError> {
        self.blobs
            .lock()
            .unwrap()
            .get(&(container.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("artifact {container}/{path}")))
    }
}
