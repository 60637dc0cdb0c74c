//! Entity-detection service interface.

use async_trait::async_trait;

use super::ClientError;
use crate::models::Entity;

#[async_trait]
pub trait EntityDetector: Send + Sync {
    /// Detect named entities in a flat text. An empty list is a valid result.
    async fn detect(&self, text: &str) -> Result<Vec<Entity>, ClientError>;
}

/// Detector returning a preconfigured entity list.
///
/// The default (empty) detector stands in when no detection service is
/// wired up; tests preload it with known entities.
#[derive(Default)]
pub struct StaticEntityDetector {
    entities: Vec<Entity>,
}

impl StaticEntityDetector {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }
}

#[async_trait]
impl EntityDetector for StaticEntityDetector {
    async fn detect(&self, text: &str) -> Result<Vec<Entity>, ClientError> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.entities.clone())
    }
}
