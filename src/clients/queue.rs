//! Job dispatch queue: at-least-once delivery of small JSON messages.

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use super::ClientError;

/// A message pulled off the queue.
#[derive(Debug, Clone)]
pub struct QueuedMessage {
    pub message_id: String,
    pub body: String,
}

#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Enqueue a JSON body, returning the assigned message id.
    async fn send(&self, body: &str) -> Result<String, ClientError>;

    /// Pull the next message, if any.
    ///
    /// Delivery is at-least-once; a consumer that fails mid-processing may
    /// see the same logical message again after redelivery.
    async fn receive(&self) -> Result<Option<QueuedMessage>, ClientError>;
}

/// In-process queue used by tests and single-run pipelines.
#[derive(Default)]
pub struct MemoryQueue {
    messages: Mutex<VecDeque<QueuedMessage>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageQueue for MemoryQueue {
    async fn send(&self, body: &str) -> Result<String, ClientError> {
        let message_id = uuid::Uuid::new_v4().to_string();
        self.messages.lock().unwrap().push_back(QueuedMessage {
            message_id: message_id.clone(),
            body: body.to_string(),
        });
        tracing::debug!(message_id = %message_id, "enqueued message");
        Ok(message_id)
    }

    async fn receive(&self) -> Result<Option<QueuedMessage>, ClientError> {
        Ok(self.messages.lock().unwrap().pop_front())
    }
}

/// File-backed queue so CLI invocations hand work to each other.
///
/// Messages are JSON lines appended to the queue file; receive pops the
/// first line and rewrites the remainder. Single-consumer only.
pub struct LocalQueue {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_lines(&self) -> Result<Vec<String>, ClientError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct QueueLine {
    message_id: String,
    body: String,
}

#[async_trait]
impl MessageQueue for LocalQueue {
    async fn send(&self, body: &str) -> Result<String, ClientError> {
        let _guard = self.lock.lock().unwrap();
        let message_id = uuid::Uuid::new_v4().to_string();
        let line = serde_json::to_string(&QueueLine {
            message_id: message_id.clone(),
            body: body.to_string(),
        })?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(message_id)
    }

    async fn receive(&self) -> Result<Option<QueuedMessage>, ClientError> {
        let _guard = self.lock.lock().unwrap();
        let mut lines = self.read_lines()?;
        if lines.is_empty() {
            return Ok(None);
        }
        let head = lines.remove(0);
        std::fs::write(&self.path, lines.join("\n") + if lines.is_empty() { "" } else { "\n" })?;
        let parsed: QueueLine = serde_json::from_str(&head)?;
        Ok(Some(QueuedMessage {
            message_id: parsed.message_id,
            body: parsed.body,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_memory_fifo() {
        let queue = MemoryQueue::new();
        queue.send("one").await.unwrap();
        queue.send("two").await.unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.receive().await.unwrap().unwrap().body, "one");
        assert_eq!(queue.receive().await.unwrap().unwrap().body, "two");
        assert!(queue.receive().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_local_queue_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("queue.jsonl");

        let producer = LocalQueue::new(&path);
        producer.send(r#"{"documentId":"d-1"}"#).await.unwrap();
        producer.send(r#"{"documentId":"d-2"}"#).await.unwrap();

        let consumer = LocalQueue::new(&path);
        let first = consumer.receive().await.unwrap().unwrap();
        assert!(first.body.contains("d-1"));
        let second = consumer.receive().await.unwrap().unwrap();
        assert!(second.body.contains("d-2"));
        assert!(consumer.receive().await.unwrap().is_none());
    }
}
