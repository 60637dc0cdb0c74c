//! Document records tracked through the processing lifecycle.
//!
//! One record exists per ingested object. The record is created at ingestion
//! with `InProgress` status and flipped to `Completed` exactly once the
//! completion pipeline has persisted every derived artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing status of a document.
///
/// Transitions are monotone: `InProgress` -> `Completed`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    InProgress,
    Completed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A tracked document.
///
/// `document_id` doubles as the analysis job's idempotency token and its
/// correlation tag; it is the partition key for every derived record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Unique identifier, generated at ingestion.
    pub document_id: String,
    /// Container holding the source object.
    pub bucket_name: String,
    /// Source object name within the container.
    pub object_name: String,
    /// Optional access-scoping tag, copied into the search document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Current lifecycle status.
    pub document_status: DocumentStatus,
    /// When the record was created.
    pub document_created_on: DateTime<Utc>,
    /// Set iff status is `Completed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_completed_on: Option<DateTime<Utc>>,
}

impl DocumentRecord {
    /// Create a fresh record in `InProgress` state.
    pub fn new(
        document_id: String,
        bucket_name: String,
        object_name: String,
        department: Option<String>,
    ) -> Self {
        Self {
            document_id,
            bucket_name,
            object_name,
            department,
            document_status: DocumentStatus::InProgress,
            document_created_on: Utc::now(),
            document_completed_on: None,
        }
    }

    /// Flip the record to `Completed` with a completion timestamp.
    ///
    /// Calling this twice overwrites the timestamp; that is the accepted
    /// idempotent-by-overwrite behavior for duplicate notifications.
    pub fn mark_completed(&mut self) {
        self.document_status = DocumentStatus::Completed;
        self.document_completed_on = Some(Utc::now());
    }

    pub fn is_completed(&self) -> bool {
        self.document_status == DocumentStatus::Completed
    }
}
