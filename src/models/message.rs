//! Message envelopes exchanged over the job queue.
//!
//! Messages are parsed into typed structs at the boundary; a malformed body
//! is rejected with a `MessageError` rather than silently skipping fields.

use serde::{Deserialize, Serialize};

/// Error produced when a queue message body cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("malformed message body: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Envelope sent from ingestion to the job submitter.
///
/// The ingestion event and the job-start message share this schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStartMessage {
    pub bucket_name: String,
    pub object_name: String,
    pub document_id: String,
}

impl JobStartMessage {
    pub fn parse(body: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Terminal status reported by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Succeeded,
    Failed,
    PartialSuccess,
    /// Any status string this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Source location carried in the completion notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLocation {
    pub bucket: String,
    pub object_name: String,
}

/// Out-of-band notification that an analysis job finished.
///
/// `job_tag` carries the `document_id` supplied at job start; it is the sole
/// correlation mechanism between start and completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionNotification {
    pub job_id: String,
    pub job_tag: String,
    pub status: JobStatus,
    pub document_location: DocumentLocation,
}

impl CompletionNotification {
    pub fn parse(body: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_start_round_trip() {
        let body = r#"{"bucketName":"uploads","objectName":"doc.pdf","documentId":"d-1"}"#;
        let msg = JobStartMessage::parse(body).unwrap();
        assert_eq!(msg.bucket_name, "uploads");
        assert_eq!(msg.document_id, "d-1");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["objectName"], "doc.pdf");
    }

    #[test]
    fn test_job_start_rejects_missing_field() {
        let body = r#"{"bucketName":"uploads","objectName":"doc.pdf"}"#;
        assert!(matches!(
            JobStartMessage::parse(body),
            Err(MessageError::Malformed(_))
        ));
    }

    #[test]
    fn test_completion_notification_parse() {
        let body = r#"{
            "jobId": "job-9",
            "jobTag": "d-1",
            "status": "SUCCEEDED",
            "documentLocation": {"bucket": "uploads", "objectName": "doc.pdf"}
        }"#;
        let notification = CompletionNotification::parse(body).unwrap();
        assert_eq!(notification.status, JobStatus::Succeeded);
        assert_eq!(notification.job_tag, "d-1");
        assert_eq!(notification.document_location.object_name, "doc.pdf");
    }

    #[test]
    fn test_unknown_status_tolerated() {
        let body = r#"{
            "jobId": "job-9",
            "jobTag": "d-1",
            "status": "THROTTLED",
            "documentLocation": {"bucket": "uploads", "objectName": "doc.pdf"}
        }"#;
        let notification = CompletionNotification::parse(body).unwrap();
        assert_eq!(notification.status, JobStatus::Unknown);
    }
}
