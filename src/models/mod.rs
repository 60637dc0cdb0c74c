//! Data models for the document pipeline.

mod document;
mod entity;
mod message;
mod output;

pub use document::{DocumentRecord, DocumentStatus};
pub use entity::{fold_entities, Entity};
pub use message::{
    CompletionNotification, DocumentLocation, JobStartMessage, JobStatus, MessageError,
};
pub use output::{OutputRecord, OutputType, ParseOutputTypeError};
