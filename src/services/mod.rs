//! Service layer: the pipeline's business logic, free of CLI concerns.

pub mod annotate;
pub mod completion;
pub mod extract;
pub mod index;
pub mod ingest;
pub mod submit;

pub use annotate::AnnotationService;
pub use completion::{CompletionOutcome, CompletionService};
pub use index::{IndexService, SearchDocument};
pub use ingest::IngestService;
pub use submit::SubmitService;
