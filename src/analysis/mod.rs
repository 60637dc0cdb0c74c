//! Analysis result handling: wire model, pagination assembly, and
//! reconstruction of the logical page/line/form/table structure.

pub mod assembler;
pub mod blocks;
pub mod document;

pub use assembler::fetch_full_results;
pub use blocks::{Block, BlockType, DocumentMetadata, Relationship, RelationshipType, ResultsPage, SelectionStatus};
pub use document::{AnalyzedDocument, AnalyzedPage, AnalyzedTable, FormField};
