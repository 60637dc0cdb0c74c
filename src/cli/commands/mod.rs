//! CLI command implementations.

pub mod ingest;
pub mod run;
pub mod search;
pub mod status;
