//! Docuflow - document analysis pipeline.
//!
//! Ingests uploaded documents, submits them to a document-analysis service,
//! and on completion assembles the paginated results into durable
//! artifacts: extracted text, per-page form tables, per-table cell grids,
//! detected entities, and a search index entry. Every document moves
//! through an explicit IN_PROGRESS -> COMPLETED lifecycle and every derived
//! artifact is registered in an output record.

pub mod analysis;
pub mod cli;
pub mod clients;
pub mod config;
pub mod models;
pub mod repository;
pub mod services;
