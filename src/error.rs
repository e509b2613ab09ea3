//! Error handling for the close-approach engine
//!
//! This module provides idiomatic Rust error types using thiserror. Missing
//! or malformed optional values in the source data are not errors — they are
//! coerced at ingestion time (see `extract`). Errors here cover the cases the
//! engine refuses to recover from: unreadable files, broken payload layout,
//! unparseable timestamps, and misconstructed queries.

use thiserror::Error;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum NeoError {
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while extracting NEOs and close approaches from data files
#[derive(Error, Debug)]
pub enum IngestError {
    /// Approach timestamps are required; an unparseable one cannot be coerced.
    #[error("invalid approach timestamp {raw:?}")]
    InvalidTimestamp { raw: String },

    #[error("close-approach payload is missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("malformed close-approach payload: {reason}")]
    MalformedPayload { reason: String },
}

/// Errors raised at query-construction time, before any approach is evaluated
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// The caller supplied a criterion name this engine does not recognize.
    /// This is an integration defect and surfaces immediately.
    #[error("unsupported query criterion '{name}'")]
    UnsupportedCriterion { name: String },

    #[error("invalid value {raw:?} for criterion '{name}'")]
    InvalidCriterionValue { name: String, raw: String },
}
