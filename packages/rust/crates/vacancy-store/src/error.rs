//! Error types for query persistence.
//!
//! Library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Error types for query store operations.
///
/// Each variant represents a specific failure mode of the persistence contract.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record for the same chat and canonical query is already persisted.
    #[error("query already exists: {0}")]
    AlreadyExists(String),

    /// No record matches the chat and canonical query.
    #[error("query not found: {0}")]
    NotFound(String),

    /// A persisted payload does not decode into exactly four fields.
    #[error("invalid query record: {0}")]
    InvalidRecord(String),

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
