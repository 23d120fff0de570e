//! Query command errors surfaced to the chat.

use thiserror::Error;
use vacancy_store::StoreError;

use crate::commands::CommandParseError;

/// Failure of an add/remove query command. Every variant maps to one short reply.
#[derive(Error, Debug)]
pub enum QueryCommandError {
    /// The command text could not be converted.
    #[error(transparent)]
    Parse(#[from] CommandParseError),

    /// The same (area, role, text, experience) tuple is already saved for this chat.
    #[error("query already exists")]
    AlreadyExists,

    /// Remove was requested while no queries are saved.
    #[error("no queries saved")]
    EmptyList,

    /// Remove index outside `1..=len`.
    #[error("query #{index} does not exist ({len} saved)")]
    IndexOutOfRange {
        /// Requested 1-based index.
        index: i64,
        /// Current number of saved queries.
        len: usize,
    },

    /// The record was already gone from storage. The stale entry is dropped from memory.
    #[error("query record not found: {0}")]
    NotFound(String),

    /// Persisting a new query failed.
    #[error("failed to save query: {0}")]
    Save(#[source] StoreError),

    /// Deleting a persisted query failed.
    #[error("failed to remove query: {0}")]
    Remove(#[source] StoreError),
}

impl QueryCommandError {
    /// Reply text for the chat. Never includes raw I/O detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(CommandParseError::InvalidIndex(_)) => {
                "Couldn't parse the query id.".to_string()
            }
            Self::Parse(CommandParseError::InvalidQuery(detail)) => {
                format!("Couldn't parse the query: {detail}.")
            }
            Self::AlreadyExists => "This query already exists.".to_string(),
            Self::EmptyList => "No active queries found.".to_string(),
            Self::IndexOutOfRange { index, len } => {
                format!("Query #{index} does not exist (you have {len} queries).")
            }
            Self::NotFound(_) => "This query was already removed.".to_string(),
            Self::Save(_) => "Couldn't save the query, please try again later.".to_string(),
            Self::Remove(_) => "Couldn't remove the query, please try again later.".to_string(),
        }
    }
}
