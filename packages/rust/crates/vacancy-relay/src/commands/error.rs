use thiserror::Error;

/// A query command matched its grammar but a field failed to convert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    /// Area or role id does not fit.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Remove index is not a representable integer.
    #[error("invalid query id `{0}`")]
    InvalidIndex(String),
}
