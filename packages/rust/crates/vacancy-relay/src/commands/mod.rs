//! Parsing of inbound chat text into relay commands.

mod error;
mod query;
mod slash;

pub use error::CommandParseError;
pub use query::{parse_add_query, parse_remove_query};
pub use slash::{SlashCommand, parse_slash_command};

use vacancy_store::Query;

/// Classified inbound text. Routing order: slash, add, remove, plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayCommand {
    /// `/verb` control command.
    Slash(SlashCommand),
    /// `add: <area> <role> <keyword> <experience>`.
    AddQuery(Query),
    /// `remove: <index>` with the raw 1-based index (may be zero or negative).
    RemoveQuery(i64),
    /// Text matched a query grammar but a field failed to convert.
    Malformed(CommandParseError),
    /// Anything else; echoed back to the chat.
    Text(String),
}

/// Classify one inbound message. First match wins.
pub fn parse_command(input: &str) -> RelayCommand {
    if let Some(command) = parse_slash_command(input) {
        return RelayCommand::Slash(command);
    }
    match parse_add_query(input) {
        Some(Ok(query)) => return RelayCommand::AddQuery(query),
        Some(Err(error)) => return RelayCommand::Malformed(error),
        None => {}
    }
    match parse_remove_query(input) {
        Some(Ok(index)) => RelayCommand::RemoveQuery(index),
        Some(Err(error)) => RelayCommand::Malformed(error),
        None => RelayCommand::Text(input.to_string()),
    }
}
