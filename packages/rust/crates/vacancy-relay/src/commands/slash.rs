/// Fixed slash-command verb set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Start the chat's search loop.
    Start,
    /// Stop the chat's search loop.
    Stop,
    /// Run one search pass now, ignoring active hours.
    Check,
    /// Show usage.
    Help,
    /// List saved queries.
    Queries,
    /// Report whether the loop runs and how many queries it covers.
    Status,
    /// Slash-prefixed text outside the verb set.
    Unknown(String),
}

/// Parse a slash command; `None` when the text is not slash-prefixed.
///
/// The verb must be the whole message. A trailing `@botname` (group chats) is ignored.
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    let verb = trimmed.strip_prefix('/')?;
    let verb = verb.split_once('@').map_or(verb, |(verb, _bot)| verb);
    let command = match verb {
        "start" => SlashCommand::Start,
        "stop" => SlashCommand::Stop,
        "check" => SlashCommand::Check,
        "help" => SlashCommand::Help,
        "queries" => SlashCommand::Queries,
        "status" => SlashCommand::Status,
        _ => SlashCommand::Unknown(trimmed.to_string()),
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_match_exactly() {
        assert_eq!(parse_slash_command("/start"), Some(SlashCommand::Start));
        assert_eq!(parse_slash_command(" /status "), Some(SlashCommand::Status));
        assert_eq!(
            parse_slash_command("/queries@vacancy_bot"),
            Some(SlashCommand::Queries)
        );
        assert_eq!(
            parse_slash_command("/start now"),
            Some(SlashCommand::Unknown("/start now".to_string()))
        );
        assert_eq!(parse_slash_command("start"), None);
    }
}
