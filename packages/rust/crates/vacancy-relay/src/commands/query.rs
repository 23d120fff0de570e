use std::sync::LazyLock;

use regex::Regex;
use vacancy_store::{Experience, Query};

use super::error::CommandParseError;

/// `add: <area:int> <role:int> <keyword:token> <experience>`, case-sensitive, whole message.
static ADD_QUERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^add:\s+(\d+)\s+(\d+)\s+([\p{L}\p{N}+#._-]+)\s+(-|0|1-3|3-6|6)$")
        .unwrap_or_else(|err| panic!("invalid ADD_QUERY_RE regex: {err}"))
});

/// `remove: <index:int>`, whole message.
static REMOVE_QUERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^remove:\s+(-?\d+)$")
        .unwrap_or_else(|err| panic!("invalid REMOVE_QUERY_RE regex: {err}"))
});

/// Parse an add-query command.
///
/// `None` when the grammar does not match. `Some(Err(_))` when it matches but an id
/// does not fit.
pub fn parse_add_query(input: &str) -> Option<Result<Query, CommandParseError>> {
    let captures = ADD_QUERY_RE.captures(input.trim())?;
    let area = &captures[1];
    let role = &captures[2];
    let parsed = parse_id(area, "area").and_then(|area| {
        parse_id(role, "role").map(|role| {
            Query::new(
                area,
                role,
                &captures[3],
                Experience::from_command_token(&captures[4]),
            )
        })
    });
    Some(parsed)
}

/// Parse a remove-query command into its raw 1-based index.
pub fn parse_remove_query(input: &str) -> Option<Result<i64, CommandParseError>> {
    let captures = REMOVE_QUERY_RE.captures(input.trim())?;
    let raw = &captures[1];
    Some(
        raw.parse::<i64>()
            .map_err(|_| CommandParseError::InvalidIndex(raw.to_string())),
    )
}

fn parse_id(raw: &str, field: &str) -> Result<u32, CommandParseError> {
    raw.parse::<u32>()
        .map_err(|_| CommandParseError::InvalidQuery(format!("{field} id `{raw}` is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_query_maps_experience_tokens() {
        let parsed = parse_add_query("add: 1 96 golang 1-3");
        assert_eq!(
            parsed,
            Some(Ok(Query::new(1, 96, "golang", Experience::Between1And3)))
        );

        let parsed = parse_add_query("add: 2 10 golang-разработчик -");
        assert_eq!(
            parsed,
            Some(Ok(Query::new(
                2,
                10,
                "golang-разработчик",
                Experience::Any
            )))
        );
    }

    #[test]
    fn add_query_rejects_partial_commands() {
        assert_eq!(parse_add_query("add: 1 96 golang"), None);
        assert_eq!(parse_add_query("add: 1 96 golang 2-4"), None);
        assert_eq!(parse_add_query("Add: 1 96 golang 1-3"), None);
        assert_eq!(parse_add_query("please add: 1 96 golang 1-3"), None);
        assert_eq!(parse_add_query("add: 1 96 go lang 1-3"), None);
    }

    #[test]
    fn add_query_reports_overflowing_ids() {
        assert!(matches!(
            parse_add_query("add: 99999999999 96 golang 1-3"),
            Some(Err(CommandParseError::InvalidQuery(_)))
        ));
    }

    #[test]
    fn remove_query_keeps_raw_index() {
        assert_eq!(parse_remove_query("remove: 2"), Some(Ok(2)));
        assert_eq!(parse_remove_query("remove: -1"), Some(Ok(-1)));
        assert_eq!(parse_remove_query("remove: two"), None);
        assert!(matches!(
            parse_remove_query("remove: 99999999999999999999"),
            Some(Err(CommandParseError::InvalidIndex(_)))
        ));
    }
}
