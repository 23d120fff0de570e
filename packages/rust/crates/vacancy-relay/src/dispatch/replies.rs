//! Fixed reply texts (Telegram HTML).

/// How to add a query.
pub const MESSAGE_ADD_QUERY: &str = "To add a new query, send a message to the bot in the following format:\n\
<code>add: [area: int] [role_id: int] [keywords: string] [experience: (-|0|1-3|3-6|6)]</code>\n\
Example: <code>add: 1 96 golang-разработчик 1-3</code>";

/// How to remove a query.
pub const MESSAGE_REMOVE_QUERY: &str = "To delete one of the queries, send the following:\n\
<code>remove: [query_id: int]</code>";

/// No saved queries.
pub const MESSAGE_NO_QUERIES: &str = "No active queries found.";

pub const MESSAGE_QUERY_ADDED: &str = "Query added 👌🏻";
pub const MESSAGE_QUERY_REMOVED: &str = "Query removed 🗑️";
pub const MESSAGE_WORKER_STARTED: &str = "Worker started!";
pub const MESSAGE_WORKER_ALREADY_RUNNING: &str = "Worker is already running.";
pub const MESSAGE_WORKER_STOPPED: &str = "Worker stopped.";
pub const MESSAGE_WORKER_NOT_RUNNING: &str = "Worker is not running.";
pub const MESSAGE_ACTIVE_QUERIES: &str = "Active queries:";
pub const MESSAGE_UNKNOWN_COMMAND: &str = "Unknown command";
pub const MESSAGE_LOAD_FAILED: &str = "Couldn't load your queries, please try again later.";

/// `/help` text.
pub fn help_message() -> String {
    format!(
        "This bot helps you to find new vacancies on hh.ru based on your search queries.\n\n\
{MESSAGE_ADD_QUERY}\n\n{MESSAGE_REMOVE_QUERY}\n\n\
Commands: /start, /stop, /check, /queries, /status, /help"
    )
}

/// `/start` with nothing to search.
pub fn no_queries_with_instructions() -> String {
    format!("{MESSAGE_NO_QUERIES}\n\n{MESSAGE_ADD_QUERY}")
}

pub fn checked_message(count: usize) -> String {
    format!("Checked {count} queries 👌🏻")
}

pub fn working_status_message(count: usize, interval_secs: u64) -> String {
    format!("Working on {count} queries with interval {interval_secs}s")
}

pub fn idle_status_message(count: usize) -> String {
    format!("Worker not started ({count} queries saved).")
}
