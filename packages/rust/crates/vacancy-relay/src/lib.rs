//! Long-poll relay between Telegram chats and hh.ru vacancy searches.
//!
//! - Each chat owns a [`ChatWorker`] holding its saved queries, a periodic search loop and a
//!   time-windowed dedup cache, so a vacancy is announced once per retention window.
//! - The [`Dispatcher`] creates workers lazily and turns every inbound message into exactly one
//!   reply (`add:` / `remove:` query commands, `/start`, `/stop`, `/check`, `/help`,
//!   `/queries`, `/status`, or an echo).
//! - Collaborators sit behind traits: [`Channel`] (transport and notifications),
//!   [`VacancySearcher`] (search API) and [`vacancy_store::QueryStore`] (persistence).

#![allow(missing_docs)]

mod channels;
mod commands;
mod config;
mod dispatch;
mod search;
mod worker;

pub use channels::{
    Channel, ChannelMessage, TELEGRAM_MAX_MESSAGE_LENGTH, TelegramChannel, TelegramPollConfig,
    TelegramRuntimeConfig, resolve_bot_token, run_telegram, run_telegram_until,
    split_message_for_telegram,
};
pub use commands::{
    CommandParseError, RelayCommand, SlashCommand, parse_add_query, parse_command,
    parse_remove_query, parse_slash_command,
};
pub use config::{
    RelaySettings, SearchSettings, StorageSettings, TelegramSettings, WorkerSettings,
    load_relay_settings, load_relay_settings_from_paths, relay_settings_paths,
    set_config_home_override,
};
pub use dispatch::{Dispatcher, RelayServices, replies};
pub use search::{HhClient, HhClientConfig, VacanciesPage, Vacancy, VacancyExperience, VacancySearcher};
pub use worker::{
    ActiveHours, ChatWorker, QueryCommandError, StartOutcome, VacancyDedupCache, WorkerConfig,
    WorkerStatus, escape_html, format_query_line, format_vacancy_notification,
};

/// Default directory of persisted queries, relative to the working directory.
pub const DEFAULT_STORAGE_DIR: &str = "data/queries";

/// Storage directory: explicit (CLI) value, then `VACANCY_RELAY_STORAGE_DIR`, then settings.
pub fn resolve_storage_dir<F>(
    explicit: Option<std::path::PathBuf>,
    lookup: F,
    settings: Option<&StorageSettings>,
) -> std::path::PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    explicit.unwrap_or_else(|| {
        std::path::PathBuf::from(config::resolve_string(
            &lookup,
            "VACANCY_RELAY_STORAGE_DIR",
            settings.and_then(|s| s.dir.as_deref()),
            DEFAULT_STORAGE_DIR,
        ))
    })
}
