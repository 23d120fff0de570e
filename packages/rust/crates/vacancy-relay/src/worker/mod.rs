//! Per-chat worker: saved queries, the periodic search loop and its dedup cache.

mod active_hours;
mod chat_worker;
mod config;
mod dedup;
mod error;
mod notify;

pub use active_hours::ActiveHours;
pub use chat_worker::{ChatWorker, StartOutcome, WorkerStatus};
pub use config::WorkerConfig;
pub use dedup::VacancyDedupCache;
pub use error::QueryCommandError;
pub use notify::{escape_html, format_query_line, format_vacancy_notification};
