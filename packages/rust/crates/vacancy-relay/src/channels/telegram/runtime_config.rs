//! Telegram transport runtime configuration (API endpoint, long polling, inbound queue).

use std::time::Duration;

use crate::config::{TelegramSettings, resolve_string, resolve_u64, resolve_usize};

use super::channel::{TELEGRAM_DEFAULT_API_BASE, TelegramPollConfig};

const DEFAULT_INBOUND_QUEUE_CAPACITY: usize = 100;

/// Resolved Telegram settings: env (`VACANCY_RELAY_TELEGRAM_*`) over YAML over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramRuntimeConfig {
    /// Bot API base URL.
    pub api_base_url: String,
    /// `getUpdates` parameters.
    pub poll: TelegramPollConfig,
    /// Capacity of the listener to dispatcher queue.
    pub inbound_queue_capacity: usize,
}

impl Default for TelegramRuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: TELEGRAM_DEFAULT_API_BASE.to_string(),
            poll: TelegramPollConfig::default(),
            inbound_queue_capacity: DEFAULT_INBOUND_QUEUE_CAPACITY,
        }
    }
}

impl TelegramRuntimeConfig {
    /// Resolve with an injected env lookup (env, then settings, then defaults).
    pub fn from_lookup<F>(lookup: F, settings: Option<&TelegramSettings>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            api_base_url: resolve_string(
                &lookup,
                "VACANCY_RELAY_TELEGRAM_API_BASE_URL",
                settings.and_then(|s| s.api_base_url.as_deref()),
                &defaults.api_base_url,
            ),
            poll: TelegramPollConfig {
                timeout_secs: resolve_u64(
                    &lookup,
                    "VACANCY_RELAY_TELEGRAM_POLL_TIMEOUT_SECS",
                    settings.and_then(|s| s.poll_timeout_secs),
                    defaults.poll.timeout_secs,
                ),
                batch_size: resolve_usize(
                    &lookup,
                    "VACANCY_RELAY_TELEGRAM_BATCH_SIZE",
                    settings.and_then(|s| s.batch_size),
                    defaults.poll.batch_size,
                ),
                fetch_interval: Duration::from_millis(resolve_u64(
                    &lookup,
                    "VACANCY_RELAY_TELEGRAM_FETCH_INTERVAL_MS",
                    settings.and_then(|s| s.fetch_interval_ms),
                    u64::try_from(defaults.poll.fetch_interval.as_millis()).unwrap_or(1_000),
                )),
            },
            inbound_queue_capacity: resolve_usize(
                &lookup,
                "VACANCY_RELAY_TELEGRAM_INBOUND_QUEUE_CAPACITY",
                settings.and_then(|s| s.inbound_queue_capacity),
                defaults.inbound_queue_capacity,
            ),
        }
    }
}

/// Bot token: explicit (CLI) value, then `TELEGRAM_BOT_TOKEN`, then settings.
pub fn resolve_bot_token<F>(
    explicit: Option<String>,
    lookup: F,
    settings: Option<&TelegramSettings>,
) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .or_else(|| lookup("TELEGRAM_BOT_TOKEN"))
        .or_else(|| settings.and_then(|s| s.bot_token.clone()))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
