use std::time::Duration;

use super::constants::{
    TELEGRAM_DEFAULT_BATCH_SIZE, TELEGRAM_DEFAULT_FETCH_INTERVAL_MS,
    TELEGRAM_DEFAULT_POLL_TIMEOUT_SECS,
};

/// `getUpdates` parameters and the pause between empty polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelegramPollConfig {
    /// Long-poll timeout passed to `getUpdates`, in seconds.
    pub timeout_secs: u64,
    /// Maximum number of updates per `getUpdates` call.
    pub batch_size: usize,
    /// Pause after a poll that returned nothing.
    pub fetch_interval: Duration,
}

impl Default for TelegramPollConfig {
    fn default() -> Self {
        Self {
            timeout_secs: TELEGRAM_DEFAULT_POLL_TIMEOUT_SECS,
            batch_size: TELEGRAM_DEFAULT_BATCH_SIZE,
            fetch_interval: Duration::from_millis(TELEGRAM_DEFAULT_FETCH_INTERVAL_MS),
        }
    }
}

/// Telegram channel: long-polls the Bot API for updates and sends HTML replies.
pub struct TelegramChannel {
    pub(super) bot_token: String,
    pub(super) api_base_url: String,
    pub(super) poll: TelegramPollConfig,
    pub(super) client: reqwest::Client,
}

impl TelegramChannel {
    pub(super) fn api_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_base_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}
