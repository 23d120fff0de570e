use super::client::build_telegram_http_client;
use super::constants::TELEGRAM_DEFAULT_API_BASE;
use super::{TelegramChannel, TelegramPollConfig};

impl TelegramChannel {
    /// Create a channel against the public Bot API with default polling parameters.
    pub fn new(bot_token: String) -> Self {
        Self::new_with_base_url(bot_token, TELEGRAM_DEFAULT_API_BASE.to_string())
    }

    /// Create a channel against a custom Bot API base URL (local Bot API server, test mock).
    pub fn new_with_base_url(bot_token: String, api_base_url: String) -> Self {
        Self::new_with_poll_config(bot_token, api_base_url, TelegramPollConfig::default())
    }

    /// Create a channel with explicit polling parameters.
    pub fn new_with_poll_config(
        bot_token: String,
        api_base_url: String,
        poll: TelegramPollConfig,
    ) -> Self {
        let poll = TelegramPollConfig {
            batch_size: poll.batch_size.clamp(1, 100),
            ..poll
        };
        Self {
            bot_token,
            api_base_url,
            poll,
            client: build_telegram_http_client(poll.timeout_secs),
        }
    }
}
