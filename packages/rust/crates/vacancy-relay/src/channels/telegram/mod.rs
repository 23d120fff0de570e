//! Telegram Bot API channel: long polling transport and runtime wiring.

pub(crate) mod channel;
mod runtime;
mod runtime_config;

pub use channel::{
    TELEGRAM_MAX_MESSAGE_LENGTH, TelegramChannel, TelegramPollConfig, split_message_for_telegram,
};
pub use runtime::{run_telegram, run_telegram_until};
pub use runtime_config::{TelegramRuntimeConfig, resolve_bot_token};
