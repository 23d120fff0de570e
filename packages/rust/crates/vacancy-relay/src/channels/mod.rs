//! Chat channels: bridge the messaging platform to the dispatcher.

pub(crate) mod telegram;
mod traits;

pub use telegram::{
    TELEGRAM_MAX_MESSAGE_LENGTH, TelegramChannel, TelegramPollConfig, TelegramRuntimeConfig,
    resolve_bot_token, run_telegram, run_telegram_until, split_message_for_telegram,
};
pub use traits::{Channel, ChannelMessage};
