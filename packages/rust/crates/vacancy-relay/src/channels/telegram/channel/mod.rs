//! Telegram channel transport and message chunking.

mod chunking;
mod client;
mod constants;
mod constructor;
mod error;
mod listen;
mod parsing;
mod send_api;
mod send_text;
mod state;
mod trait_impl;

pub use chunking::split_message_for_telegram;
pub use constants::TELEGRAM_MAX_MESSAGE_LENGTH;
pub(crate) use constants::TELEGRAM_DEFAULT_API_BASE;
pub use state::{TelegramChannel, TelegramPollConfig};
