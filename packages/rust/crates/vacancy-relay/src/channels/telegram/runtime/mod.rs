//! Telegram runtime wiring (long polling + dispatcher).

mod run_polling;

pub use run_polling::{run_telegram, run_telegram_until};
