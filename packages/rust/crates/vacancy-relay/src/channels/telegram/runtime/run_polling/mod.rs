mod channel_listener;
mod loop_control;
mod run;

pub use run::{run_telegram, run_telegram_until};
