use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vacancy-relay")]
#[command(about = "Relay Telegram chats to hh.ru saved vacancy searches.")]
pub(crate) struct Cli {
    /// Override config directory (user settings live in `<conf>/vacancy-relay/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Long-poll Telegram and run chat workers until Ctrl+C.
    Run {
        /// Bot token (default: TELEGRAM_BOT_TOKEN, then settings).
        #[arg(long)]
        bot_token: Option<String>,

        /// Directory of persisted queries (default: data/queries).
        #[arg(long)]
        storage_dir: Option<PathBuf>,

        /// Search tick period in seconds (default: 60).
        #[arg(long)]
        search_interval_secs: Option<u64>,

        /// Debug logging for relay crates.
        #[arg(long, default_value_t = false)]
        verbose: bool,
    },
    /// Print the persisted queries of one chat.
    Queries {
        /// Chat id (negative for groups).
        #[arg(long, allow_hyphen_values = true)]
        chat_id: i64,

        /// Directory of persisted queries (default: data/queries).
        #[arg(long)]
        storage_dir: Option<PathBuf>,
    },
}
