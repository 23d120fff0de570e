//! vacancy-relay CLI: run the Telegram relay or inspect persisted queries.
//!
//! Logging: set `RUST_LOG=vacancy_relay=debug` (or `warn`, `info`) to tune output on stderr.

mod cli;
mod nodes;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vacancy_relay::{load_relay_settings, set_config_home_override};

use crate::cli::{Cli, Command};
use crate::nodes::{print_queries_mode, run_relay_mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // RUST_LOG overrides; --verbose on run => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let verbose = matches!(&cli.command, Command::Run { verbose: true, .. });
        EnvFilter::new(if verbose {
            "vacancy_relay=debug,vacancy_store=debug"
        } else {
            "vacancy_relay=info,vacancy_store=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let settings = load_relay_settings();

    match cli.command {
        Command::Run {
            bot_token,
            storage_dir,
            search_interval_secs,
            verbose: _,
        } => run_relay_mode(bot_token, storage_dir, search_interval_secs, &settings).await,
        Command::Queries {
            chat_id,
            storage_dir,
        } => print_queries_mode(chat_id, storage_dir, &settings).await,
    }
}
