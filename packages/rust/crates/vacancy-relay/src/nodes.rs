//! Subcommand entry points.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use vacancy_relay::{
    HhClient, HhClientConfig, RelayServices, RelaySettings, TelegramRuntimeConfig, WorkerConfig,
    format_query_line, resolve_bot_token, resolve_storage_dir, run_telegram,
};
use vacancy_store::{FileQueryStore, QueryStore};

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

pub(crate) async fn run_relay_mode(
    bot_token: Option<String>,
    storage_dir: Option<PathBuf>,
    search_interval_secs: Option<u64>,
    settings: &RelaySettings,
) -> anyhow::Result<()> {
    let bot_token = resolve_bot_token(bot_token, env_lookup, Some(&settings.telegram))
        .context("Telegram bot token is required: pass --bot-token or set TELEGRAM_BOT_TOKEN")?;
    let storage_dir = resolve_storage_dir(storage_dir, env_lookup, Some(&settings.storage));
    tokio::fs::create_dir_all(&storage_dir)
        .await
        .with_context(|| format!("failed to create storage dir {}", storage_dir.display()))?;

    let search_config = HhClientConfig::from_lookup(env_lookup, Some(&settings.search));
    let mut worker_config = WorkerConfig::from_lookup(
        env_lookup,
        Some(&settings.worker),
        search_config.period_days,
    );
    if let Some(secs) = search_interval_secs.filter(|secs| *secs > 0) {
        worker_config = worker_config.with_search_interval(Duration::from_secs(secs));
    }
    let telegram_config =
        TelegramRuntimeConfig::from_lookup(env_lookup, Some(&settings.telegram));

    tracing::info!(
        storage_dir = %storage_dir.display(),
        search_api = %search_config.api_base_url,
        period_days = search_config.period_days,
        "relay configuration resolved"
    );

    let services = RelayServices {
        store: Arc::new(FileQueryStore::new(storage_dir)),
        searcher: Arc::new(HhClient::new(&search_config)),
        worker_config,
    };
    run_telegram(bot_token, telegram_config, services).await
}

pub(crate) async fn print_queries_mode(
    chat_id: i64,
    storage_dir: Option<PathBuf>,
    settings: &RelaySettings,
) -> anyhow::Result<()> {
    let storage_dir = resolve_storage_dir(storage_dir, env_lookup, Some(&settings.storage));
    let store = FileQueryStore::new(&storage_dir);
    let queries = store
        .read_all(chat_id)
        .await
        .with_context(|| format!("failed to read queries of chat {chat_id}"))?;
    if queries.is_empty() {
        println!("No active queries found.");
        return Ok(());
    }
    for (index, query) in queries.iter().enumerate() {
        println!("{}", format_query_line(index + 1, query));
    }
    Ok(())
}
