use anyhow::Result;
use tokio_util::sync::CancellationToken;

use super::channel_listener;
use super::loop_control::{self, LoopExit};
use crate::channels::telegram::TelegramRuntimeConfig;
use crate::dispatch::{Dispatcher, RelayServices};

/// Run the relay over Telegram long polling until Ctrl+C.
pub async fn run_telegram(
    bot_token: String,
    runtime_config: TelegramRuntimeConfig,
    services: RelayServices,
) -> Result<()> {
    let shutdown = CancellationToken::new();
    let signal_shutdown = shutdown.clone();
    let signal_watcher = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal_shutdown.cancel(),
            Err(error) => tracing::warn!(error = %error, "failed to listen for Ctrl+C"),
        }
    });

    println!("Telegram relay listening... (polling, Ctrl+C to stop)");
    let result = run_telegram_until(bot_token, runtime_config, services, shutdown).await;
    signal_watcher.abort();
    result
}

/// Run the relay until `shutdown` is cancelled or the listener fails.
///
/// On exit every running worker is stopped.
pub async fn run_telegram_until(
    bot_token: String,
    runtime_config: TelegramRuntimeConfig,
    services: RelayServices,
    shutdown: CancellationToken,
) -> Result<()> {
    let (channel, mut inbound_rx, listener) =
        channel_listener::start_polling_listener(bot_token, &runtime_config);
    tracing::info!(
        api_base_url = %runtime_config.api_base_url,
        poll_timeout_secs = runtime_config.poll.timeout_secs,
        batch_size = runtime_config.poll.batch_size,
        search_interval_secs = services.worker_config.search_interval.as_secs(),
        active_hours = %services.worker_config.active_hours,
        "Telegram relay started"
    );
    let dispatcher = Dispatcher::new(channel, services);

    let exit = loop_control::run_polling_event_loop(&mut inbound_rx, &dispatcher, &shutdown).await;
    dispatcher.shutdown();

    match exit {
        LoopExit::Shutdown => {
            listener.abort();
            Ok(())
        }
        LoopExit::ListenerClosed => match listener.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(error)) => Err(error.context("Telegram listener stopped")),
            Err(error) => Err(anyhow::anyhow!("Telegram listener task failed: {error}")),
        },
    }
}
