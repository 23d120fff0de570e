use std::sync::Arc;

use tokio::sync::mpsc;

use crate::channels::telegram::TelegramRuntimeConfig;
use crate::channels::traits::{Channel, ChannelMessage};

use super::super::super::channel::TelegramChannel;

pub(super) fn start_polling_listener(
    bot_token: String,
    runtime_config: &TelegramRuntimeConfig,
) -> (
    Arc<dyn Channel>,
    mpsc::Receiver<ChannelMessage>,
    tokio::task::JoinHandle<anyhow::Result<()>>,
) {
    let channel: Arc<dyn Channel> = Arc::new(TelegramChannel::new_with_poll_config(
        bot_token,
        runtime_config.api_base_url.clone(),
        runtime_config.poll,
    ));

    let (tx, inbound_rx) = mpsc::channel::<ChannelMessage>(runtime_config.inbound_queue_capacity);
    let listener_channel = Arc::clone(&channel);
    let listener = tokio::spawn(async move {
        let result = listener_channel.listen(tx).await;
        if let Err(error) = &result {
            tracing::error!("Telegram listener error: {error}");
        }
        result
    });

    (channel, inbound_rx, listener)
}
