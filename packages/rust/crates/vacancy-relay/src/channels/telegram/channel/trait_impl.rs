use async_trait::async_trait;

use crate::channels::traits::{Channel, ChannelMessage};

use super::TelegramChannel;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, message: &str, recipient: &str) -> anyhow::Result<()> {
        self.send_text(message, recipient).await
    }

    async fn listen(&self, tx: tokio::sync::mpsc::Sender<ChannelMessage>) -> anyhow::Result<()> {
        self.listen_updates(tx).await
    }

    async fn health_check(&self) -> bool {
        self.health_probe().await
    }
}
