//! Channel trait and message types for chat platforms.

use async_trait::async_trait;
use vacancy_store::ChatId;

/// A text message received from a channel.
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    /// Unique message ID (e.g. `telegram_{chat_id}_{message_id}`).
    pub id: String,
    /// Sender identifier (username or user id) for logs.
    pub sender: String,
    /// Chat the message came from; replies go back here.
    pub chat_id: ChatId,
    /// Reply target for [`Channel::send`] (for Telegram, the chat id as text).
    pub recipient: String,
    /// Message text content.
    pub content: String,
    /// Channel name (e.g. `telegram`).
    pub channel: String,
    /// Unix timestamp.
    pub timestamp: u64,
}

/// Core channel trait: inbound long-running listener plus outbound send.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Send a message through this channel.
    async fn send(&self, message: &str, recipient: &str) -> anyhow::Result<()>;

    /// Start listening for incoming messages (long-running).
    ///
    /// Returns `Ok(())` once the receiving side of `tx` is dropped.
    async fn listen(&self, tx: tokio::sync::mpsc::Sender<ChannelMessage>) -> anyhow::Result<()>;

    /// Check if channel is healthy.
    async fn health_check(&self) -> bool {
        true
    }
}
