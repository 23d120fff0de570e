use std::time::Duration;

use anyhow::Context;

use super::TelegramChannel;
use super::chunking::split_message_for_telegram;
use super::constants::{TELEGRAM_CHUNK_SEND_PAUSE_MS, TELEGRAM_PARSE_MODE_HTML};
use super::error::SendFailureKind;

impl TelegramChannel {
    /// Send `message` chunk by chunk as HTML. A chunk whose markup Telegram rejects is
    /// resent once as plain text.
    pub(super) async fn send_text(&self, message: &str, recipient: &str) -> anyhow::Result<()> {
        let chunks = split_message_for_telegram(message);
        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(Duration::from_millis(TELEGRAM_CHUNK_SEND_PAUSE_MS)).await;
            }
            self.send_chunk(recipient, chunk)
                .await
                .with_context(|| format!("Telegram sendMessage to {recipient} failed"))?;
        }
        Ok(())
    }

    async fn send_chunk(&self, recipient: &str, chunk: &str) -> anyhow::Result<()> {
        let Err(html_error) = self
            .send_message_with_mode(recipient, chunk, Some(TELEGRAM_PARSE_MODE_HTML))
            .await
        else {
            return Ok(());
        };
        if html_error.kind() != SendFailureKind::MarkupRejected {
            return Err(html_error.into());
        }
        tracing::warn!(
            recipient,
            error = %html_error,
            "Telegram rejected HTML entities; resending as plain text"
        );
        self.send_message_with_mode(recipient, chunk, None)
            .await
            .map_err(|plain_error| {
                anyhow::anyhow!("plain text fallback failed: {plain_error} (html: {html_error})")
            })
    }
}
