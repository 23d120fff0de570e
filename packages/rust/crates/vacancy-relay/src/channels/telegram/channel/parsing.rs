use crate::channels::traits::ChannelMessage;

use super::TelegramChannel;

impl TelegramChannel {
    /// Parse a Telegram update into a channel message (returns None for non-text updates).
    pub fn parse_update_message(&self, update: &serde_json::Value) -> Option<ChannelMessage> {
        let message = update.get("message")?;
        let Some(text) = message.get("text").and_then(serde_json::Value::as_str) else {
            tracing::debug!(
                update_id = ?update.get("update_id"),
                "telegram update ignored: message without text"
            );
            return None;
        };

        let chat_id = message
            .get("chat")
            .and_then(|chat| chat.get("id"))
            .and_then(serde_json::Value::as_i64)?;
        let message_id = message
            .get("message_id")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or_default();

        let from = message.get("from");
        let sender = from
            .and_then(|f| f.get("username"))
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .or_else(|| {
                from.and_then(|f| f.get("id"))
                    .and_then(serde_json::Value::as_i64)
                    .map(|id| id.to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());
        let timestamp = message
            .get("date")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or_default();

        Some(ChannelMessage {
            id: format!("telegram_{chat_id}_{message_id}"),
            sender,
            chat_id,
            recipient: chat_id.to_string(),
            content: text.to_string(),
            channel: "telegram".to_string(),
            timestamp,
        })
    }
}
