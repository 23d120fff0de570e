use super::TelegramChannel;
use super::constants::TELEGRAM_SEND_MAX_RETRIES;
use super::error::{ApiEnvelope, SendFailureKind, TelegramApiError};

impl TelegramChannel {
    /// One `sendMessage`, retried on transient failures. `parse_mode: None` sends plain text.
    pub(super) async fn send_message_with_mode(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<&str>,
    ) -> Result<(), TelegramApiError> {
        let mut body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(mode) = parse_mode {
            body["parse_mode"] = serde_json::json!(mode);
        }

        let mut attempt = 0;
        loop {
            let error = match self.post_send_message(&body).await {
                Ok(()) => return Ok(()),
                Err(error) => error,
            };
            if attempt >= TELEGRAM_SEND_MAX_RETRIES || error.kind() != SendFailureKind::Transient {
                return Err(error);
            }
            let delay = error.retry_delay(attempt);
            tracing::warn!(
                attempt,
                chat_id,
                delay_ms = delay.as_millis(),
                parse_mode = parse_mode.unwrap_or("plain"),
                error = %error,
                "Telegram sendMessage failed transiently; retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn post_send_message(&self, body: &serde_json::Value) -> Result<(), TelegramApiError> {
        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(body)
            .send()
            .await
            .map_err(|error| TelegramApiError::transport(&error))?;

        let status = response.status();
        let raw = response.text().await.unwrap_or_default();
        let Ok(data) = serde_json::from_str::<serde_json::Value>(&raw) else {
            if status.is_success() {
                return Err(TelegramApiError::undecodable(&raw));
            }
            let envelope = ApiEnvelope {
                description: raw,
                ..ApiEnvelope::default()
            };
            return Err(TelegramApiError::response(status, envelope));
        };

        let ok = data
            .get("ok")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(status.is_success());
        if status.is_success() && ok {
            return Ok(());
        }
        Err(TelegramApiError::response(
            status,
            ApiEnvelope::from_json(&data, &raw),
        ))
    }
}
