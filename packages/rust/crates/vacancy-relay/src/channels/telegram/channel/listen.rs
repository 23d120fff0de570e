use std::time::Duration;

use tokio::sync::mpsc;

use crate::channels::traits::ChannelMessage;

use super::TelegramChannel;
use super::constants::{
    TELEGRAM_POLL_CONFLICT_RETRY_SECS, TELEGRAM_POLL_DEFAULT_RATE_LIMIT_RETRY_SECS,
    TELEGRAM_POLL_MAX_RATE_LIMIT_RETRY_SECS, TELEGRAM_POLL_RETRY_SECS,
};
use super::error::ApiEnvelope;

/// Result of one `getUpdates` round trip.
pub(super) enum PollOutcome {
    /// Raw update objects, possibly empty.
    Updates(Vec<serde_json::Value>),
    /// Transient failure; poll again after the delay.
    RetryAfter(Duration),
}

impl TelegramChannel {
    /// Long-poll until `tx` is closed or the token is rejected.
    ///
    /// The offset advances past every update, including the ones that carry no text, so
    /// Telegram never redelivers them.
    pub(super) async fn listen_updates(
        &self,
        tx: mpsc::Sender<ChannelMessage>,
    ) -> anyhow::Result<()> {
        let mut offset: i64 = 0;
        tracing::info!(
            timeout_secs = self.poll.timeout_secs,
            batch_size = self.poll.batch_size,
            "Telegram long polling started"
        );
        loop {
            let updates = match self.fetch_updates(offset).await? {
                PollOutcome::Updates(updates) if updates.is_empty() => {
                    if tx.is_closed() {
                        return Ok(());
                    }
                    tokio::time::sleep(self.poll.fetch_interval).await;
                    continue;
                }
                PollOutcome::Updates(updates) => updates,
                PollOutcome::RetryAfter(delay) => {
                    tokio::time::sleep(delay).await;
                    continue;
                }
            };

            let last_update_id = updates
                .iter()
                .filter_map(|update| update.get("update_id").and_then(serde_json::Value::as_i64))
                .max();
            if let Some(last) = last_update_id {
                offset = offset.max(last + 1);
            }
            for message in updates.iter().filter_map(|update| self.parse_update_message(update)) {
                if tx.send(message).await.is_err() {
                    tracing::debug!("inbound queue closed; Telegram listener exiting");
                    return Ok(());
                }
            }
        }
    }

    /// One `getUpdates` call. Only authorization failures are fatal.
    pub(super) async fn fetch_updates(&self, offset: i64) -> anyhow::Result<PollOutcome> {
        let body = serde_json::json!({
            "offset": offset,
            "limit": self.poll.batch_size,
            "timeout": self.poll.timeout_secs,
            "allowed_updates": ["message"]
        });
        let response = match self
            .client
            .post(self.api_url("getUpdates"))
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(error = %error, "Telegram getUpdates request failed");
                return Ok(PollOutcome::RetryAfter(Duration::from_secs(
                    TELEGRAM_POLL_RETRY_SECS,
                )));
            }
        };

        let status = response.status();
        let raw = response.text().await.unwrap_or_default();
        let Ok(data) = serde_json::from_str::<serde_json::Value>(&raw) else {
            tracing::warn!(%status, "Telegram getUpdates returned a non-JSON body");
            let envelope = ApiEnvelope {
                error_code: Some(i64::from(status.as_u16())),
                description: raw,
                retry_after_secs: None,
            };
            return poll_failure(&envelope);
        };

        let ok = data
            .get("ok")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(status.is_success());
        if !status.is_success() || !ok {
            let mut envelope = ApiEnvelope::from_json(&data, "unknown Telegram API error");
            envelope.error_code = envelope.error_code.or(Some(i64::from(status.as_u16())));
            return poll_failure(&envelope);
        }

        let updates = data
            .get("result")
            .and_then(serde_json::Value::as_array)
            .cloned()
            .unwrap_or_default();
        tracing::debug!(offset, count = updates.len(), "Telegram getUpdates batch");
        Ok(PollOutcome::Updates(updates))
    }

    pub(super) async fn health_probe(&self) -> bool {
        let probe = self.client.get(self.api_url("getMe")).send();
        matches!(
            tokio::time::timeout(Duration::from_secs(5), probe).await,
            Ok(Ok(response)) if response.status().is_success()
        )
    }
}

fn poll_failure(envelope: &ApiEnvelope) -> anyhow::Result<PollOutcome> {
    let code = envelope.error_code.unwrap_or_default();
    let description = envelope.description.as_str();
    let delay_secs = match code {
        401 | 403 => {
            anyhow::bail!("Telegram getUpdates rejected the bot token (code={code}): {description}");
        }
        409 => {
            tracing::warn!(
                description,
                "Telegram getUpdates conflict (409); another process polls this bot token"
            );
            TELEGRAM_POLL_CONFLICT_RETRY_SECS
        }
        429 => {
            let secs = envelope
                .retry_after_secs
                .unwrap_or(TELEGRAM_POLL_DEFAULT_RATE_LIMIT_RETRY_SECS)
                .clamp(1, TELEGRAM_POLL_MAX_RATE_LIMIT_RETRY_SECS);
            tracing::warn!(retry_after_secs = secs, description, "Telegram getUpdates rate limited");
            secs
        }
        _ => {
            tracing::warn!(code, description, "Telegram getUpdates failed");
            TELEGRAM_POLL_RETRY_SECS
        }
    };
    Ok(PollOutcome::RetryAfter(Duration::from_secs(delay_secs)))
}
