use std::time::Duration;

use super::constants::{TELEGRAM_HTTP_CONNECT_TIMEOUT_SECS, TELEGRAM_HTTP_TIMEOUT_SLACK_SECS};

pub(super) fn build_telegram_http_client(poll_timeout_secs: u64) -> reqwest::Client {
    let request_timeout =
        Duration::from_secs(poll_timeout_secs.saturating_add(TELEGRAM_HTTP_TIMEOUT_SLACK_SECS));
    match reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(TELEGRAM_HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(request_timeout)
        .build()
    {
        Ok(client) => client,
        Err(error) => {
            tracing::warn!(
                error = %error,
                "Failed to build Telegram HTTP client with timeouts; falling back to default client"
            );
            reqwest::Client::new()
        }
    }
}
