use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;

use super::constants::{
    TELEGRAM_POLL_MAX_RATE_LIMIT_RETRY_SECS, TELEGRAM_SEND_RETRY_BASE_MS,
    TELEGRAM_SEND_RETRY_MAX_MS,
};

/// Markers of an HTML entity rejection in a `400 Bad Request` description.
const ENTITY_ERROR_MARKERS: [&str; 4] = [
    "can't parse entities",
    "can't find end tag",
    "unsupported start tag",
    "unexpected end tag",
];

/// Error envelope of a Bot API response (`ok: false`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct ApiEnvelope {
    pub(super) error_code: Option<i64>,
    pub(super) description: String,
    pub(super) retry_after_secs: Option<u64>,
}

impl ApiEnvelope {
    /// Read `error_code`, `description` and `parameters.retry_after`; `fallback` fills an
    /// empty description.
    pub(super) fn from_json(data: &serde_json::Value, fallback: &str) -> Self {
        let description = data
            .get("description")
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.is_empty())
            .unwrap_or(fallback);
        Self {
            error_code: data.get("error_code").and_then(serde_json::Value::as_i64),
            description: description.to_string(),
            retry_after_secs: data
                .pointer("/parameters/retry_after")
                .and_then(serde_json::Value::as_u64),
        }
    }

    fn raw(description: String) -> Self {
        Self {
            description,
            ..Self::default()
        }
    }
}

/// How a failed `sendMessage` should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SendFailureKind {
    /// HTML markup rejected; resend the same text without `parse_mode`.
    MarkupRejected,
    /// Network error, timeout, rate limit or server error; retry with backoff.
    Transient,
    /// Anything else.
    Permanent,
}

/// Failed Bot API call: transport error or non-ok response.
#[derive(Debug)]
pub(super) struct TelegramApiError {
    pub(super) status: Option<StatusCode>,
    pub(super) envelope: ApiEnvelope,
}

impl TelegramApiError {
    pub(super) fn transport(err: &reqwest::Error) -> Self {
        let description = if err.is_timeout() {
            format!("timed out: {err}")
        } else {
            err.to_string()
        };
        Self {
            status: None,
            envelope: ApiEnvelope::raw(description),
        }
    }

    pub(super) fn response(status: StatusCode, envelope: ApiEnvelope) -> Self {
        Self {
            status: Some(status),
            envelope,
        }
    }

    pub(super) fn undecodable(body: &str) -> Self {
        Self {
            status: None,
            envelope: ApiEnvelope::raw(format!("failed to parse Telegram success response: {body}")),
        }
    }

    pub(super) fn kind(&self) -> SendFailureKind {
        let code = self.envelope.error_code;
        if self.status == Some(StatusCode::BAD_REQUEST) || code == Some(400) {
            let description = self.envelope.description.to_ascii_lowercase();
            return if ENTITY_ERROR_MARKERS
                .iter()
                .any(|marker| description.contains(marker))
            {
                SendFailureKind::MarkupRejected
            } else {
                SendFailureKind::Permanent
            };
        }
        let transient = match self.status {
            None => true,
            Some(status) => {
                status == StatusCode::TOO_MANY_REQUESTS
                    || status == StatusCode::REQUEST_TIMEOUT
                    || status.is_server_error()
            }
        } || code.is_some_and(|code| code == 429 || code >= 500);
        if transient {
            SendFailureKind::Transient
        } else {
            SendFailureKind::Permanent
        }
    }

    /// `retry_after` when Telegram sent one, otherwise capped exponential backoff.
    pub(super) fn retry_delay(&self, attempt: usize) -> Duration {
        if let Some(secs) = self.envelope.retry_after_secs {
            return Duration::from_secs(secs.min(TELEGRAM_POLL_MAX_RATE_LIMIT_RETRY_SECS));
        }
        let shift = u32::try_from(attempt.min(10)).unwrap_or(10);
        Duration::from_millis(
            TELEGRAM_SEND_RETRY_BASE_MS
                .saturating_mul(1_u64 << shift)
                .min(TELEGRAM_SEND_RETRY_MAX_MS),
        )
    }
}

impl fmt::Display for TelegramApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "status={status}, ")?;
        }
        if let Some(code) = self.envelope.error_code {
            write!(f, "error_code={code}, ")?;
        }
        write!(f, "{}", self.envelope.description)
    }
}

impl std::error::Error for TelegramApiError {}
