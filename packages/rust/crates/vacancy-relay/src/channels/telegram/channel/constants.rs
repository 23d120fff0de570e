/// Telegram's maximum message length for text messages.
pub const TELEGRAM_MAX_MESSAGE_LENGTH: usize = 4096;

pub(crate) const TELEGRAM_DEFAULT_API_BASE: &str = "https://api.telegram.org";
pub(super) const TELEGRAM_DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
pub(super) const TELEGRAM_DEFAULT_BATCH_SIZE: usize = 100;
pub(super) const TELEGRAM_DEFAULT_FETCH_INTERVAL_MS: u64 = 1_000;
pub(super) const TELEGRAM_POLL_RETRY_SECS: u64 = 5;
pub(super) const TELEGRAM_POLL_CONFLICT_RETRY_SECS: u64 = 2;
pub(super) const TELEGRAM_POLL_DEFAULT_RATE_LIMIT_RETRY_SECS: u64 = 1;
pub(super) const TELEGRAM_POLL_MAX_RATE_LIMIT_RETRY_SECS: u64 = 60;
pub(super) const TELEGRAM_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Added on top of the long-poll timeout so the HTTP client never cuts a poll short.
pub(super) const TELEGRAM_HTTP_TIMEOUT_SLACK_SECS: u64 = 10;
pub(super) const TELEGRAM_SEND_MAX_RETRIES: usize = 2;
pub(super) const TELEGRAM_SEND_RETRY_BASE_MS: u64 = 200;
pub(super) const TELEGRAM_SEND_RETRY_MAX_MS: u64 = 2_000;
pub(super) const TELEGRAM_CHUNK_SEND_PAUSE_MS: u64 = 100;
pub(super) const TELEGRAM_PARSE_MODE_HTML: &str = "HTML";
