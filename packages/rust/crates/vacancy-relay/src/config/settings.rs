//! Runtime settings loader for vacancy-relay.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/vacancy-relay/settings.yaml`
//!
//! Merge precedence is user over system.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "vacancy-relay/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Merged YAML settings. Every field is optional; absent values fall through to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelaySettings {
    /// Telegram transport.
    #[serde(default)]
    pub telegram: TelegramSettings,
    /// hh.ru search client.
    #[serde(default)]
    pub search: SearchSettings,
    /// Per-chat worker timing.
    #[serde(default)]
    pub worker: WorkerSettings,
    /// Query persistence.
    #[serde(default)]
    pub storage: StorageSettings,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramSettings {
    pub bot_token: Option<String>,
    pub api_base_url: Option<String>,
    pub poll_timeout_secs: Option<u64>,
    pub batch_size: Option<usize>,
    pub fetch_interval_ms: Option<u64>,
    pub inbound_queue_capacity: Option<usize>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSettings {
    pub api_base_url: Option<String>,
    pub user_agent: Option<String>,
    pub period_days: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerSettings {
    pub search_interval_secs: Option<u64>,
    pub active_hours_start: Option<u32>,
    pub active_hours_end: Option<u32>,
    pub utc_offset_hours: Option<i32>,
    pub sweep_interval_secs: Option<u64>,
    pub retention_secs: Option<u64>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    pub dir: Option<String>,
}

impl RelaySettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            telegram: self.telegram.merge(overlay.telegram),
            search: self.search.merge(overlay.search),
            worker: self.worker.merge(overlay.worker),
            storage: self.storage.merge(overlay.storage),
        }
    }
}

impl TelegramSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            bot_token: overlay.bot_token.or(self.bot_token),
            api_base_url: overlay.api_base_url.or(self.api_base_url),
            poll_timeout_secs: overlay.poll_timeout_secs.or(self.poll_timeout_secs),
            batch_size: overlay.batch_size.or(self.batch_size),
            fetch_interval_ms: overlay.fetch_interval_ms.or(self.fetch_interval_ms),
            inbound_queue_capacity: overlay
                .inbound_queue_capacity
                .or(self.inbound_queue_capacity),
        }
    }
}

impl SearchSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            api_base_url: overlay.api_base_url.or(self.api_base_url),
            user_agent: overlay.user_agent.or(self.user_agent),
            period_days: overlay.period_days.or(self.period_days),
            request_timeout_secs: overlay.request_timeout_secs.or(self.request_timeout_secs),
        }
    }
}

impl WorkerSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            search_interval_secs: overlay.search_interval_secs.or(self.search_interval_secs),
            active_hours_start: overlay.active_hours_start.or(self.active_hours_start),
            active_hours_end: overlay.active_hours_end.or(self.active_hours_end),
            utc_offset_hours: overlay.utc_offset_hours.or(self.utc_offset_hours),
            sweep_interval_secs: overlay.sweep_interval_secs.or(self.sweep_interval_secs),
            retention_secs: overlay.retention_secs.or(self.retention_secs),
        }
    }
}

impl StorageSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            dir: overlay.dir.or(self.dir),
        }
    }
}

/// Load merged relay settings (user overrides system).
pub fn load_relay_settings() -> RelaySettings {
    let (system_path, user_path) = relay_settings_paths();
    load_relay_settings_from_paths(&system_path, &user_path)
}

/// `(system, user)` settings file locations.
///
/// The project root is `PRJ_ROOT` or the working directory. The config home is the `--conf`
/// override, then `PRJ_CONFIG_HOME`, then `.config`; relative homes sit under the root.
pub fn relay_settings_paths() -> (PathBuf, PathBuf) {
    let root = non_empty_env("PRJ_ROOT").map_or_else(
        || std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        PathBuf::from,
    );
    let config_home = CONFIG_HOME_OVERRIDE
        .get()
        .cloned()
        .or_else(|| non_empty_env("PRJ_CONFIG_HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_HOME_RELATIVE_PATH));
    // Path::join keeps absolute homes as they are.
    let user_path = root
        .join(config_home)
        .join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH), user_path)
}

/// Merge two settings files, `user` over `system`.
pub fn load_relay_settings_from_paths(system: &Path, user: &Path) -> RelaySettings {
    load_one(system).merge(load_one(user))
}

/// A missing file is silent; an unreadable or invalid one is logged and skipped.
fn load_one(path: &Path) -> RelaySettings {
    if !path.exists() {
        return RelaySettings::default();
    }
    std::fs::read_to_string(path)
        .map_err(|error| error.to_string())
        .and_then(|raw| serde_yaml::from_str(&raw).map_err(|error| error.to_string()))
        .unwrap_or_else(|error| {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "ignoring unreadable settings file"
            );
            RelaySettings::default()
        })
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
