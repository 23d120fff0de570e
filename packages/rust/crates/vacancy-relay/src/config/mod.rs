//! Config namespace: YAML settings loading and env/settings/default resolution.

mod resolve;
mod settings;

pub(crate) use resolve::{resolve_string, resolve_u32, resolve_u64, resolve_usize, resolve_with};
pub use settings::{
    RelaySettings, SearchSettings, StorageSettings, TelegramSettings, WorkerSettings,
    load_relay_settings, load_relay_settings_from_paths, relay_settings_paths,
    set_config_home_override,
};
