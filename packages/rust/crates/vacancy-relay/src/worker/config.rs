//! Worker timing configuration.

use std::time::Duration;

use crate::config::{WorkerSettings, resolve_u64, resolve_with};

use super::active_hours::ActiveHours;

const DEFAULT_SEARCH_INTERVAL_SECS: u64 = 60;
const DEFAULT_ACTIVE_HOURS_START: u32 = 4;
const DEFAULT_ACTIVE_HOURS_END: u32 = 19;
const DEFAULT_UTC_OFFSET_HOURS: i32 = 3;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_RETENTION_SECS: u64 = 72 * 60 * 60;
const DEFAULT_PERIOD_DAYS: u32 = 1;

/// Timing shared by every chat worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Period of the search tick.
    pub search_interval: Duration,
    /// Window in which search ticks actually search.
    pub active_hours: ActiveHours,
    /// Period of the dedup sweep tick.
    pub sweep_interval: Duration,
    /// Age after which a notified vacancy id may be notified again.
    pub retention: Duration,
    /// Recency filter passed to the searcher, in days.
    pub period_days: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            search_interval: Duration::from_secs(DEFAULT_SEARCH_INTERVAL_SECS),
            active_hours: ActiveHours::new(
                DEFAULT_ACTIVE_HOURS_START,
                DEFAULT_ACTIVE_HOURS_END,
                DEFAULT_UTC_OFFSET_HOURS,
            ),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            retention: Duration::from_secs(DEFAULT_RETENTION_SECS),
            period_days: DEFAULT_PERIOD_DAYS,
        }
    }
}

impl WorkerConfig {
    /// Resolve through an arbitrary env lookup.
    pub fn from_lookup<F>(lookup: F, settings: Option<&WorkerSettings>, period_days: u32) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let start = resolve_with(
            &lookup,
            "VACANCY_RELAY_WORKER_ACTIVE_HOURS_START",
            settings.and_then(|s| s.active_hours_start),
            DEFAULT_ACTIVE_HOURS_START,
            |hour| hour < 24,
        );
        let end = resolve_with(
            &lookup,
            "VACANCY_RELAY_WORKER_ACTIVE_HOURS_END",
            settings.and_then(|s| s.active_hours_end),
            DEFAULT_ACTIVE_HOURS_END,
            |hour| hour <= 24,
        );
        let offset = resolve_with(
            &lookup,
            "VACANCY_RELAY_WORKER_UTC_OFFSET_HOURS",
            settings.and_then(|s| s.utc_offset_hours),
            DEFAULT_UTC_OFFSET_HOURS,
            |hours| (-23..=23).contains(&hours),
        );
        Self {
            search_interval: Duration::from_secs(resolve_u64(
                &lookup,
                "VACANCY_RELAY_WORKER_SEARCH_INTERVAL_SECS",
                settings.and_then(|s| s.search_interval_secs),
                DEFAULT_SEARCH_INTERVAL_SECS,
            )),
            active_hours: ActiveHours::new(start, end, offset),
            sweep_interval: Duration::from_secs(resolve_u64(
                &lookup,
                "VACANCY_RELAY_WORKER_SWEEP_INTERVAL_SECS",
                settings.and_then(|s| s.sweep_interval_secs),
                DEFAULT_SWEEP_INTERVAL_SECS,
            )),
            retention: Duration::from_secs(resolve_u64(
                &lookup,
                "VACANCY_RELAY_WORKER_RETENTION_SECS",
                settings.and_then(|s| s.retention_secs),
                DEFAULT_RETENTION_SECS,
            )),
            period_days: period_days.max(1),
        }
    }

    /// Same config with a different search interval.
    #[must_use]
    pub fn with_search_interval(self, search_interval: Duration) -> Self {
        Self {
            search_interval,
            ..self
        }
    }
}
