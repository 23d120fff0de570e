//! Time-windowed set of vacancy ids already notified.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Per-worker dedup cache shared by that worker's concurrent searches.
///
/// Check-and-insert is one critical section, so two searches returning the same id
/// notify at most once.
#[derive(Debug)]
pub struct VacancyDedupCache {
    retention: Duration,
    seen: Mutex<HashMap<String, Instant>>,
}

impl VacancyDedupCache {
    /// Empty cache evicting ids older than `retention` on sweep.
    pub fn new(retention: Duration) -> Self {
        Self {
            retention,
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Record `vacancy_id`; returns `true` only the first time within the retention window.
    pub fn mark_if_new(&self, vacancy_id: &str) -> bool {
        self.mark_if_new_at(vacancy_id, Instant::now())
    }

    #[doc(hidden)]
    pub fn mark_if_new_at(&self, vacancy_id: &str, now: Instant) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        if seen.contains_key(vacancy_id) {
            return false;
        }
        seen.insert(vacancy_id.to_string(), now);
        true
    }

    /// Evict ids first seen more than the retention window ago. Returns the eviction count.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    #[doc(hidden)]
    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        let before = seen.len();
        seen.retain(|_, first_seen| now.saturating_duration_since(*first_seen) <= self.retention);
        before - seen.len()
    }

    /// Whether `vacancy_id` is currently cached.
    pub fn contains(&self, vacancy_id: &str) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(vacancy_id)
    }

    /// Number of cached ids.
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured retention window.
    pub fn retention(&self) -> Duration {
        self.retention
    }
}
