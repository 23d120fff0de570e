//! Time-of-day window during which search ticks run.

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};

const SECS_PER_HOUR: i32 = 3600;

/// Hour range `[start, end)` in a fixed UTC offset. Wraps past midnight when `start > end`;
/// `start == end` covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveHours {
    start_hour: u32,
    end_hour: u32,
    offset: FixedOffset,
}

impl ActiveHours {
    /// Window `[start_hour, end_hour)` at `utc_offset_hours`.
    ///
    /// Hours are clamped to `0..=24`; an offset outside ±23h falls back to UTC.
    pub fn new(start_hour: u32, end_hour: u32, utc_offset_hours: i32) -> Self {
        let offset = utc_offset_hours
            .checked_mul(SECS_PER_HOUR)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!(utc_offset_hours, "invalid active-hours UTC offset; using UTC");
                Utc.fix()
            });
        Self {
            start_hour: start_hour.min(24),
            end_hour: end_hour.min(24),
            offset,
        }
    }

    /// Always active.
    pub fn always() -> Self {
        Self::new(0, 0, 0)
    }

    /// Whether searches should run now.
    pub fn is_active_now(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Whether searches should run at `instant`.
    pub fn is_active_at(&self, instant: DateTime<Utc>) -> bool {
        let hour = instant.with_timezone(&self.offset).hour();
        match self.start_hour.cmp(&self.end_hour) {
            std::cmp::Ordering::Equal => true,
            std::cmp::Ordering::Less => (self.start_hour..self.end_hour).contains(&hour),
            std::cmp::Ordering::Greater => hour >= self.start_hour || hour < self.end_hour,
        }
    }
}

impl std::fmt::Display for ActiveHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:00-{:02}:00 (UTC{})",
            self.start_hour, self.end_hour, self.offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_utc(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 30, 0)
            .single()
            .unwrap_or_else(|| panic!("valid timestamp"))
    }

    #[test]
    fn default_window_tracks_moscow_daytime() {
        let hours = ActiveHours::new(4, 19, 3);
        // 00:30 UTC is 03:30 at UTC+3.
        assert!(!hours.is_active_at(at_utc(0)));
        assert!(hours.is_active_at(at_utc(1)));
        assert!(hours.is_active_at(at_utc(15)));
        // 16:30 UTC is 19:30 at UTC+3.
        assert!(!hours.is_active_at(at_utc(16)));
    }

    #[test]
    fn window_wraps_past_midnight() {
        let hours = ActiveHours::new(22, 2, 0);
        assert!(hours.is_active_at(at_utc(23)));
        assert!(hours.is_active_at(at_utc(1)));
        assert!(!hours.is_active_at(at_utc(12)));
        assert!(ActiveHours::always().is_active_at(at_utc(3)));
    }
}
