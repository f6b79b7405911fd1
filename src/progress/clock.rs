//! Injected time source for the engine
//!
//! All streak arithmetic, review scheduling, and daily-challenge keying read
//! time through the `Clock` trait so time-dependent behavior stays
//! deterministic under test.
//! - Day keys: "YYYY-MM-DD" in local time
//! - Timestamps: Unix epoch milliseconds

use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Source of "now" for every time-dependent operation.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> DateTime<Local>;

    /// Current Unix timestamp in milliseconds.
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Today's day key ("YYYY-MM-DD", local time).
    fn today_key(&self) -> String {
        day_key(&self.now())
    }
}

/// Wall-clock implementation used by the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Settable clock for tests and simulations.
pub struct FixedClock {
    now: Mutex<DateTime<Local>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Build from local calendar components.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let now = Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .expect("valid local datetime");
        Self::new(now)
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock().expect("clock lock") = now;
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().expect("clock lock");
        *now += chrono::Duration::days(days);
    }

    pub fn advance(&self, duration: chrono::Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += duration;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().expect("clock lock")
    }
}

/// Format a local datetime as a day key ("YYYY-MM-DD").
pub fn day_key(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Parse a day key back into a calendar date.
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Local calendar date of a Unix-millisecond timestamp.
pub fn local_date(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.with_timezone(&Local).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_key_roundtrip() {
        let clock = FixedClock::at(2026, 3, 5, 14, 30);
        let key = clock.today_key();
        assert_eq!(key, "2026-03-05");
        let date = parse_day_key(&key).unwrap();
        assert_eq!(date, clock.now().date_naive());
    }

    #[test]
    fn test_parse_day_key_rejects_garbage() {
        assert!(parse_day_key("not-a-date").is_none());
        assert!(parse_day_key("2026-13-40").is_none());
    }

    #[test]
    fn test_local_date_matches_clock() {
        let clock = FixedClock::at(2026, 3, 5, 23, 59);
        let date = local_date(clock.now_ms()).unwrap();
        assert_eq!(date, clock.now().date_naive());
    }

    #[test]
    fn test_advance_days() {
        let clock = FixedClock::at(2026, 2, 27, 9, 0);
        clock.advance_days(3);
        assert_eq!(clock.today_key(), "2026-03-02");
    }
}
