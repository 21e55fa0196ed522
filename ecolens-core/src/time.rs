//! Clock abstraction
//!
//! Several engines depend on wall-clock time: stability classification needs
//! the hour of day, traffic simulation needs weekday and rush-hour windows, the
//! forecaster rolls hourly buckets, and the weather cache expires entries.
//! They all read time through [`Clock`] so tests can pin or advance it.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};

/// Source of "now"
pub trait Clock: Send + Sync {
    /// Current UTC time
    fn now(&self) -> DateTime<Utc>;

    /// Fractional hour of day (e.g. 8.5 at 08:30)
    fn fractional_hour(&self) -> f64 {
        fractional_hour(&self.now())
    }
}

/// Fractional hour of day for a timestamp
pub fn fractional_hour(at: &DateTime<Utc>) -> f64 {
    at.hour() as f64 + at.minute() as f64 / 60.0 + at.second() as f64 / 3600.0
}

/// System wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for testing
///
/// Clones share the same underlying instant, so a test can hand one clone to
/// an engine and advance time through another.
#[derive(Debug, Clone)]
pub struct FixedClock {
    millis: Arc<AtomicI64>,
}

impl FixedClock {
    /// Clock pinned at `at`
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(at.timestamp_millis())),
        }
    }

    /// Clock pinned at the given UTC calendar time
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let at = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::new(at)
    }

    /// Jump to an absolute instant
    pub fn set(&self, at: DateTime<Utc>) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        Utc.timestamp_millis_opt(millis).single().unwrap_or_else(Utc::now)
    }
}
