//! Time sources for the session timers and the day ledger.

use chrono::{Local, NaiveDate};
use std::time::Instant;

/// Monotonic and calendar time, injected so sessions can run on a
/// simulated clock.
pub trait Clock: Send + Sync {
    /// Monotonic instant used by stopwatches.
    fn now(&self) -> Instant;

    /// Local calendar date used to key day records.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
