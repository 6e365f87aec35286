use crate::constants::LONG_DATE_FORMAT;
use crate::models::{date_key, duration_millis, format_hms};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Study totals for one calendar day.
///
/// `todays_balance_delta` is signed: spending coins on the same day can push
/// it below zero even though the wallet itself never goes negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    #[serde(with = "date_key")]
    pub date: NaiveDate,
    #[serde(with = "duration_millis")]
    pub time_studied_today: Duration,
    pub todays_balance_delta: i64,
}

impl DayRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            time_studied_today: Duration::ZERO,
            todays_balance_delta: 0,
        }
    }
}

impl fmt::Display for DayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.date.format(LONG_DATE_FORMAT))?;
        writeln!(f, "Time Studied: {}", format_hms(self.time_studied_today))?;
        write!(f, "Coins Earned: {} Coins", self.todays_balance_delta)
    }
}
