use super::SessionMode;
use crate::models::format_hms;
use std::fmt;
use std::time::Duration;

/// Outcome of a closed session.
///
/// `time_studied` is the gross duration written to the day record; coins
/// are paid on `net_time`, which excludes casual-mode distraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub mode: SessionMode,
    pub time_studied: Duration,
    pub time_distracted: Option<Duration>,
    pub net_time: Duration,
    pub coins_earned: u64,
    pub balance: u64,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total time studying: {}", format_hms(self.time_studied))?;
        if let Some(distracted) = self.time_distracted {
            writeln!(f, "Time Distracted: {}", format_hms(distracted))?;
            writeln!(f, "Net Time: {}", format_hms(self.net_time))?;
        }
        write!(f, "Earned {} Coins", self.coins_earned)
    }
}
