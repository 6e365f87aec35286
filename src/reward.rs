use crate::constants::SECS_PER_MINUTE;
use std::time::Duration;

/// Coins paid for a stretch of undistracted study: one per whole minute.
pub fn coins_earned(studied: Duration) -> u64 {
    studied.as_secs() / SECS_PER_MINUTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_minutes_only() {
        assert_eq!(coins_earned(Duration::ZERO), 0);
        assert_eq!(coins_earned(Duration::from_secs(59)), 0);
        assert_eq!(coins_earned(Duration::from_secs(90)), 1);
        assert_eq!(coins_earned(Duration::from_secs(119)), 1);
        assert_eq!(coins_earned(Duration::from_secs(120)), 2);
        assert_eq!(coins_earned(Duration::from_millis(179_999)), 2);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = 0;
        for secs in (0..3_600).step_by(7) {
            let coins = coins_earned(Duration::from_secs(secs));
            assert!(coins >= previous, "coins dropped at {secs}s");
            previous = coins;
        }
    }
}
