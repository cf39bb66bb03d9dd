use chrono::{Duration, NaiveDateTime, NaiveTime};

/// Hour of day shown as the "next reset" boundary.
pub const DEFAULT_RESET_HOUR: u32 = 3;

/// Time left until the displayed reset boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetCountdown {
    pub remaining: Duration,
    /// Within the last hour before the boundary.
    pub is_imminent: bool,
}

impl ResetCountdown {
    pub fn hours(&self) -> i64 {
        self.remaining.num_hours()
    }

    pub fn minutes(&self) -> i64 {
        self.remaining.num_minutes() % 60
    }

    /// `"5h 07m"`.
    pub fn label(&self) -> String {
        format!("{}h {:02}m", self.hours(), self.minutes())
    }
}

/// Countdown from `now` to the next `reset_hour`:00. At exactly the
/// boundary the next one is a day away. Hours past 23 are clamped.
pub fn next_reset_countdown(now: NaiveDateTime, reset_hour: u32) -> ResetCountdown {
    let boundary = NaiveTime::from_hms_opt(reset_hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let mut next = now.date().and_time(boundary);
    if now >= next {
        next += Duration::days(1);
    }
    let remaining = next - now;
    ResetCountdown {
        remaining,
        is_imminent: remaining.num_minutes() <= 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn before_boundary_counts_to_same_day() {
        let c = next_reset_countdown(at(1, 30), DEFAULT_RESET_HOUR);
        assert_eq!(c.remaining, Duration::minutes(90));
        assert_eq!(c.label(), "1h 30m");
        assert!(!c.is_imminent);
    }

    #[test]
    fn at_or_after_boundary_counts_to_tomorrow() {
        let c = next_reset_countdown(at(3, 0), DEFAULT_RESET_HOUR);
        assert_eq!(c.remaining, Duration::hours(24));

        let c = next_reset_countdown(at(22, 55), DEFAULT_RESET_HOUR);
        assert_eq!(c.label(), "4h 05m");
    }

    #[test]
    fn last_hour_is_imminent() {
        assert!(next_reset_countdown(at(2, 0), DEFAULT_RESET_HOUR).is_imminent);
        assert!(!next_reset_countdown(at(1, 59), DEFAULT_RESET_HOUR).is_imminent);
    }
}
