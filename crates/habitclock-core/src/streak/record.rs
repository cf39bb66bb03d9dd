use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streak bookkeeping for one habit key.
///
/// `last_completed_date` is only ever set on the day the streak was
/// incremented and guards against a second increment that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub habit_key: String,
    pub streak_count: u32,
    pub last_completed_date: Option<NaiveDate>,
}

impl StreakRecord {
    pub fn new(habit_key: impl Into<String>) -> Self {
        Self {
            habit_key: habit_key.into(),
            streak_count: 0,
            last_completed_date: None,
        }
    }

    pub fn counted_on(&self, date: NaiveDate) -> bool {
        self.last_completed_date == Some(date)
    }

    pub(crate) fn increment(&mut self, date: NaiveDate) {
        self.streak_count = self.streak_count.saturating_add(1);
        self.last_completed_date = Some(date);
    }
}
