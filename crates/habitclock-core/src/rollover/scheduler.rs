use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Polling resolution for the date check.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Side effect requested by a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RolloverEffect {
    /// Uncheck every habit. Streak records are left alone.
    ClearCompletions { from: NaiveDate, to: NaiveDate },
}

/// Pure transition: the state is the last observed date, the event is a
/// poll carrying the current date.
pub fn transition(last_observed: NaiveDate, today: NaiveDate) -> (NaiveDate, Option<RolloverEffect>) {
    if today == last_observed {
        (last_observed, None)
    } else {
        (
            today,
            Some(RolloverEffect::ClearCompletions {
                from: last_observed,
                to: today,
            }),
        )
    }
}

/// Remembers the last calendar date it saw.
///
/// Any change of date fires, including a clock moved backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverScheduler {
    last_observed: NaiveDate,
}

impl RolloverScheduler {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            last_observed: today,
        }
    }

    pub fn last_observed(&self) -> NaiveDate {
        self.last_observed
    }

    /// Call once per [`POLL_INTERVAL`] with the current local date.
    pub fn poll(&mut self, today: NaiveDate) -> Option<RolloverEffect> {
        let (next, effect) = transition(self.last_observed, today);
        self.last_observed = next;
        effect
    }
}
