use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the system produces an Event.
/// The presentation layer drains them to refresh what it shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    HabitAdded {
        name: String,
        index: usize,
    },
    HabitRenamed {
        from: String,
        to: String,
    },
    HabitRemoved {
        name: String,
    },
    HabitToggled {
        name: String,
        completed: bool,
    },
    /// Every habit was checked and today's increment was applied.
    StreaksIncremented {
        date: NaiveDate,
        habits: Vec<String>,
    },
    /// A new calendar day was observed and completion flags were cleared.
    DailyRollover {
        from: NaiveDate,
        to: NaiveDate,
    },
    /// A record file could not be written; in-memory state is unchanged.
    PersistenceFailed {
        path: String,
        message: String,
    },
    TimerStarted {
        phase: Phase,
        remaining_secs: u32,
    },
    TimerPaused {
        remaining_secs: u32,
    },
    TimerResumed {
        remaining_secs: u32,
    },
    TimerStopped {
        remaining_secs: u32,
    },
    /// A work or break interval ran out. Drives the audible cue.
    PhaseCompleted {
        from: Phase,
        to: Phase,
    },
    TimerSnapshot {
        phase: Phase,
        remaining_secs: u32,
        running: bool,
        paused: bool,
    },
}
