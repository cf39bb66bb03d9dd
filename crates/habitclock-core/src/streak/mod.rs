//! Per-habit streak counters keyed by habit name.

pub mod codec;
mod record;
mod tracker;

pub use record::StreakRecord;
pub use tracker::{evaluate_day, DayOutcome, StreakTracker};
