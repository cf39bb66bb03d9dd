//! # Habit Clock Core Library
//!
//! The non-visual logic of Habit Clock: a daily habit checklist with
//! streak accounting and a Pomodoro work/break timer. Any front end (the
//! bundled CLI, a desktop shell) is a thin layer that issues commands to
//! [`HabitClock`] and renders what it reports.
//!
//! ## Architecture
//!
//! - **Habit Store**: ordered habit list persisted as `<0|1>|<name>` lines
//! - **Streak Tracker**: per-habit streaks that advance once per day when
//!   every habit is checked, persisted as `<name>|<streak>|<date>` lines
//! - **Rollover**: a polled date check that clears checkmarks on a new day;
//!   the last seen date is kept in memory only, so a process must be running
//!   across the date change for the clear to happen
//! - **Pomodoro Engine**: a tick-driven work/break state machine with a pure
//!   transition function; the caller owns the one-second clock
//!
//! ## Key Components
//!
//! - [`HabitClock`]: the command/observation facade
//! - [`HabitStore`], [`StreakTracker`]: file-backed repositories
//! - [`RolloverScheduler`]: day-change detection
//! - [`PomodoroEngine`]: timer state machine
//! - [`Config`]: TOML configuration

pub mod app;
pub mod clock;
pub mod error;
pub mod events;
pub mod habits;
pub mod rollover;
pub mod storage;
pub mod streak;
pub mod timer;

pub use app::{HabitClock, HabitView};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, MalformedRecord, PersistenceError, ValidationError};
pub use events::Event;
pub use habits::{HabitEntry, HabitStore};
pub use rollover::{ResetCountdown, RolloverEffect, RolloverScheduler};
pub use storage::{Config, StoragePaths};
pub use streak::{StreakRecord, StreakTracker};
pub use timer::{BreakMinutes, Phase, PomodoroEngine, PomodoroState, TimerCommand, TimerEffect, WorkMinutes};
