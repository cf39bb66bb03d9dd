//! The collaborator interface the presentation layer talks to.
//!
//! [`HabitClock`] owns the habit list, the streak records, the rollover
//! check and the pomodoro engine. Commands validate their input, mutate,
//! persist and queue [`Event`]s; the presentation layer reads state through
//! the query methods and drains events to refresh.
//!
//! Everything runs on the caller's thread. Drivers call
//! [`HabitClock::poll_rollover`] once per minute and
//! [`HabitClock::pomodoro_tick`] once per second; neither blocks and the
//! tick never touches the disk.
//!
//! The last observed date is not persisted. Opening a `HabitClock` seeds it
//! with today's date, so checkmarks saved on an earlier day survive a
//! reopen until some long-running driver sees the date change.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::{PersistenceError, ValidationError};
use crate::events::Event;
use crate::habits::{normalize_name, HabitStore};
use crate::rollover::{next_reset_countdown, ResetCountdown, RolloverEffect, RolloverScheduler};
use crate::storage::StoragePaths;
use crate::streak::{StreakRecord, StreakTracker};
use crate::timer::{BreakMinutes, PomodoroEngine, PomodoroState, WorkMinutes};

/// One row of the habit list as the presentation layer shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitView {
    pub name: String,
    pub completed_today: bool,
    pub streak: u32,
}

pub struct HabitClock<C: Clock = SystemClock> {
    habits: HabitStore,
    streaks: StreakTracker,
    rollover: RolloverScheduler,
    pomodoro: PomodoroEngine,
    clock: C,
    events: VecDeque<Event>,
}

impl HabitClock<SystemClock> {
    /// Open both record files with the local system clock.
    pub fn open(paths: &StoragePaths, work: WorkMinutes, brk: BreakMinutes) -> Self {
        Self::with_clock(paths, work, brk, SystemClock)
    }
}

impl<C: Clock> HabitClock<C> {
    pub fn with_clock(paths: &StoragePaths, work: WorkMinutes, brk: BreakMinutes, clock: C) -> Self {
        let habits = HabitStore::load(&paths.habits_file);
        let streaks = StreakTracker::load(&paths.streaks_file);
        let rollover = RolloverScheduler::new(clock.today());
        tracing::debug!(
            habits = habits.len(),
            path = %paths.habits_file.display(),
            "habit clock opened"
        );
        Self {
            habits,
            streaks,
            rollover,
            pomodoro: PomodoroEngine::new(work, brk),
            clock,
            events: VecDeque::new(),
        }
    }

    // ── Habit commands ───────────────────────────────────────────────

    /// Append a habit. Returns its index.
    pub fn add_habit(&mut self, name: &str) -> Result<usize, ValidationError> {
        let name = normalize_name(name)?;
        let index = self.habits.add(&name).ok_or(ValidationError::EmptyName)?;
        self.push(Event::HabitAdded { name, index });
        self.collect_failures();
        Ok(index)
    }

    /// Rename the first habit named `old` and carry its streak record over.
    ///
    /// Renaming onto the name of another tracked habit replaces that
    /// habit's record with the moved one.
    pub fn rename_habit(&mut self, old: &str, new: &str) -> Result<(), ValidationError> {
        let new = normalize_name(new)?;
        if !self.habits.contains(old) {
            return Err(ValidationError::HabitNotFound(old.to_string()));
        }
        if let Some(renamed) = self.habits.rename(old, &new) {
            self.streaks.migrate(old, &renamed);
            self.push(Event::HabitRenamed {
                from: old.to_string(),
                to: renamed,
            });
        }
        self.collect_failures();
        Ok(())
    }

    /// Delete the first habit named `name` and forget its streak.
    pub fn delete_habit(&mut self, name: &str) -> Result<(), ValidationError> {
        let removed = self
            .habits
            .remove(name)
            .ok_or_else(|| ValidationError::HabitNotFound(name.to_string()))?;
        self.streaks.drop_record(&removed.name);
        self.push(Event::HabitRemoved { name: removed.name });
        self.collect_failures();
        Ok(())
    }

    /// Check or uncheck a habit, then evaluate today's streak.
    pub fn toggle_habit(&mut self, name: &str, completed: bool) -> Result<(), ValidationError> {
        if !self.habits.set_completion(name, completed) {
            return Err(ValidationError::HabitNotFound(name.to_string()));
        }
        self.push(Event::HabitToggled {
            name: name.to_string(),
            completed,
        });

        let today = self.clock.today();
        if let Some(habits) = self.streaks.evaluate(self.habits.entries(), today) {
            self.push(Event::StreaksIncremented { date: today, habits });
        }
        self.collect_failures();
        Ok(())
    }

    // ── Rollover ─────────────────────────────────────────────────────

    /// Compare the clock's date with the last one seen and clear every
    /// checkmark if it moved. Streaks are not touched.
    ///
    /// Returns true when a rollover happened.
    pub fn poll_rollover(&mut self) -> bool {
        let Some(RolloverEffect::ClearCompletions { from, to }) =
            self.rollover.poll(self.clock.today())
        else {
            return false;
        };
        let cleared = self.habits.clear_completions();
        tracing::info!(%from, %to, cleared, "daily rollover");
        self.push(Event::DailyRollover { from, to });
        self.collect_failures();
        true
    }

    pub fn last_observed_date(&self) -> chrono::NaiveDate {
        self.rollover.last_observed()
    }

    /// Display-only countdown to the next fixed reset hour.
    pub fn next_reset(&self, reset_hour: u32) -> ResetCountdown {
        next_reset_countdown(self.clock.now(), reset_hour)
    }

    // ── Pomodoro commands ────────────────────────────────────────────

    /// Returns true when the tick clock should be started.
    pub fn pomodoro_start(&mut self) -> bool {
        match self.pomodoro.start() {
            Some(event) => {
                self.push(event);
                true
            }
            None => false,
        }
    }

    pub fn pomodoro_pause(&mut self) {
        if let Some(event) = self.pomodoro.pause() {
            self.push(event);
        }
    }

    pub fn pomodoro_resume(&mut self) {
        if let Some(event) = self.pomodoro.resume() {
            self.push(event);
        }
    }

    /// Returns true when the tick clock should be stopped.
    pub fn pomodoro_stop(&mut self) -> bool {
        match self.pomodoro.stop() {
            Some(event) => {
                self.push(event);
                true
            }
            None => false,
        }
    }

    /// Returns true when a phase just completed.
    pub fn pomodoro_tick(&mut self) -> bool {
        match self.pomodoro.tick() {
            Some(event) => {
                if let Event::PhaseCompleted { from, to } = &event {
                    tracing::info!(?from, ?to, "pomodoro phase complete");
                }
                self.push(event);
                true
            }
            None => false,
        }
    }

    pub fn set_work_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.pomodoro.set_work_duration(WorkMinutes::new(minutes)?);
        Ok(())
    }

    pub fn set_break_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.pomodoro.set_break_duration(BreakMinutes::new(minutes)?);
        Ok(())
    }

    // ── Observations ─────────────────────────────────────────────────

    /// The habit list in display order, each with its streak.
    pub fn habits(&self) -> Vec<HabitView> {
        self.habits
            .entries()
            .iter()
            .map(|e| HabitView {
                name: e.name.clone(),
                completed_today: e.completed_today,
                streak: self.streaks.get(&e.name),
            })
            .collect()
    }

    pub fn streak(&self, name: &str) -> u32 {
        self.streaks.get(name)
    }

    pub fn streak_record(&self, name: &str) -> Option<&StreakRecord> {
        self.streaks.record(name)
    }

    /// `(habit, streak)` for every tracked record, ordered by name.
    pub fn stats(&self) -> Vec<(String, u32)> {
        self.streaks.stats()
    }

    pub fn pomodoro(&self) -> &PomodoroState {
        self.pomodoro.state()
    }

    pub fn pomodoro_engine(&self) -> &PomodoroEngine {
        &self.pomodoro
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Take every event queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    fn collect_failures(&mut self) {
        let failures: Vec<PersistenceError> = self
            .habits
            .take_failures()
            .into_iter()
            .chain(self.streaks.take_failures())
            .collect();
        for failure in failures {
            self.push(Event::PersistenceFailed {
                path: failure.path().display().to_string(),
                message: failure.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn open(dir: &tempfile::TempDir) -> HabitClock<FixedClock> {
        HabitClock::with_clock(
            &StoragePaths::in_dir(dir.path()),
            WorkMinutes::default(),
            BreakMinutes::default(),
            FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()),
        )
    }

    #[test]
    fn add_rejects_blank_at_the_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open(&dir);
        assert_eq!(app.add_habit("  "), Err(ValidationError::EmptyName));
        assert!(app.habits().is_empty());
        assert!(app.drain_events().is_empty());
    }

    #[test]
    fn unknown_names_report_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open(&dir);
        let missing = ValidationError::HabitNotFound("Ghost".into());
        assert_eq!(app.toggle_habit("Ghost", true), Err(missing.clone()));
        assert_eq!(app.delete_habit("Ghost"), Err(missing.clone()));
        assert_eq!(app.rename_habit("Ghost", "Spirit"), Err(missing));
    }

    #[test]
    fn rename_to_blank_is_rejected_before_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open(&dir);
        app.add_habit("Read").unwrap();
        assert_eq!(app.rename_habit("Read", " "), Err(ValidationError::EmptyName));
        assert_eq!(app.habits()[0].name, "Read");
    }

    #[test]
    fn events_follow_command_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open(&dir);
        app.add_habit("Read").unwrap();
        app.toggle_habit("Read", true).unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        assert_eq!(
            app.drain_events(),
            vec![
                Event::HabitAdded { name: "Read".into(), index: 0 },
                Event::HabitToggled { name: "Read".into(), completed: true },
                Event::StreaksIncremented { date, habits: vec!["Read".into()] },
            ]
        );
        assert!(app.drain_events().is_empty());
    }

    #[test]
    fn invalid_durations_never_reach_engine() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open(&dir);
        assert!(app.set_work_minutes(0).is_err());
        assert!(app.set_break_minutes(61).is_err());
        assert_eq!(app.pomodoro().remaining_secs, 25 * 60);

        app.set_work_minutes(45).unwrap();
        assert_eq!(app.pomodoro().remaining_secs, 45 * 60);
    }

    #[test]
    fn save_failures_surface_as_events() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let paths = StoragePaths::in_dir(&blocker);
        let mut app = HabitClock::with_clock(
            &paths,
            WorkMinutes::default(),
            BreakMinutes::default(),
            FixedClock::at_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()),
        );

        app.add_habit("Read").unwrap();
        let events = app.drain_events();
        assert!(matches!(events[0], Event::HabitAdded { .. }));
        assert!(matches!(events[1], Event::PersistenceFailed { .. }));
        assert_eq!(app.habits().len(), 1);
    }
}
