//! Streak repository and the "all habits done" evaluation.
//!
//! A streak only advances when every habit in the list is checked, and at
//! most once per calendar date across the whole list. Unchecking never
//! decrements.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::PersistenceError;
use crate::habits::HabitEntry;
use crate::storage::RecordFile;

use super::{codec, StreakRecord};

/// Result of evaluating the habit list for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    /// No habits at all.
    NoHabits,
    /// At least one habit is still unchecked.
    Incomplete,
    /// Some record was already incremented on this date.
    AlreadyCounted,
    /// Increment these keys, in list order, without duplicates.
    Increment(Vec<String>),
}

/// Decide what the completion state of `habits` means for `today`.
///
/// The day guard is shared: if any tracked record was incremented on
/// `today`, the whole evaluation is skipped.
pub fn evaluate_day(
    records: &BTreeMap<String, StreakRecord>,
    habits: &[HabitEntry],
    today: NaiveDate,
) -> DayOutcome {
    if habits.is_empty() {
        return DayOutcome::NoHabits;
    }
    if !habits.iter().all(|h| h.completed_today) {
        return DayOutcome::Incomplete;
    }
    if records.values().any(|r| r.counted_on(today)) {
        return DayOutcome::AlreadyCounted;
    }

    let mut keys: Vec<String> = Vec::with_capacity(habits.len());
    for habit in habits {
        if !keys.contains(&habit.name) {
            keys.push(habit.name.clone());
        }
    }
    DayOutcome::Increment(keys)
}

/// Owns every [`StreakRecord`] and the streaks file.
#[derive(Debug)]
pub struct StreakTracker {
    records: BTreeMap<String, StreakRecord>,
    file: RecordFile,
}

impl StreakTracker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            records: BTreeMap::new(),
            file: RecordFile::new(path),
        }
    }

    /// Load records from `path`. Later lines win over earlier duplicates.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let file = RecordFile::new(path);
        let (decoded, skipped) = codec::decode(&file.read());
        for bad in &skipped {
            tracing::debug!(
                path = %file.path().display(),
                line = bad.line,
                reason = bad.reason,
                "skipping malformed streak record"
            );
        }
        let records = decoded
            .into_iter()
            .map(|r| (r.habit_key.clone(), r))
            .collect();
        Self { records, file }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Streak count for `key`, 0 when untracked.
    pub fn get(&self, key: &str) -> u32 {
        self.records.get(key).map(|r| r.streak_count).unwrap_or(0)
    }

    pub fn record(&self, key: &str) -> Option<&StreakRecord> {
        self.records.get(key)
    }

    /// All records, ordered by key.
    pub fn records(&self) -> impl Iterator<Item = &StreakRecord> {
        self.records.values()
    }

    /// `(habit, streak)` pairs for every tracked record, ordered by name.
    pub fn stats(&self) -> Vec<(String, u32)> {
        self.records
            .values()
            .map(|r| (r.habit_key.clone(), r.streak_count))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply today's increment if `habits` are all checked and the day has
    /// not been counted yet. Returns the keys that advanced.
    pub fn evaluate(&mut self, habits: &[HabitEntry], today: NaiveDate) -> Option<Vec<String>> {
        match evaluate_day(&self.records, habits, today) {
            DayOutcome::Increment(keys) => {
                for key in &keys {
                    self.records
                        .entry(key.clone())
                        .or_insert_with(|| StreakRecord::new(key.clone()))
                        .increment(today);
                }
                tracing::debug!(%today, habits = keys.len(), "all habits done; streaks advanced");
                self.save();
                Some(keys)
            }
            outcome => {
                tracing::trace!(%today, ?outcome, "streaks unchanged");
                None
            }
        }
    }

    /// Move the record under `old` to `new`, replacing any record already
    /// stored under `new`. Returns false when `old` is untracked.
    pub fn migrate(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.records.contains_key(old);
        }
        let Some(mut record) = self.records.remove(old) else {
            return false;
        };
        record.habit_key = new.to_string();
        if let Some(replaced) = self.records.insert(new.to_string(), record) {
            tracing::debug!(
                from = old,
                to = new,
                overwritten = replaced.streak_count,
                "rename collided with an existing streak record"
            );
        }
        self.save();
        true
    }

    /// Forget the record for `key`.
    pub fn drop_record(&mut self, key: &str) -> Option<StreakRecord> {
        let removed = self.records.remove(key)?;
        self.save();
        Some(removed)
    }

    /// Rewrite the streaks file.
    pub fn save(&mut self) -> bool {
        self.file.write(&codec::encode(self.records.values()))
    }

    pub fn take_failures(&mut self) -> Vec<PersistenceError> {
        self.file.take_failures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn habit(name: &str, done: bool) -> HabitEntry {
        HabitEntry {
            name: name.into(),
            completed_today: done,
        }
    }

    fn tracker_in(dir: &tempfile::TempDir) -> StreakTracker {
        StreakTracker::new(dir.path().join("habits_meta.txt"))
    }

    #[test]
    fn evaluate_day_outcomes() {
        let records = BTreeMap::new();
        assert_eq!(evaluate_day(&records, &[], day(1)), DayOutcome::NoHabits);
        assert_eq!(
            evaluate_day(&records, &[habit("Read", true), habit("Walk", false)], day(1)),
            DayOutcome::Incomplete
        );
        assert_eq!(
            evaluate_day(&records, &[habit("Read", true), habit("Read", true)], day(1)),
            DayOutcome::Increment(vec!["Read".into()])
        );
    }

    #[test]
    fn day_guard_is_shared_across_habits() {
        let mut records = BTreeMap::new();
        let mut counted = StreakRecord::new("Read");
        counted.increment(day(1));
        records.insert("Read".to_string(), counted);

        // "Walk" was never counted, but the day already was.
        let habits = [habit("Read", true), habit("Walk", true)];
        assert_eq!(evaluate_day(&records, &habits, day(1)), DayOutcome::AlreadyCounted);
        assert_eq!(
            evaluate_day(&records, &habits, day(2)),
            DayOutcome::Increment(vec!["Read".into(), "Walk".into()])
        );
    }

    #[test]
    fn increments_once_per_day() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_in(&dir);
        let done = [habit("Read", true), habit("Exercise", true)];

        assert_eq!(
            tracker.evaluate(&done, day(1)),
            Some(vec!["Read".to_string(), "Exercise".to_string()])
        );
        assert_eq!(tracker.evaluate(&done, day(1)), None);
        assert_eq!(tracker.get("Read"), 1);
        assert_eq!(tracker.record("Exercise").unwrap().last_completed_date, Some(day(1)));

        tracker.evaluate(&done, day(2));
        assert_eq!(tracker.get("Read"), 2);
        assert_eq!(tracker.get("Untracked"), 0);
    }

    #[test]
    fn incomplete_list_never_touches_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_in(&dir);
        tracker.evaluate(&[habit("Read", true)], day(1));

        assert_eq!(tracker.evaluate(&[habit("Read", false)], day(2)), None);
        assert_eq!(tracker.get("Read"), 1);
        assert_eq!(tracker.record("Read").unwrap().last_completed_date, Some(day(1)));
    }

    #[test]
    fn migrate_moves_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_in(&dir);
        tracker.evaluate(&[habit("Read", true), habit("Walk", true)], day(1));
        tracker.evaluate(&[habit("Read", true)], day(2));
        assert_eq!(tracker.get("Read"), 2);
        assert_eq!(tracker.get("Walk"), 1);

        assert!(tracker.migrate("Read", "Walk"));
        assert_eq!(tracker.get("Walk"), 2);
        assert!(tracker.record("Read").is_none());
        assert_eq!(tracker.record("Walk").unwrap().habit_key, "Walk");

        assert!(!tracker.migrate("Ghost", "Other"));
        assert!(tracker.record("Other").is_none());
    }

    #[test]
    fn drop_record_removes_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker_in(&dir);
        tracker.evaluate(&[habit("Read", true), habit("Walk", true)], day(1));

        assert!(tracker.drop_record("Read").is_some());
        assert!(tracker.drop_record("Read").is_none());
        assert_eq!(
            fs::read_to_string(tracker.path()).unwrap(),
            "Walk|1|2026-05-01\n"
        );
    }

    #[test]
    fn invalid_utf8_line_keeps_other_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits_meta.txt");
        fs::write(&path, b"Read|40|2026-01-01\n\xFF|1|\n").unwrap();

        let tracker = StreakTracker::load(&path);
        assert_eq!(tracker.get("Read"), 40);
    }

    #[test]
    fn bad_count_keeps_the_day_guard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits_meta.txt");
        fs::write(&path, "Read|x|2026-05-01\n").unwrap();

        let mut tracker = StreakTracker::load(&path);
        assert_eq!(tracker.get("Read"), 0);
        assert_eq!(tracker.record("Read").unwrap().last_completed_date, Some(day(1)));
        assert_eq!(tracker.evaluate(&[habit("Read", true)], day(1)), None);
        assert_eq!(tracker.evaluate(&[habit("Read", true)], day(2)), Some(vec!["Read".to_string()]));
        assert_eq!(tracker.get("Read"), 1);
    }

    #[test]
    fn load_restores_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits_meta.txt");
        fs::write(&path, "Read|12|2026-05-03\nbroken\nWalk|3|\n").unwrap();

        let tracker = StreakTracker::load(&path);
        assert_eq!(tracker.get("Read"), 12);
        assert_eq!(tracker.record("Read").unwrap().last_completed_date, Some(day(3)));
        assert_eq!(tracker.get("Walk"), 3);
        assert_eq!(
            tracker.stats(),
            vec![("Read".to_string(), 12), ("Walk".to_string(), 3)]
        );
    }
}
