//! Integration tests for the habit list, streak accounting and the daily
//! rollover, driven through the facade against real files.

use chrono::{Duration, NaiveDate};
use habitclock_core::{
    BreakMinutes, Event, FixedClock, HabitClock, StoragePaths, WorkMinutes,
};
use std::rc::Rc;
use tempfile::TempDir;

fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn clock_at(date: NaiveDate) -> Rc<FixedClock> {
    Rc::new(FixedClock::at_date(date))
}

fn open(dir: &TempDir, clock: &Rc<FixedClock>) -> HabitClock<Rc<FixedClock>> {
    HabitClock::with_clock(
        &StoragePaths::in_dir(dir.path()),
        WorkMinutes::default(),
        BreakMinutes::default(),
        Rc::clone(clock),
    )
}

fn read(dir: &TempDir, file: &str) -> String {
    std::fs::read_to_string(dir.path().join(file)).unwrap_or_default()
}

#[test]
fn completing_every_habit_starts_streaks() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock_at(start_day());
    let mut app = open(&dir, &clock);

    app.add_habit("Read").unwrap();
    app.add_habit("Exercise").unwrap();

    app.toggle_habit("Read", true).unwrap();
    assert!(app.stats().is_empty());
    assert_eq!(app.streak("Read"), 0);

    app.toggle_habit("Exercise", true).unwrap();
    assert_eq!(app.streak("Read"), 1);
    assert_eq!(app.streak("Exercise"), 1);
    assert_eq!(
        app.streak_record("Read").unwrap().last_completed_date,
        Some(start_day())
    );
    assert_eq!(
        app.streak_record("Exercise").unwrap().last_completed_date,
        Some(start_day())
    );

    // Re-checking an already checked habit does not count the day again.
    app.toggle_habit("Read", true).unwrap();
    assert_eq!(app.streak("Read"), 1);

    assert_eq!(read(&dir, "habits.txt"), "1|Read\n1|Exercise\n");
    assert_eq!(
        read(&dir, "habits_meta.txt"),
        "Exercise|1|2026-10-16\nRead|1|2026-10-16\n"
    );
}

#[test]
fn rapid_toggling_never_double_counts_or_decrements() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock_at(start_day());
    let mut app = open(&dir, &clock);
    app.add_habit("Read").unwrap();
    app.add_habit("Walk").unwrap();
    app.toggle_habit("Read", true).unwrap();
    app.toggle_habit("Walk", true).unwrap();

    for _ in 0..5 {
        app.toggle_habit("Walk", false).unwrap();
        assert_eq!(app.streak("Walk"), 1);
        assert_eq!(app.streak("Read"), 1);
        app.toggle_habit("Walk", true).unwrap();
    }

    let increments = app
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, Event::StreaksIncremented { .. }))
        .count();
    assert_eq!(increments, 1);
}

#[test]
fn habit_added_after_counted_day_waits_for_tomorrow() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock_at(start_day());
    let mut app = open(&dir, &clock);
    app.add_habit("Read").unwrap();
    app.toggle_habit("Read", true).unwrap();
    assert_eq!(app.streak("Read"), 1);

    app.add_habit("Meditate").unwrap();
    app.toggle_habit("Meditate", true).unwrap();
    assert_eq!(app.streak("Read"), 1);
    assert_eq!(app.streak("Meditate"), 0);
}

#[test]
fn rollover_clears_checkmarks_but_keeps_streaks() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Rc::new(FixedClock::new(start_day().and_hms_opt(23, 58, 0).unwrap()));
    let mut app = open(&dir, &clock);
    app.add_habit("Read").unwrap();
    app.add_habit("Walk").unwrap();
    app.toggle_habit("Read", true).unwrap();
    app.toggle_habit("Walk", true).unwrap();

    clock.advance(Duration::minutes(1));
    assert!(!app.poll_rollover());

    clock.advance(Duration::minutes(1));
    assert!(app.poll_rollover());
    assert!(!app.poll_rollover());

    assert!(app.habits().iter().all(|h| !h.completed_today));
    assert_eq!(read(&dir, "habits.txt"), "0|Read\n0|Walk\n");
    assert_eq!(
        app.streak_record("Read").unwrap().last_completed_date,
        Some(start_day())
    );
    assert_eq!(app.streak("Walk"), 1);
    assert!(app.drain_events().contains(&Event::DailyRollover {
        from: start_day(),
        to: start_day() + Duration::days(1),
    }));
}

#[test]
fn streak_grows_across_consecutive_days() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock_at(start_day());
    let mut app = open(&dir, &clock);
    app.add_habit("Read").unwrap();
    app.add_habit("Walk").unwrap();

    for day in 1..=3 {
        app.toggle_habit("Read", true).unwrap();
        app.toggle_habit("Walk", true).unwrap();
        assert_eq!(app.streak("Read"), day);
        clock.advance_days(1);
        assert!(app.poll_rollover());
    }

    let views = app.habits();
    assert_eq!(views[0].streak, 3);
    assert_eq!(views[1].streak, 3);
}

#[test]
fn rename_carries_streak_to_new_name() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock_at(start_day());
    let mut app = open(&dir, &clock);
    app.add_habit("Read").unwrap();
    app.toggle_habit("Read", true).unwrap();

    app.rename_habit("Read", "  Read fiction ").unwrap();
    assert_eq!(app.streak("Read fiction"), 1);
    assert_eq!(app.streak("Read"), 0);
    assert!(app.streak_record("Read").is_none());
    assert_eq!(read(&dir, "habits.txt"), "1|Read fiction\n");
    assert_eq!(read(&dir, "habits_meta.txt"), "Read fiction|1|2026-10-16\n");
}

#[test]
fn rename_onto_tracked_name_overwrites_its_record() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock_at(start_day());
    let mut app = open(&dir, &clock);
    app.add_habit("Read").unwrap();
    app.add_habit("Walk").unwrap();
    app.toggle_habit("Read", true).unwrap();
    app.toggle_habit("Walk", true).unwrap();
    clock.advance_days(1);
    app.poll_rollover();
    app.delete_habit("Walk").unwrap();
    app.toggle_habit("Read", true).unwrap();
    assert_eq!(app.streak("Read"), 2);

    app.add_habit("Walk").unwrap();
    app.toggle_habit("Walk", true).unwrap();
    assert_eq!(app.streak("Walk"), 0);

    app.rename_habit("Read", "Walk").unwrap();
    assert_eq!(app.streak("Walk"), 2);
    assert_eq!(app.stats(), vec![("Walk".to_string(), 2)]);
}

#[test]
fn delete_drops_streak_record() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock_at(start_day());
    let mut app = open(&dir, &clock);
    app.add_habit("Read").unwrap();
    app.add_habit("Walk").unwrap();
    app.toggle_habit("Read", true).unwrap();
    app.toggle_habit("Walk", true).unwrap();

    app.delete_habit("Read").unwrap();
    assert_eq!(app.stats(), vec![("Walk".to_string(), 1)]);
    assert_eq!(read(&dir, "habits.txt"), "1|Walk\n");
    assert_eq!(read(&dir, "habits_meta.txt"), "Walk|1|2026-10-16\n");
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock_at(start_day());
    {
        let mut app = open(&dir, &clock);
        app.add_habit(" Read ").unwrap();
        app.add_habit("Push|Pull").unwrap();
        app.toggle_habit("Read", true).unwrap();
        app.toggle_habit("Push|Pull", true).unwrap();
    }

    let mut app = open(&dir, &clock);
    let views = app.habits();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].name, "Read");
    assert_eq!(views[1].name, "Push|Pull");
    assert!(views.iter().all(|v| v.completed_today && v.streak == 1));

    // Day guard is restored from disk too.
    app.toggle_habit("Read", false).unwrap();
    app.toggle_habit("Read", true).unwrap();
    assert_eq!(app.streak("Read"), 1);
}

#[test]
fn malformed_files_load_what_they_can() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("habits.txt"), b"1|Read\n???\n0|Caf\xE9\n0|Walk\n").unwrap();
    std::fs::write(
        dir.path().join("habits_meta.txt"),
        "Read|4|2026-10-15\nWalk|lots|\n",
    )
    .unwrap();

    let clock = clock_at(start_day());
    let mut app = open(&dir, &clock);
    assert_eq!(app.habits().len(), 2);
    assert_eq!(app.streak("Read"), 4);
    assert_eq!(app.streak("Walk"), 0);

    app.toggle_habit("Walk", true).unwrap();
    assert_eq!(app.streak("Read"), 5);
    assert_eq!(app.streak("Walk"), 1);
    assert_eq!(read(&dir, "habits.txt"), "1|Read\n1|Walk\n");
}

#[test]
fn reopen_on_a_later_day_keeps_checkmarks_until_polled() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock_at(start_day());
    {
        let mut app = open(&dir, &clock);
        app.add_habit("Read").unwrap();
        app.add_habit("Walk").unwrap();
        app.toggle_habit("Read", true).unwrap();
    }

    clock.advance_days(1);
    let mut app = open(&dir, &clock);
    assert_eq!(app.last_observed_date(), start_day() + Duration::days(1));
    assert!(app.habits()[0].completed_today);
    assert!(!app.poll_rollover());
    assert!(app.habits()[0].completed_today);
}
