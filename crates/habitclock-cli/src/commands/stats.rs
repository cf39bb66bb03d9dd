use serde_json::json;

use super::{CliResult, Context};

/// Streak table for every tracked habit.
pub fn run(ctx: &Context) -> CliResult {
    let app = ctx.open();
    let stats = app.stats();

    if ctx.json {
        let rows: Vec<_> = stats
            .iter()
            .map(|(habit, streak)| json!({ "habit": habit, "streak": streak }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if stats.is_empty() {
        println!("No streaks yet. Check off every habit in one day to start one.");
        return Ok(());
    }
    let width = stats.iter().map(|(h, _)| h.chars().count()).max().unwrap_or(5).max(5);
    println!("{:<width$}  Streak", "Habit");
    for (habit, streak) in &stats {
        println!("{habit:<width$}  {streak}");
    }
    Ok(())
}

/// Countdown to the fixed display hour. Checkmarks actually clear on any
/// date change seen by `watch`, not at this hour.
pub fn reset_in(ctx: &Context) -> CliResult {
    let app = ctx.open();
    let countdown = app.next_reset(ctx.config.rollover.display_reset_hour);

    if ctx.json {
        let out = json!({
            "remaining_secs": countdown.remaining.num_seconds(),
            "label": countdown.label(),
            "imminent": countdown.is_imminent,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Next reset in {}", countdown.label());
    }
    Ok(())
}
