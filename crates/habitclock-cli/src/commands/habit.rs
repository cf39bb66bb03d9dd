use clap::Subcommand;
use habitclock_core::HabitView;

use super::{CliResult, Context};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit at the end of the list
    Add {
        /// Habit name (surrounding whitespace is trimmed)
        name: String,
    },
    /// Rename a habit, keeping its streak
    Rename {
        old: String,
        new: String,
    },
    /// Delete a habit and its streak
    Remove {
        name: String,
    },
    /// Mark a habit done for today
    Check {
        name: String,
    },
    /// Clear today's checkmark on a habit
    Uncheck {
        name: String,
    },
    /// List habits with their streaks.
    ///
    /// One-shot commands never clear yesterday's checkmarks. Keep `watch`
    /// or `timer run` running across midnight for that.
    List,
}

pub fn run(ctx: &Context, action: HabitAction) -> CliResult {
    let mut app = ctx.open();

    match action {
        HabitAction::Add { name } => {
            let index = app.add_habit(&name)?;
            if !ctx.json {
                println!("Added habit #{}: {}", index + 1, name.trim());
            }
        }
        HabitAction::Rename { old, new } => {
            app.rename_habit(&old, &new)?;
            if !ctx.json {
                println!("Renamed '{old}' to '{}'", new.trim());
            }
        }
        HabitAction::Remove { name } => {
            app.delete_habit(&name)?;
            if !ctx.json {
                println!("Removed habit: {name}");
            }
        }
        HabitAction::Check { name } => {
            app.toggle_habit(&name, true)?;
            if !ctx.json {
                println!("Checked: {name} (streak {})", app.streak(&name));
            }
        }
        HabitAction::Uncheck { name } => {
            app.toggle_habit(&name, false)?;
            if !ctx.json {
                println!("Unchecked: {name}");
            }
        }
        HabitAction::List => {
            let habits = app.habits();
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&habits)?);
            } else {
                print_list(&habits);
            }
            return Ok(());
        }
    }

    ctx.report_events(&mut app)
}

fn print_list(habits: &[HabitView]) {
    if habits.is_empty() {
        println!("No habits yet. Add one with `habitclock habit add <name>`.");
        return;
    }
    for habit in habits {
        let mark = if habit.completed_today { 'x' } else { ' ' };
        println!("[{mark}] {}  (streak {})", habit.name, habit.streak);
    }
}
