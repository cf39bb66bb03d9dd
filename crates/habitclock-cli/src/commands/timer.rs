//! Live pomodoro timer.
//!
//! Everything runs on one current-thread runtime: the one-second tick, the
//! rollover poll and stdin commands are branches of a single `select!`, so
//! no two callbacks ever overlap.

use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use habitclock_core::timer::{format_remaining, phase_label};
use habitclock_core::{Event, HabitClock};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};

use super::{CliResult, Context};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the foreground.
    ///
    /// Type `p` to pause, `r` to resume, `s` to stop, `g` to start again,
    /// `q` to quit.
    Run {
        /// Work interval in minutes (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=120))]
        work: Option<u32>,
        /// Break interval in minutes (overrides config)
        #[arg(long = "break", value_parser = clap::value_parser!(u32).range(1..=60))]
        break_minutes: Option<u32>,
    },
    /// Print the configured durations as a timer snapshot
    Status,
}

pub fn run(ctx: &Context, action: TimerAction) -> CliResult {
    let mut app = ctx.open();

    match action {
        TimerAction::Run {
            work,
            break_minutes,
        } => {
            if let Some(minutes) = work {
                app.set_work_minutes(minutes)?;
            }
            if let Some(minutes) = break_minutes {
                app.set_break_minutes(minutes)?;
            }
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .enable_io()
                .build()?;
            runtime.block_on(run_loop(ctx, &mut app))
        }
        TimerAction::Status => {
            let snapshot = app.pomodoro_engine().snapshot();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
    }
}

enum Input {
    Pause,
    Resume,
    Stop,
    Start,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "p" | "pause" => Input::Pause,
        "r" | "resume" => Input::Resume,
        "s" | "stop" => Input::Stop,
        "g" | "go" | "start" => Input::Start,
        "q" | "quit" | "exit" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    }
}

async fn run_loop(ctx: &Context, app: &mut HabitClock) -> CliResult {
    let mut ticker = interval(Duration::from_secs(1));
    let mut rollover = interval(ctx.config.poll_interval());
    rollover.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut ticking = app.pomodoro_start();
    ticker.reset();
    report(ctx, app)?;

    loop {
        tokio::select! {
            _ = ticker.tick(), if ticking => {
                if app.pomodoro_tick() && ctx.config.pomodoro.bell && !ctx.json {
                    print!("\x07");
                }
                report(ctx, app)?;
            }
            _ = rollover.tick() => {
                app.poll_rollover();
                report(ctx, app)?;
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    None => stdin_open = false,
                    Some(line) => match parse_input(&line) {
                        Input::Pause => app.pomodoro_pause(),
                        Input::Resume => app.pomodoro_resume(),
                        Input::Stop => {
                            if app.pomodoro_stop() {
                                ticking = false;
                            }
                        }
                        Input::Start => {
                            if app.pomodoro_start() {
                                ticking = true;
                                ticker.reset();
                            }
                        }
                        Input::Quit => break,
                        Input::Unknown(cmd) if cmd.is_empty() => {}
                        Input::Unknown(cmd) => eprintln!("unknown command: {cmd}"),
                    },
                }
                report(ctx, app)?;
            }
            _ = &mut ctrl_c => break,
        }
    }

    if !ctx.json {
        println!();
    }
    Ok(())
}

/// Print queued events, then the countdown line.
fn report(ctx: &Context, app: &mut HabitClock) -> CliResult {
    if ctx.json {
        return ctx.report_events(app);
    }

    for event in app.drain_events() {
        match event {
            Event::PhaseCompleted { from, to } => {
                println!("\r{} finished. {} starts.          ", phase_label(from), phase_label(to));
            }
            Event::DailyRollover { to, .. } => {
                println!("\rNew day ({to}): habit checkmarks cleared.");
            }
            Event::PersistenceFailed { message, .. } => eprintln!("\rwarning: {message}"),
            _ => {}
        }
    }

    let state = app.pomodoro();
    let status = match (state.running, state.paused) {
        (false, _) => "stopped",
        (true, true) => "paused",
        (true, false) => "running",
    };
    print!(
        "\r[{}] {} ({status})   ",
        phase_label(state.phase),
        format_remaining(state.remaining_secs)
    );
    std::io::stdout().flush()?;
    Ok(())
}
