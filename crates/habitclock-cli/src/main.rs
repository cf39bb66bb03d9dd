use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitclock", version, about = "Habit Clock CLI")]
struct Cli {
    /// Directory holding config.toml and the record files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit list management.
    ///
    /// Checkmarks are only cleared by a running `watch` or `timer run`
    /// when the date changes, not by these one-shot commands.
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Streak statistics
    Stats,
    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Keep running and clear checkmarks whenever the date changes
    Watch,
    /// Time until the displayed daily reset
    ResetIn,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = commands::Context::new(cli.data_dir, cli.json).and_then(|ctx| match cli.command {
        Commands::Habit { action } => commands::habit::run(&ctx, action),
        Commands::Stats => commands::stats::run(&ctx),
        Commands::Timer { action } => commands::timer::run(&ctx, action),
        Commands::Watch => commands::watch::run(&ctx),
        Commands::ResetIn => commands::stats::reset_in(&ctx),
        Commands::Config { action } => commands::config::run(&ctx, action),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
