pub mod config;
pub mod habit;
pub mod stats;
pub mod timer;
pub mod watch;

use std::path::PathBuf;

use habitclock_core::storage::data_dir;
use habitclock_core::{Config, Event, HabitClock};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Settings shared by every command.
pub struct Context {
    pub data_dir: PathBuf,
    pub config: Config,
    pub json: bool,
}

impl Context {
    pub fn new(data_dir_override: Option<PathBuf>, json: bool) -> Result<Self, Box<dyn std::error::Error>> {
        let data_dir = match data_dir_override {
            Some(dir) => {
                std::fs::create_dir_all(&dir)?;
                dir
            }
            None => data_dir()?,
        };
        let config = Config::load_or_default(&data_dir.join("config.toml"));
        Ok(Self {
            data_dir,
            config,
            json,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn open(&self) -> HabitClock {
        HabitClock::open(
            &self.config.storage_paths(&self.data_dir),
            self.config.work_minutes(),
            self.config.break_minutes(),
        )
    }

    /// Print queued events: JSON lines in `--json` mode, otherwise only
    /// persistence failures, as warnings on stderr.
    pub fn report_events(&self, app: &mut HabitClock) -> CliResult {
        for event in app.drain_events() {
            if self.json {
                println!("{}", serde_json::to_string(&event)?);
            } else if let Event::PersistenceFailed { message, .. } = &event {
                eprintln!("warning: {message}");
            }
        }
        Ok(())
    }
}
