mod config;
mod record_file;

pub use config::{Config, PomodoroConfig, RolloverConfig, StorageConfig};
pub(crate) use record_file::numbered_lines;
pub use record_file::{write_atomic, RecordFile};

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Returns the platform config directory joined with `habitclock/`,
/// falling back to `./.habitclock` when the platform has none.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .map(|base| base.join("habitclock"))
        .unwrap_or_else(|| PathBuf::from(".habitclock"));
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Locations of the two record files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub habits_file: PathBuf,
    pub streaks_file: PathBuf,
}

impl StoragePaths {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        StorageConfig::default().resolve(dir)
    }
}
