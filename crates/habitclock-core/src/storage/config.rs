//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Pomodoro work and break lengths
//! - Rollover polling interval and the displayed reset hour
//! - Locations of the habits and streaks files
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{write_atomic, StoragePaths};
use crate::error::ConfigError;
use crate::timer::{BreakMinutes, WorkMinutes};

/// Pomodoro configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    /// Ring the terminal bell when a phase completes.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Daily rollover configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Hour shown by the "next reset in" countdown. Display only.
    #[serde(default = "default_display_reset_hour")]
    pub display_reset_hour: u32,
}

/// Record file locations. Relative paths resolve against the data dir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_habits_file")]
    pub habits_file: PathBuf,
    #[serde(default = "default_streaks_file")]
    pub streaks_file: PathBuf,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pomodoro: PomodoroConfig,
    #[serde(default)]
    pub rollover: RolloverConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

// Default functions
fn default_work_minutes() -> u32 {
    WorkMinutes::DEFAULT.get()
}
fn default_break_minutes() -> u32 {
    BreakMinutes::DEFAULT.get()
}
fn default_true() -> bool {
    true
}
fn default_poll_interval_secs() -> u64 {
    crate::rollover::POLL_INTERVAL.as_secs()
}
fn default_display_reset_hour() -> u32 {
    crate::rollover::DEFAULT_RESET_HOUR
}
fn default_habits_file() -> PathBuf {
    PathBuf::from("habits.txt")
}
fn default_streaks_file() -> PathBuf {
    PathBuf::from("habits_meta.txt")
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            bell: true,
        }
    }
}

impl Default for RolloverConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            display_reset_hour: default_display_reset_hour(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            habits_file: default_habits_file(),
            streaks_file: default_streaks_file(),
        }
    }
}

impl StorageConfig {
    pub fn resolve(&self, data_dir: &Path) -> StoragePaths {
        StoragePaths {
            habits_file: data_dir.join(&self.habits_file),
            streaks_file: data_dir.join(&self.streaks_file),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => serde_json::Value::Number(
                    value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                        .into(),
                ),
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot replace a whole section".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Load from `path`, writing the defaults there when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        write_atomic(path, &content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from `path`, returning defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using default configuration");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The caller saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result is out of range. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        WorkMinutes::new(self.pomodoro.work_minutes).map_err(|e| ConfigError::InvalidValue {
            key: "pomodoro.work_minutes".into(),
            message: e.to_string(),
        })?;
        BreakMinutes::new(self.pomodoro.break_minutes).map_err(|e| ConfigError::InvalidValue {
            key: "pomodoro.break_minutes".into(),
            message: e.to_string(),
        })?;
        if self.rollover.display_reset_hour > 23 {
            return Err(ConfigError::InvalidValue {
                key: "rollover.display_reset_hour".into(),
                message: format!("{} is not an hour of day", self.rollover.display_reset_hour),
            });
        }
        Ok(())
    }

    pub fn work_minutes(&self) -> WorkMinutes {
        WorkMinutes::clamped(self.pomodoro.work_minutes)
    }

    pub fn break_minutes(&self) -> BreakMinutes {
        BreakMinutes::clamped(self.pomodoro.break_minutes)
    }

    /// Rollover polling period, between one second and one minute.
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.rollover.poll_interval_secs.clamp(1, 60))
    }

    pub fn storage_paths(&self, data_dir: &Path) -> StoragePaths {
        self.storage.resolve(data_dir)
    }
}
