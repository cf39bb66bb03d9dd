use clap::Subcommand;
use habitclock_core::{Config, ConfigError};

use super::{CliResult, Context};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Dot-separated key (e.g. "pomodoro.work_minutes")
        key: String,
    },
    /// Set a config value
    Set {
        /// Dot-separated key
        key: String,
        /// New value
        value: String,
    },
    /// Show the whole configuration
    Show,
    /// Reset config to defaults
    Reset,
}

pub fn run(ctx: &Context, action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => match ctx.config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(ConfigError::UnknownKey(key).into()),
        },
        ConfigAction::Set { key, value } => {
            let mut config = ctx.config.clone();
            config.set(&key, &value)?;
            config.save_to(&ctx.config_path())?;
            if !ctx.json {
                println!("{key} = {}", config.get(&key).unwrap_or(value));
            }
        }
        ConfigAction::Show => {
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&ctx.config)?);
            } else {
                print!("{}", toml::to_string_pretty(&ctx.config)?);
            }
        }
        ConfigAction::Reset => {
            Config::default().save_to(&ctx.config_path())?;
            if !ctx.json {
                println!("config reset to defaults");
            }
        }
    }
    Ok(())
}
