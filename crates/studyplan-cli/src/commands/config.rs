use clap::Subcommand;
use studyplan_core::error::{ConfigError, Result};
use studyplan_core::{Config, CoreError};

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "scheduling.short_break_minutes")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Show the whole configuration
    Show,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => println!("{}", get_value(&key)?),
        ConfigAction::Set { key, value } => {
            set_value(&key, &value)?;
            println!("ok");
        }
        ConfigAction::Show => print_json(&Config::load().map_err(CoreError::from)?)?,
        ConfigAction::Reset => {
            Config::default().save().map_err(CoreError::from)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

fn get_value(key: &str) -> Result<String> {
    let config = Config::load()?;
    Ok(config
        .get(key)
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?)
}

/// Apply one key, rejecting values the scheduler would refuse, then persist.
fn set_value(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.scheduler().validate()?;
    config.save()?;
    Ok(())
}
