mod config;

pub use config::{Config, DisplayConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the directory holding `config.toml`.
///
/// `GOALTIMER_HOME` wins when set. Otherwise `~/.config/goaltimer`, or
/// `~/.config/goaltimer-dev` with `GOALTIMER_ENV=dev`.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("GOALTIMER_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");
            let env = std::env::var("GOALTIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("goaltimer-dev")
            } else {
                base_dir.join("goaltimer")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
