//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::reminder::SchedulerConfig;

const DEFAULT_THRESHOLD_HOURS: u32 = 5;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Bookmark data file
    pub data_file: Option<PathBuf>,

    /// How many hours ahead a reminder starts notifying
    pub reminder_threshold_hours: Option<u32>,

    /// Seconds between reminder checks
    pub poll_interval_secs: Option<u64>,

    /// Log filter used when neither RUST_LOG nor -v is given
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/mark/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mark")
            .join("config.toml")
    }

    /// Resolve the data file, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--data` argument
    /// 2. Config file `data_file` setting
    /// 3. `mark/mark.json` under the platform data directory
    pub fn data_file(&self, cli_data: Option<&PathBuf>) -> PathBuf {
        cli_data
            .cloned()
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("mark")
                    .join("mark.json")
            })
    }

    pub fn scheduler(&self) -> SchedulerConfig {
        let hours = self
            .reminder_threshold_hours
            .unwrap_or(DEFAULT_THRESHOLD_HOURS);
        let secs = self
            .poll_interval_secs
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
            .max(1);

        SchedulerConfig {
            poll_interval: Duration::from_secs(secs),
            threshold: chrono::Duration::hours(i64::from(hours)),
        }
    }
}
