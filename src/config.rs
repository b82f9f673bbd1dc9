//! Configuration loading and management for docsum.
//!
//! Loads settings from `docsum.toml` with an environment variable override for the
//! backend endpoint. A missing config file is not an error; defaults match the
//! stock summarization backend on `127.0.0.1:5000`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides `backend.url`
pub const BACKEND_URL_ENV: &str = "DOCSUM_BACKEND_URL";

const CONFIG_FILE_NAME: &str = "docsum.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Summary length hint forwarded to the backend as the `length` form field.
///
/// Only the Pegasus model honours it; the extractive models ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Normal,
    Long,
}

impl SummaryLength {
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryLength::Normal => "normal",
            SummaryLength::Long => "long",
        }
    }
}

/// Summarization backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Full URL of the summarize endpoint
    pub url: String,
    /// Client-side request timeout in milliseconds
    pub timeout_ms: u64,
    /// Optional summary length hint
    pub length: Option<SummaryLength>,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5000/summarize".to_string(),
            timeout_ms: 600_000,
            length: None,
        }
    }
}

/// Cosmetic progress indicator timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressConfig {
    /// Interval between progress ticks
    pub tick_ms: u64,
    /// Percentage added on every tick
    pub step: u8,
    /// Highest value the ticker may reach before a response arrives
    pub cap: u8,
    /// How long the loading overlay stays up after a response
    pub settle_ms: u64,
}

impl ProgressConfig {
    /// Keep the ticker able to move and below the completed value.
    fn normalize(&mut self) {
        self.step = self.step.max(1);
        self.cap = self.cap.min(100);
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            step: 10,
            cap: 90,
            settle_ms: 500,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Directory for the TUI log file (defaults to the system temp dir)
    pub directory: Option<PathBuf>,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl LoggingConfig {
    pub fn directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filter: "docsum=info".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location (docsum.toml in cwd or home)
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                let mut config = Config::default();
                config.apply_env_overrides();
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from TOML text without consulting the environment
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.progress.normalize();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                self.backend.url = url;
            }
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        let home_config = dirs::home_dir()?
            .join(".config")
            .join("docsum")
            .join(CONFIG_FILE_NAME);
        home_config.exists().then_some(home_config)
    }
}
