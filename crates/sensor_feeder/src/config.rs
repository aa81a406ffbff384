//! Feeder configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.
//! Every setting defaults to the fixed constant the feeder was built around, so an
//! unconfigured run posts `fake_sensor_data/*.json` to the local backend every five seconds.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Ingestion endpoint of the plant monitor backend
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001/api/hardware/sensor-update";

/// Directory holding the sample files, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "fake_sensor_data";

/// Seconds to wait between two sends
pub const DEFAULT_SEND_INTERVAL_SECS: u64 = 5;

/// File name suffix of sample files
pub const DEFAULT_FILE_SUFFIX: &str = ".json";

const ENV_BACKEND_URL: &str = "FEEDER_BACKEND_URL";
const ENV_DATA_DIR: &str = "FEEDER_DATA_DIR";
const ENV_SEND_INTERVAL_SECS: &str = "FEEDER_SEND_INTERVAL_SECS";
const ENV_FILE_SUFFIX: &str = "FEEDER_FILE_SUFFIX";
const ENV_LOG_LEVEL: &str = "FEEDER_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid backend URL '{0}'. Must start with http:// or https://")]
    InvalidBackendUrl(String),

    #[error("Invalid send interval: {0}. Must be greater than 0 seconds")]
    InvalidInterval(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("File suffix cannot be empty")]
    EmptySuffix,

    #[error("Data directory cannot be empty")]
    EmptyDataDir,

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the feeder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Feeder configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeederConfig {
    /// Endpoint every reading is POSTed to
    pub backend_url: String,
    /// Directory scanned for sample files at startup
    pub data_dir: PathBuf,
    /// Pause after every attempt, successful or not
    pub send_interval_secs: u64,
    /// Only files whose name ends with this suffix are sent
    pub file_suffix: String,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for FeederConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            send_interval_secs: DEFAULT_SEND_INTERVAL_SECS,
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
            log_level: LogLevel::Info,
        }
    }
}

impl FeederConfig {
    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their default value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_lookup<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            self.backend_url = url;
        }

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(secs) = lookup(ENV_SEND_INTERVAL_SECS) {
            self.send_interval_secs = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidInterval(secs.clone()))?;
        }

        if let Some(suffix) = lookup(ENV_FILE_SUFFIX) {
            self.file_suffix = suffix;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        Ok(())
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file without validating it
    fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(ConfigError::InvalidBackendUrl(self.backend_url.clone()));
        }

        if self.send_interval_secs == 0 {
            return Err(ConfigError::InvalidInterval(
                self.send_interval_secs.to_string(),
            ));
        }

        if self.file_suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        Ok(())
    }

    /// Pause applied after every iteration
    pub fn send_interval(&self) -> Duration {
        Duration::from_secs(self.send_interval_secs)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(url) = &cli.backend_url {
            self.backend_url = url.clone();
        }
        if let Some(dir) = &cli.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(secs) = cli.send_interval_secs {
            self.send_interval_secs = secs;
        }
        if let Some(suffix) = &cli.file_suffix {
            self.file_suffix = suffix.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Backend URL override
    pub backend_url: Option<String>,
    /// Data directory override
    pub data_dir: Option<PathBuf>,
    /// Send interval override
    pub send_interval_secs: Option<u64>,
    /// File suffix override
    pub file_suffix: Option<String>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<FeederConfig, ConfigError> {
    build_config_with_lookup(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an injectable environment lookup
pub fn build_config_with_lookup<F>(cli: &CliArgs, lookup: F) -> Result<FeederConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        FeederConfig::parse_file(config_path)?
    } else {
        FeederConfig::default()
    };

    config.apply_lookup(lookup)?;
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}
