//! Error types for the sensor feeder.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Feeder error type
///
/// Everything except [`FeederError::DataDir`] and [`FeederError::Config`] is
/// absorbed by the feeder loop: logged, then the next file is tried.
#[derive(Debug, Error)]
pub enum FeederError {
    /// Sample file vanished between discovery and reading
    #[error("Error: File not found at {}. Skipping.", path.display())]
    FileNotFound { path: PathBuf },

    /// Sample file is not a single JSON object
    #[error("Error: Invalid JSON in file {}. Skipping. ({source})", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Request never produced a response
    #[error("Error sending data: {payload}. Error: {source}")]
    Transport {
        payload: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a 4xx or 5xx status
    #[error("Error sending data: {payload}. Error: HTTP status {status}")]
    HttpStatus { status: StatusCode, payload: String },

    /// Reading the sample file failed for a reason other than absence
    #[error("An unexpected error occurred with file {}: {source}. Skipping.", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data directory could not be listed at startup
    #[error("Cannot read data directory {}: {source}", path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl FeederError {
    /// Whether the feeder loop recovers from this error by moving on
    pub fn is_skippable(&self) -> bool {
        !matches!(self, Self::DataDir { .. } | Self::Config(_))
    }

    /// Short label used in structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "file_not_found",
            Self::InvalidJson { .. } => "invalid_json",
            Self::Transport { .. } => "transport",
            Self::HttpStatus { .. } => "http_status",
            Self::Io { .. } => "unexpected",
            Self::DataDir { .. } => "data_dir",
            Self::Config(_) => "config",
        }
    }
}
