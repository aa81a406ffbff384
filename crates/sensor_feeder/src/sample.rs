//! Sample file discovery and loading.
//!
//! A sample file holds one JSON object describing a simulated sensor reading.
//! Keys are forwarded to the backend untouched; only `temperature` and
//! `soilMoisture` are looked at, and only for the confirmation log line.

use crate::error::FeederError;
use serde_json::{Map, Value};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Field shown as `Temp=` in the confirmation line
pub const TEMPERATURE_FIELD: &str = "temperature";

/// Field shown as `Moisture=` in the confirmation line
pub const SOIL_MOISTURE_FIELD: &str = "soilMoisture";

/// List the sample files of `dir`, sorted by file name.
///
/// Only regular files whose name ends with `suffix` are returned. An empty
/// list is not an error; a directory that cannot be listed is.
pub fn discover_sample_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, FeederError> {
    let data_dir_error = |source: std::io::Error| FeederError::DataDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(data_dir_error)? {
        let entry = entry.map_err(data_dir_error)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::debug!(file = ?entry.path(), "Ignoring file with non UTF-8 name");
            continue;
        };
        if !name.ends_with(suffix) {
            continue;
        }
        // follows symlinks, so a linked reading still counts
        if entry.path().is_file() {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// One parsed sample file
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReading {
    fields: Map<String, Value>,
}

impl SampleReading {
    /// Wrap an already parsed JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Read and parse a sample file.
    ///
    /// The top-level value must be an object; anything else is reported as
    /// invalid JSON.
    pub async fn load(path: &Path) -> Result<Self, FeederError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => FeederError::FileNotFound {
                    path: path.to_path_buf(),
                },
                _ => FeederError::Io {
                    path: path.to_path_buf(),
                    source,
                },
            })?;

        Self::parse(&content).map_err(|source| FeederError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse the text of a sample file
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Map<String, Value>>(content).map(Self::new)
    }

    /// The JSON object forwarded as request body
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Look up a single field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Confirmation summary, e.g. `Temp=22°C, Moisture=40%`
    pub fn summary(&self) -> String {
        format!(
            "Temp={}°C, Moisture={}%",
            render_field(self.get(TEMPERATURE_FIELD)),
            render_field(self.get(SOIL_MOISTURE_FIELD)),
        )
    }
}

/// Compact JSON, as sent on the wire
impl fmt::Display for SampleReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.fields) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

fn render_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "n/a".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
