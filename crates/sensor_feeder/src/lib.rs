//! # Sensor Feeder
//!
//! Development utility that replays simulated sensor readings against the
//! plant monitor backend, so the ingestion endpoint can be exercised without
//! hardware attached.
//!
//! ## Modules
//!
//! - [`config`]: layered configuration (defaults, TOML file, `FEEDER_*` env, CLI)
//! - [`sample`]: discovery and parsing of `*.json` sample files
//! - [`cycle`]: wrap-around position over the discovered files
//! - [`sink`]: where readings go (`HttpSink` POSTs them)
//! - [`feeder`]: the send / pause / advance loop
//! - [`error`]: error taxonomy

pub mod config;
pub mod cycle;
pub mod error;
pub mod feeder;
pub mod sample;
pub mod sink;

/// Feeder version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{build_config, CliArgs, FeederConfig, LogLevel};
    pub use crate::cycle::CyclePosition;
    pub use crate::error::FeederError;
    pub use crate::feeder::{run, FeedStats, Feeder, IterationOutcome, RunReport};
    pub use crate::sample::{discover_sample_files, SampleReading};
    pub use crate::sink::{HttpSink, ReadingSink};
}
