//! Sensor Feeder CLI
//!
//! Posts every sample file of the data directory to the backend, one every
//! few seconds, until interrupted with Ctrl+C.

use anyhow::Result;
use clap::Parser;
use sensor_feeder::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Sensor Feeder - replays fake sensor readings against the backend
#[derive(Parser, Debug)]
#[command(name = "sensor-feeder")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Endpoint readings are POSTed to
    #[arg(long, env = "FEEDER_BACKEND_URL")]
    url: Option<String>,

    /// Directory holding the sample files
    #[arg(short, long, value_name = "DIR", env = "FEEDER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Seconds to wait between two sends
    #[arg(short, long, env = "FEEDER_SEND_INTERVAL_SECS")]
    interval_secs: Option<u64>,

    /// File name suffix of sample files
    #[arg(long, env = "FEEDER_FILE_SUFFIX")]
    suffix: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FEEDER_LOG_LEVEL")]
    log_level: Option<String>,
}

impl From<Args> for CliArgs {
    fn from(args: Args) -> Self {
        CliArgs {
            config_file: args.config,
            backend_url: args.url,
            data_dir: args.data_dir,
            send_interval_secs: args.interval_secs,
            file_suffix: args.suffix,
            log_level: args.log_level,
        }
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level.as_filter_str())),
        )
        .init();
}

async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        // never resolve, so the feeder keeps running
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: CliArgs = Args::parse().into();
    let config = build_config(&cli)?;

    init_tracing(config.log_level);
    tracing::debug!(
        version = sensor_feeder::VERSION,
        url = %config.backend_url,
        data_dir = %config.data_dir.display(),
        interval_secs = config.send_interval_secs,
        suffix = %config.file_suffix,
        "Feeder configuration loaded"
    );

    let sink = HttpSink::new(config.backend_url.clone());
    let report = run(&config, sink, interrupted()).await?;
    tracing::debug!(?report, "Feeder stopped");

    Ok(())
}
