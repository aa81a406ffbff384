//! The feeder loop.
//!
//! Cycles through the discovered sample files in name order, submits each one
//! to a [`ReadingSink`], pauses for a fixed interval and moves on. Every
//! per-file failure is logged and skipped; only the shutdown future ends the
//! loop.

use crate::config::FeederConfig;
use crate::cycle::CyclePosition;
use crate::error::FeederError;
use crate::sample::{discover_sample_files, SampleReading};
use crate::sink::ReadingSink;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Result of one loop iteration
#[derive(Debug)]
pub enum IterationOutcome {
    /// The reading reached the sink
    Delivered { file: PathBuf },
    /// The file was skipped; the error has already been logged
    Skipped { file: PathBuf, error: FeederError },
}

impl IterationOutcome {
    /// File the iteration worked on
    pub fn file(&self) -> &Path {
        match self {
            Self::Delivered { file } | Self::Skipped { file, .. } => file,
        }
    }

    /// Whether the reading was delivered
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Counters over one feeder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Completed iterations
    pub attempts: usize,
    /// Readings accepted by the sink
    pub delivered: usize,
    /// Iterations that ended in a skipped file
    pub skipped: usize,
}

impl FeedStats {
    fn record(&mut self, outcome: &IterationOutcome) {
        self.attempts += 1;
        if outcome.is_delivered() {
            self.delivered += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// How a feeder run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunReport {
    /// The data directory held no sample files; the loop never started
    NoSampleFiles,
    /// The shutdown signal fired
    Interrupted(FeedStats),
}

/// Sequential feeder over a fixed list of sample files
pub struct Feeder<S> {
    files: Vec<PathBuf>,
    position: CyclePosition,
    sink: S,
    interval: Duration,
}

impl<S: ReadingSink> Feeder<S> {
    /// Create a feeder. Returns `None` when `files` is empty.
    ///
    /// `files` is used in the given order; [`discover_sample_files`] already
    /// sorts it.
    pub fn new(files: Vec<PathBuf>, sink: S, interval: Duration) -> Option<Self> {
        let position = CyclePosition::new(files.len())?;
        Some(Self {
            files,
            position,
            sink,
            interval,
        })
    }

    /// Files being cycled
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Position of the file the next [`Feeder::step`] works on
    pub fn position(&self) -> CyclePosition {
        self.position
    }

    /// The sink readings are submitted to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Pause between iterations
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Process the current file and advance, without pausing
    pub async fn step(&mut self) -> IterationOutcome {
        let file = self.files[self.position.current()].clone();
        let result = self.attempt(&file).await;
        self.position.advance();

        match result {
            Ok(()) => IterationOutcome::Delivered { file },
            Err(error) => {
                tracing::error!(file = %file.display(), kind = error.kind(), "{}", error);
                IterationOutcome::Skipped { file, error }
            }
        }
    }

    async fn attempt(&self, file: &Path) -> Result<(), FeederError> {
        let reading = SampleReading::load(file).await?;

        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        tracing::info!(
            cycle = %self.position,
            "--- Sending data from {} (Cycle: {}) ---",
            name,
            self.position
        );

        self.sink.submit(&reading).await?;
        tracing::info!("Successfully sent data: {}", reading.summary());
        Ok(())
    }

    /// Run the loop until `shutdown` completes.
    ///
    /// Shutdown is raced against the in-flight iteration and against the
    /// pause, so it takes effect at the next await point.
    pub async fn run_until<F>(&mut self, shutdown: F) -> FeedStats
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut stats = FeedStats::default();

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                outcome = self.step() => stats.record(&outcome),
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        stats
    }
}

/// Discover sample files for `config` and feed them to `sink` until `shutdown`.
///
/// Returns [`RunReport::NoSampleFiles`] without entering the loop when the data
/// directory has no sample files. An unreadable data directory is an error.
pub async fn run<S, F>(
    config: &FeederConfig,
    sink: S,
    shutdown: F,
) -> Result<RunReport, FeederError>
where
    S: ReadingSink,
    F: Future<Output = ()>,
{
    config.validate()?;

    let shown_dir = std::env::current_dir()
        .map(|cwd| cwd.join(&config.data_dir))
        .unwrap_or_else(|_| config.data_dir.clone());
    tracing::info!("Starting to send fake sensor data to: {}", sink.destination());
    tracing::info!("Reading data from: {}/", shown_dir.display());

    let files = discover_sample_files(&config.data_dir, &config.file_suffix)?;
    let names: Vec<String> = files
        .iter()
        .filter_map(|f| f.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    let Some(mut feeder) = Feeder::new(files, sink, config.send_interval()) else {
        tracing::warn!(
            "No {} files found in '{}'. Please create some fake sensor data files.",
            config.file_suffix,
            config.data_dir.display()
        );
        tracing::info!("Exiting.");
        return Ok(RunReport::NoSampleFiles);
    };

    tracing::info!("Found {} data files: {:?}", names.len(), names);

    let stats = feeder.run_until(shutdown).await;
    tracing::info!(
        attempts = stats.attempts,
        delivered = stats.delivered,
        skipped = stats.skipped,
        "Feeder terminated by user (Ctrl+C)."
    );

    Ok(RunReport::Interrupted(stats))
}
