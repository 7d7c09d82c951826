//! Benchmark execution: repeated probes, comparisons and progress reporting
//!
//! Everything here is sequential. A series runs its probes one after another and
//! reports each outcome to a `ProgressObserver` in execution order; a comparison
//! runs one series per command string.

use crate::{
    error::{ErrorContext, Result},
    logging::ProbeLogger,
    models::{Command, ComparisonResult, Config, ProbeResult, RunSeries},
    probe::Probe,
};
use serde::Serialize;

/// Progress of one run inside a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunProgress {
    /// 1-based run index
    pub index: u32,
    /// Runs in the series
    pub total: u32,
    pub result: ProbeResult,
}

/// Receives progress notifications while probes run
pub trait ProgressObserver {
    /// A comparison is about to measure `label`
    fn on_series_start(&mut self, _label: &str) {}

    /// A run finished
    fn on_run(&mut self, _progress: &RunProgress) {}

    /// All runs of the current series finished
    fn on_series_end(&mut self) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Probe `command` `run_count` times in sequence and collect the latencies
pub fn run_series<P, O>(probe: &P, command: &Command, run_count: u32, observer: &mut O) -> RunSeries
where
    P: Probe + ?Sized,
    O: ProgressObserver + ?Sized,
{
    let mut samples = Vec::with_capacity(run_count as usize);

    for index in 1..=run_count {
        let result = probe.probe(command);
        if let Some(ms) = result.latency_ms() {
            samples.push(ms);
        }
        observer.on_run(&RunProgress {
            index,
            total: run_count,
            result,
        });
    }

    observer.on_series_end();
    RunSeries::from_samples(samples, run_count)
}

/// Tokenize every command string, then run one series per command in order
///
/// A string that fails shell-style tokenization aborts the comparison before
/// any command is measured.
pub fn compare<P, O>(
    probe: &P,
    commands: &[String],
    run_count: u32,
    observer: &mut O,
) -> Result<ComparisonResult>
where
    P: Probe + ?Sized,
    O: ProgressObserver + ?Sized,
{
    let parsed = commands
        .iter()
        .enumerate()
        .map(|(i, line)| {
            Command::parse_shell(line)
                .with_context(|| format!("Command {} of {}", i + 1, commands.len()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut comparison = ComparisonResult::new();
    for (line, command) in commands.iter().zip(&parsed) {
        observer.on_series_start(line);
        let series = run_series(probe, command, run_count, observer);
        comparison.push(line.as_str(), series);
    }

    Ok(comparison)
}

/// What a benchmark measures
#[derive(Debug, Clone, PartialEq)]
pub enum BenchmarkMode {
    /// One pre-tokenized command
    Single(Command),
    /// Several shell-style command strings, ranked by median
    Compare(Vec<String>),
}

/// Result of a whole invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BenchmarkReport {
    Single { label: String, series: RunSeries },
    Comparison(ComparisonResult),
}

/// A configured benchmark bound to a probe
pub struct Benchmark<P: Probe> {
    probe: P,
    mode: BenchmarkMode,
    runs: u32,
    logger: Option<ProbeLogger>,
}

impl<P: Probe> Benchmark<P> {
    pub fn new(probe: P, mode: BenchmarkMode, runs: u32) -> Self {
        Self {
            probe,
            mode,
            runs,
            logger: None,
        }
    }

    /// Build from a validated configuration; `commands` must already be free of the leading `--`
    pub fn from_config(config: &Config, probe: P) -> Result<Self> {
        let mode = if config.compare {
            BenchmarkMode::Compare(config.commands.clone())
        } else {
            BenchmarkMode::Single(Command::new(config.commands.iter().cloned())?)
        };
        Ok(Self::new(probe, mode, config.runs))
    }

    /// Log a summary of each finished series
    pub fn with_logger(mut self, logger: ProbeLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn mode(&self) -> &BenchmarkMode {
        &self.mode
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Run every series and collect the report
    pub fn run<O: ProgressObserver + ?Sized>(&self, observer: &mut O) -> Result<BenchmarkReport> {
        match &self.mode {
            BenchmarkMode::Single(command) => {
                let series = run_series(&self.probe, command, self.runs, observer);
                let label = command.label();
                if let Some(logger) = &self.logger {
                    logger.log_series_summary(&label, &series);
                }
                Ok(BenchmarkReport::Single { label, series })
            }
            BenchmarkMode::Compare(commands) => {
                let comparison = compare(&self.probe, commands, self.runs, observer)?;
                if let Some(logger) = &self.logger {
                    for entry in comparison.entries() {
                        logger.log_series_summary(&entry.label, &entry.series);
                    }
                }
                Ok(BenchmarkReport::Comparison(comparison))
            }
        }
    }
}
