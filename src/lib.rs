//! TUI Time-To-First-Paint
//!
//! Measures how long an interactive terminal program takes to write its first
//! byte to a real pseudo-terminal, repeats the measurement, and ranks several
//! candidate commands by median startup latency.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use executor::{compare, run_series, Benchmark, BenchmarkReport, NoProgress, ProgressObserver, RunProgress};
pub use models::{Command, ComparisonResult, Config, ProbeResult, RunSeries};
pub use output::{format_stats, OutputFormatter, OutputFormatterFactory, PlainFormatter};
pub use probe::{probe, Probe, ProbeConfig, ProbeRecord, Prober};
pub use stats::SeriesStatistics;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_RUNS: u32 = 10;
    pub const MAX_RUNS: u32 = 1000;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const MAX_TIMEOUT_SECONDS: f64 = 300.0;
    pub const DEFAULT_ROWS: u16 = 24;
    pub const DEFAULT_COLS: u16 = 80;
    pub const DEFAULT_TERM: &str = "xterm-256color";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    /// Width of the label column in statistics lines
    pub const LABEL_WIDTH: usize = 30;
}
