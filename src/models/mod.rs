//! Data models for commands, probe results and configuration

pub mod command;
pub mod config;
pub mod metrics;

// Re-export main model types
pub use command::Command;
pub use config::Config;
pub use metrics::{ComparisonResult, LabeledSeries, ProbeResult, RunSeries};
