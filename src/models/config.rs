//! Configuration data model and validation

use crate::types::{AppError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Probes per command
    #[serde(default = "default_runs")]
    pub runs: u32,

    /// Per-probe deadline for the first byte
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: f64,

    /// Treat every positional argument as a complete shell-style command
    #[serde(default)]
    pub compare: bool,

    /// Raw positional arguments, leading `--` already stripped
    #[serde(default)]
    pub commands: Vec<String>,

    /// Terminal rows reported to the child
    #[serde(default = "default_rows")]
    pub rows: u16,

    /// Terminal columns reported to the child
    #[serde(default = "default_cols")]
    pub cols: u16,

    /// TERM given to the child when the invoking environment has none
    #[serde(default = "default_term")]
    pub term: String,

    /// Report format on stdout
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            timeout_seconds: default_timeout_secs(),
            compare: false,
            commands: Vec::new(),
            rows: default_rows(),
            cols: default_cols(),
            term: default_term(),
            output_format: OutputFormat::default(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.runs > crate::defaults::MAX_RUNS {
            return Err(AppError::config(format!(
                "Run count cannot exceed {} (got {})",
                crate::defaults::MAX_RUNS,
                self.runs
            )));
        }

        if !self.timeout_seconds.is_finite() || self.timeout_seconds <= 0.0 {
            return Err(AppError::config(format!(
                "Timeout must be a positive number of seconds (got {})",
                self.timeout_seconds
            )));
        }

        if self.timeout_seconds > crate::defaults::MAX_TIMEOUT_SECONDS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {} seconds",
                crate::defaults::MAX_TIMEOUT_SECONDS
            )));
        }

        if self.rows == 0 || self.cols == 0 {
            return Err(AppError::config("Terminal size must be at least 1x1"));
        }

        if self.term.trim().is_empty() {
            return Err(AppError::config("Default TERM cannot be empty"));
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_runs() -> u32 {
    crate::defaults::DEFAULT_RUNS
}

fn default_timeout_secs() -> f64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs_f64()
}

fn default_rows() -> u16 {
    crate::defaults::DEFAULT_ROWS
}

fn default_cols() -> u16 {
    crate::defaults::DEFAULT_COLS
}

fn default_term() -> String {
    crate::defaults::DEFAULT_TERM.to_string()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
