//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Report format written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text lines (the stable format)
    #[default]
    Text,
    /// One JSON document with the same statistics
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Startup classification used to colour medians
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceLevel {
    /// Feels instant (< 50ms)
    Instant,
    /// Noticeable but fine (50-200ms)
    Fast,
    /// Sluggish (200-1000ms)
    Slow,
    /// Over a second
    Sluggish,
}

impl PerformanceLevel {
    /// Classify a first-paint latency in milliseconds
    pub fn from_millis(ms: f64) -> Self {
        if ms < 50.0 {
            Self::Instant
        } else if ms < 200.0 {
            Self::Fast
        } else if ms < 1000.0 {
            Self::Slow
        } else {
            Self::Sluggish
        }
    }
}
