//! Probe results and run series data models

use crate::stats::safe_float_cmp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Outcome of a single first-paint measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "ms", rename_all = "lowercase")]
pub enum ProbeResult {
    /// First byte observed after this many milliseconds
    Latency(f64),
    /// No byte observed before the deadline, or the terminal closed silently
    Timeout,
}

impl ProbeResult {
    /// Build a latency result from an elapsed duration, keeping nanosecond precision
    pub fn from_elapsed(elapsed: Duration) -> Self {
        Self::Latency(elapsed.as_nanos() as f64 / 1_000_000.0)
    }

    /// Latency in milliseconds, if a byte was observed
    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Self::Latency(ms) => Some(*ms),
            Self::Timeout => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latency(ms) => write!(f, "{:.0}ms", ms),
            Self::Timeout => f.write_str("timeout"),
        }
    }
}

/// Successful latencies of one command, sorted ascending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSeries {
    samples_ms: Vec<f64>,
    requested: u32,
}

impl RunSeries {
    /// Build a series from raw latencies; they are sorted here
    pub fn from_samples(mut samples_ms: Vec<f64>, requested: u32) -> Self {
        samples_ms.sort_by(|a, b| a.total_cmp(b));
        let requested = requested.max(samples_ms.len() as u32);
        Self { samples_ms, requested }
    }

    /// Sorted successful latencies in milliseconds
    pub fn samples_ms(&self) -> &[f64] {
        &self.samples_ms
    }

    /// Number of runs that were requested
    pub fn requested(&self) -> u32 {
        self.requested
    }

    /// Number of successful runs
    pub fn len(&self) -> usize {
        self.samples_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples_ms.is_empty()
    }

    /// Runs that produced no byte
    pub fn timeouts(&self) -> u32 {
        self.requested - self.samples_ms.len() as u32
    }

    /// Element at index `len / 2`; for even counts this is the upper of the two middles
    pub fn median(&self) -> Option<f64> {
        self.samples_ms.get(self.samples_ms.len() / 2).copied()
    }

    pub fn min(&self) -> Option<f64> {
        self.samples_ms.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.samples_ms.last().copied()
    }

    /// Ordering key for ranking: the median, or +infinity when nothing succeeded
    pub fn ranking_key(&self) -> f64 {
        self.median().unwrap_or(f64::INFINITY)
    }
}

/// A series tagged with the literal command string that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    pub label: String,
    pub series: RunSeries,
}

/// Comparison results in execution order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    entries: Vec<LabeledSeries>,
}

impl ComparisonResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a series; order of calls is execution order
    pub fn push<S: Into<String>>(&mut self, label: S, series: RunSeries) {
        self.entries.push(LabeledSeries {
            label: label.into(),
            series,
        });
    }

    /// Entries in execution order
    pub fn entries(&self) -> &[LabeledSeries] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by ascending median, empty series last, ties in execution order
    pub fn ranked(&self) -> Vec<&LabeledSeries> {
        let mut ranked: Vec<&LabeledSeries> = self.entries.iter().collect();
        ranked.sort_by(|a, b| safe_float_cmp(a.series.ranking_key(), b.series.ranking_key()));
        ranked
    }
}
