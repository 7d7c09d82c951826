//! Core formatting traits and the plain text implementation
//!
//! The plain text lines are the stable output of the tool; other formatters
//! keep the same columns.

use crate::{
    error::{AppError, Result},
    executor::BenchmarkReport,
    models::metrics::{ComparisonResult, RunSeries},
};
use std::fmt::Write as _;

/// Width of the label column
pub const LABEL_WIDTH: usize = crate::defaults::LABEL_WIDTH;

/// Length of the rule under the comparison header
pub const RULE_WIDTH: usize = 60;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// One statistics line for a labelled series
    fn format_stats(&self, label: &str, series: &RunSeries) -> String;

    /// Header row of the comparison table
    fn format_table_header(&self) -> String;

    /// Blank line, header, rule, then one row per command by ascending median
    fn format_comparison(&self, comparison: &ComparisonResult) -> Result<String> {
        let mut output = String::new();

        writeln!(output)
            .and_then(|_| writeln!(output, "{}", self.format_table_header()))
            .and_then(|_| write!(output, "{}", "-".repeat(RULE_WIDTH)))
            .map_err(|e| AppError::io(format!("Failed to format comparison: {}", e)))?;

        for entry in comparison.ranked() {
            write!(output, "\n{}", self.format_stats(&entry.label, &entry.series))
                .map_err(|e| AppError::io(format!("Failed to format comparison: {}", e)))?;
        }

        Ok(output)
    }

    /// Complete stdout report
    fn format_report(&self, report: &BenchmarkReport) -> Result<String> {
        match report {
            BenchmarkReport::Single { label, series } => Ok(self.format_stats(label, series)),
            BenchmarkReport::Comparison(comparison) => self.format_comparison(comparison),
        }
    }
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Width of the label column
    pub label_width: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: false,
            label_width: LABEL_WIDTH,
        }
    }
}

/// Statistics line for a series, or the "no successful runs" line when it is empty
pub fn format_stats(label: &str, series: &RunSeries) -> String {
    format_stats_with_width(label, series, LABEL_WIDTH)
}

pub(crate) fn format_stats_with_width(label: &str, series: &RunSeries, width: usize) -> String {
    match (series.median(), series.min(), series.max()) {
        (Some(median), Some(min), Some(max)) => format!(
            "{:<width$}  median={:>6.0}ms  min={:.0}ms  max={:.0}ms  (n={})",
            label,
            median,
            min,
            max,
            series.len(),
            width = width
        ),
        _ => format!("{:<width$}  no successful runs", label, width = width),
    }
}

/// Header row of the comparison table
pub fn table_header(width: usize) -> String {
    format!("{:<width$}  {:>8}  {:>6}  {:>6}", "Command", "Median", "Min", "Max", width = width)
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new(FormattingOptions::default())
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_stats(&self, label: &str, series: &RunSeries) -> String {
        format_stats_with_width(label, series, self.options.label_width)
    }

    fn format_table_header(&self) -> String {
        table_header(self.options.label_width)
    }
}
