//! Machine-readable report carrying the same statistics as the text output

use super::formatter::{format_stats, table_header, OutputFormatter, LABEL_WIDTH};
use crate::{
    error::Result,
    executor::BenchmarkReport,
    models::metrics::{ComparisonResult, RunSeries},
    stats::SeriesStatistics,
};
use serde::Serialize;

/// Statistics for one command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonSeries {
    pub label: String,
    pub runs: u32,
    pub successes: usize,
    pub timeouts: u32,
    pub median_ms: Option<f64>,
    pub min_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub mean_ms: Option<f64>,
    pub std_dev_ms: Option<f64>,
    /// Successful latencies, ascending
    pub samples_ms: Vec<f64>,
}

impl JsonSeries {
    pub fn new(label: &str, series: &RunSeries) -> Self {
        let stats = SeriesStatistics::from_series(series);
        Self {
            label: label.to_string(),
            runs: series.requested(),
            successes: series.len(),
            timeouts: series.timeouts(),
            median_ms: stats.as_ref().map(|s| s.median_ms),
            min_ms: stats.as_ref().map(|s| s.min_ms),
            max_ms: stats.as_ref().map(|s| s.max_ms),
            mean_ms: stats.as_ref().map(|s| s.mean_ms),
            std_dev_ms: stats.as_ref().map(|s| s.std_dev_ms),
            samples_ms: series.samples_ms().to_vec(),
        }
    }
}

/// Whole JSON document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonReport {
    pub mode: &'static str,
    /// Single series first; comparison rows by ascending median
    pub results: Vec<JsonSeries>,
}

impl JsonReport {
    pub fn from_report(report: &BenchmarkReport) -> Self {
        match report {
            BenchmarkReport::Single { label, series } => Self {
                mode: "single",
                results: vec![JsonSeries::new(label, series)],
            },
            BenchmarkReport::Comparison(comparison) => Self::from_comparison(comparison),
        }
    }

    pub fn from_comparison(comparison: &ComparisonResult) -> Self {
        Self {
            mode: "compare",
            results: comparison
                .ranked()
                .into_iter()
                .map(|entry| JsonSeries::new(&entry.label, &entry.series))
                .collect(),
        }
    }
}

/// JSON formatter; statistics lines fall back to the plain layout
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_stats(&self, label: &str, series: &RunSeries) -> String {
        format_stats(label, series)
    }

    fn format_table_header(&self) -> String {
        table_header(LABEL_WIDTH)
    }

    fn format_comparison(&self, comparison: &ComparisonResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(&JsonReport::from_comparison(comparison))?)
    }

    fn format_report(&self, report: &BenchmarkReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(&JsonReport::from_report(report))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_single_report_json() {
        let report = BenchmarkReport::Single {
            label: "vim -u NONE".to_string(),
            series: RunSeries::from_samples(vec![30.0, 10.0, 20.0], 4),
        };
        let json = JsonFormatter::new().format_report(&report).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["mode"], "single");
        let entry = &value["results"][0];
        assert_eq!(entry["label"], "vim -u NONE");
        assert_eq!(entry["runs"], 4);
        assert_eq!(entry["successes"], 3);
        assert_eq!(entry["timeouts"], 1);
        assert_eq!(entry["median_ms"], 20.0);
        assert_eq!(entry["samples_ms"], serde_json::json!([10.0, 20.0, 30.0]));
    }

    #[test]
    fn test_empty_series_has_null_statistics() {
        let entry = JsonSeries::new("x", &RunSeries::from_samples(vec![], 3));
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value["median_ms"].is_null());
        assert!(value["std_dev_ms"].is_null());
        assert_eq!(value["timeouts"], 3);
    }

    #[test]
    fn test_comparison_json_is_ranked() {
        let mut comparison = ComparisonResult::new();
        comparison.push("slow", RunSeries::from_samples(vec![90.0], 1));
        comparison.push("none", RunSeries::from_samples(vec![], 1));
        comparison.push("fast", RunSeries::from_samples(vec![9.0], 1));

        let report = JsonReport::from_report(&BenchmarkReport::Comparison(comparison));
        let labels: Vec<&str> = report.results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(report.mode, "compare");
        assert_eq!(labels, vec!["fast", "slow", "none"]);
    }
}
