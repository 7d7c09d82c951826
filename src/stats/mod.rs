//! Statistics over first-paint latency series

use crate::models::metrics::RunSeries;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Summary statistics of one run series, all times in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStatistics {
    /// Element at index `len / 2` of the sorted samples
    pub median_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    /// Population standard deviation
    pub std_dev_ms: f64,
    /// Runs that observed a first byte
    pub successes: usize,
    /// Runs that did not
    pub timeouts: u32,
    /// Runs requested
    pub runs: u32,
}

impl SeriesStatistics {
    /// Calculate statistics for a series; `None` when nothing succeeded
    pub fn from_series(series: &RunSeries) -> Option<Self> {
        let samples = series.samples_ms();
        let median_ms = series.median()?;
        let mean_ms = mean(samples)?;

        Some(Self {
            median_ms,
            min_ms: series.min()?,
            max_ms: series.max()?,
            mean_ms,
            std_dev_ms: std_dev(samples, mean_ms),
            successes: samples.len(),
            timeouts: series.timeouts(),
            runs: series.requested(),
        })
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation around a precomputed mean
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|&x| (x - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Median by the `len / 2` index rule over an already sorted slice
pub fn sorted_median(sorted: &[f64]) -> Option<f64> {
    sorted.get(sorted.len() / 2).copied()
}

/// Safe comparison of floating point numbers, handling NaN values
pub fn safe_float_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_for_three_samples() {
        let series = RunSeries::from_samples(vec![30.0, 10.0, 20.0], 4);
        let stats = SeriesStatistics::from_series(&series).unwrap();

        assert_eq!(stats.median_ms, 20.0);
        assert_eq!(stats.min_ms, 10.0);
        assert_eq!(stats.max_ms, 30.0);
        assert_eq!(stats.mean_ms, 20.0);
        assert!((stats.std_dev_ms - (200.0f64 / 3.0).sqrt()).abs() < 1e-9);
        assert_eq!(stats.successes, 3);
        assert_eq!(stats.timeouts, 1);
        assert_eq!(stats.runs, 4);
    }

    #[test]
    fn test_empty_series_has_no_statistics() {
        let series = RunSeries::from_samples(vec![], 5);
        assert!(SeriesStatistics::from_series(&series).is_none());
    }

    #[test]
    fn test_even_count_median_is_not_averaged() {
        let series = RunSeries::from_samples(vec![10.0, 20.0], 2);
        let stats = SeriesStatistics::from_series(&series).unwrap();
        assert_eq!(stats.median_ms, 20.0);
        assert_eq!(stats.mean_ms, 15.0);
    }

    #[test]
    fn test_single_sample_has_zero_std_dev() {
        assert_eq!(std_dev(&[42.0], 42.0), 0.0);
        assert_eq!(std_dev(&[], 0.0), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn test_sorted_median() {
        assert_eq!(sorted_median(&[]), None);
        assert_eq!(sorted_median(&[1.0, 2.0, 3.0, 4.0]), Some(3.0));
        assert_eq!(sorted_median(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn test_safe_float_cmp() {
        assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
        assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
        assert_eq!(safe_float_cmp(f64::NAN, 1.0), Ordering::Equal);
        assert_eq!(safe_float_cmp(f64::INFINITY, 1.0), Ordering::Greater);
    }
}
