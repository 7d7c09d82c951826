//! Output validation tests
//!
//! These pin the stdout layout of the text report and check that the JSON
//! report carries the same numbers.

use assert_cmd::prelude::*;
use regex::Regex;
use serde_json::Value;
use std::process::Command;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ttfp").unwrap();
    cmd.arg("--no-color");
    cmd
}

/// Validation patterns for the text report
struct OutputPatterns {
    /// A statistics row with captures for label, median, min, max, n
    pub stats_line: Regex,
    /// A row for a command that never painted
    pub empty_line: Regex,
    /// The comparison header
    pub header_line: Regex,
}

impl Default for OutputPatterns {
    fn default() -> Self {
        Self {
            stats_line: Regex::new(
                r"^(?P<label>.{30,}?)  median=\s*(?P<median>\d+)ms  min=(?P<min>\d+)ms  max=(?P<max>\d+)ms  \(n=(?P<n>\d+)\)$",
            )
            .unwrap(),
            empty_line: Regex::new(r"^.{30,}?  no successful runs$").unwrap(),
            header_line: Regex::new(r"^Command {23}    Median     Min     Max$").unwrap(),
        }
    }
}

fn stdout_of(args: &[&str]) -> String {
    let output = create_test_cmd().args(args).output().unwrap();
    assert!(output.status.success(), "ttfp {:?} failed: {:?}", args, output);
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_statistics_line_is_ordered() {
    let patterns = OutputPatterns::default();
    let stdout = stdout_of(&["--runs", "5", "printf", "x"]);
    let line = stdout.trim_end_matches('\n');

    let caps = patterns.stats_line.captures(line).expect("statistics line");
    let median: u64 = caps["median"].parse().unwrap();
    let min: u64 = caps["min"].parse().unwrap();
    let max: u64 = caps["max"].parse().unwrap();

    assert_eq!(caps["label"].trim_end(), "printf x");
    assert_eq!(caps["label"].len(), 30);
    assert!(min <= median && median <= max);
    assert_eq!(&caps["n"], "5");
}

#[test]
fn test_comparison_table_layout() {
    let patterns = OutputPatterns::default();
    let stdout = stdout_of(&[
        "--compare",
        "--runs",
        "2",
        "--timeout",
        "2",
        "printf a",
        "sh -c 'exit 3'",
        "sh -c 'sleep 0.2; printf b'",
    ]);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].is_empty());
    assert!(patterns.header_line.is_match(lines[1]), "header: {:?}", lines[1]);
    assert_eq!(lines[2].len(), 60);
    assert!(lines[2].chars().all(|c| c == '-'));

    let medians: Vec<u64> = lines[3..5]
        .iter()
        .map(|line| {
            patterns.stats_line.captures(line).expect("ranked row")["median"]
                .parse()
                .unwrap()
        })
        .collect();
    assert!(medians[0] <= medians[1]);
    assert!(lines[3].starts_with("printf a"));
    assert!(patterns.empty_line.is_match(lines[5]));
    assert!(lines[5].starts_with("sh -c 'exit 3'"));
}

#[test]
fn test_json_matches_text_statistics() {
    let json = stdout_of(&["--format", "json", "--runs", "4", "printf", "x"]);
    let value: Value = serde_json::from_str(&json).unwrap();
    let entry = &value["results"][0];

    let samples: Vec<f64> = entry["samples_ms"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert_eq!(samples.len(), 4);
    assert!(samples.windows(2).all(|w| w[0] <= w[1]));

    // Upper-middle element for even counts
    assert_eq!(entry["median_ms"].as_f64().unwrap(), samples[2]);
    assert_eq!(entry["min_ms"].as_f64().unwrap(), samples[0]);
    assert_eq!(entry["max_ms"].as_f64().unwrap(), samples[3]);
    assert_eq!(entry["timeouts"], 0);
    assert!(entry["std_dev_ms"].as_f64().unwrap() >= 0.0);
}

#[test]
fn test_json_comparison_is_ranked() {
    let json = stdout_of(&[
        "--format",
        "json",
        "--compare",
        "--runs",
        "1",
        "--timeout",
        "2",
        "true",
        "printf z",
    ]);
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["mode"], "compare");
    assert_eq!(value["results"][0]["label"], "printf z");
    assert_eq!(value["results"][1]["label"], "true");
    assert!(value["results"][1]["median_ms"].is_null());
    assert_eq!(value["results"][1]["timeouts"], 1);
}

#[test]
fn test_long_labels_push_columns_right() {
    let patterns = OutputPatterns::default();
    let stdout = stdout_of(&[
        "--runs",
        "1",
        "sh",
        "-c",
        "printf x # padding padding padding padding",
    ]);
    let line = stdout.trim_end_matches('\n');
    assert!(patterns.stats_line.is_match(line));
    assert!(line.starts_with("sh -c printf x # padding padding padding padding  median="));
}
