//! CLI options interaction tests
//!
//! These tests run the real binary and check exit statuses and the split
//! between stdout (statistics) and stderr (everything else).

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ttfp").unwrap();
    cmd.env_remove("NO_COLOR");
    cmd
}

#[test]
fn test_no_command_prints_usage_and_fails() {
    create_test_cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("--compare"));
}

#[test]
fn test_lone_separator_counts_as_no_command() {
    create_test_cmd()
        .arg("--")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn test_color_flags_are_mutually_exclusive() {
    create_test_cmd()
        .args(["--color", "--no-color", "printf", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--no-color"));
}

#[test]
fn test_unparsable_numbers_are_usage_errors() {
    create_test_cmd()
        .args(["--runs", "several", "printf", "x"])
        .assert()
        .code(2);

    create_test_cmd()
        .args(["--format", "xml", "printf", "x"])
        .assert()
        .code(2);
}

#[test]
fn test_rejected_configuration_exits_one() {
    create_test_cmd()
        .args(["--timeout", "0", "printf", "x"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("[CONFIG]"));

    create_test_cmd()
        .args(["--runs", "1001", "printf", "x"])
        .assert()
        .code(1);
}

#[test]
fn test_bad_quoting_in_compare_mode() {
    create_test_cmd()
        .args(["--compare", "--runs", "1", "echo \"unterminated"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("[PARSE]"));
}

#[test]
fn test_bad_quoting_aborts_before_any_probe() {
    create_test_cmd()
        .args(["--compare", "--runs", "1", "printf a", "printf 'b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Benchmarking:").not())
        .stderr(predicate::str::contains("Command 2 of 2"));
}

#[test]
fn test_single_command_statistics_line() {
    let output = create_test_cmd()
        .args(["--runs", "3", "--no-color", "printf", "x"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let line = regex::Regex::new(r"^printf x {22}  median=\s*\d+ms  min=\d+ms  max=\d+ms  \(n=3\)\n$").unwrap();
    assert!(line.is_match(&stdout), "unexpected stdout: {:?}", stdout);
}

#[test]
fn test_separator_and_flags_pass_through() {
    create_test_cmd()
        .args(["--runs", "1", "--", "sh", "-c", "printf hi"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("sh -c printf hi "));
}

#[test]
fn test_silent_command_reports_no_successful_runs() {
    create_test_cmd()
        .args(["--runs", "2", "--timeout", "2", "true"])
        .assert()
        .success()
        .stdout(format!("{:<30}  no successful runs\n", "true"));
}

#[test]
fn test_zero_runs_is_not_an_error() {
    create_test_cmd()
        .args(["--runs", "0", "printf", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no successful runs"))
        .stderr(predicate::str::contains("nothing will be measured"));
}

#[test]
fn test_missing_program_is_a_timeout_not_an_error() {
    create_test_cmd()
        .args(["--runs", "1", "--timeout", "1", "definitely-not-a-real-program-ttfp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no successful runs"));
}

#[test]
fn test_launch_failure_keeps_progress_in_place() {
    let output = create_test_cmd()
        .args(["--runs", "3", "--no-color", "/nonexistent/ttfp-test-binary"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(!stderr.contains("Could not launch"), "unexpected log: {:?}", stderr);
    assert!(stderr.contains("\r  run 1/3: timeout\r  run 2/3: timeout\r  run 3/3: timeout\r"));

    let debug = create_test_cmd()
        .args(["--debug", "--runs", "1", "--no-color", "/nonexistent/ttfp-test-binary"])
        .output()
        .unwrap();
    let stderr = String::from_utf8(debug.stderr).unwrap();
    assert!(stderr.contains("Could not launch '/nonexistent/ttfp-test-binary'"));
}

#[test]
fn test_compare_mode_ranked_table() {
    let output = create_test_cmd()
        .args(["--compare", "--runs", "2", "--timeout", "2", "true", "printf a"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines[0], "");
    assert!(lines[1].starts_with("Command "));
    assert!(lines[1].ends_with("Median     Min     Max"));
    assert_eq!(lines[2], "-".repeat(60));
    assert!(lines[3].starts_with("printf a "));
    assert_eq!(lines[4], format!("{:<30}  no successful runs", "true"));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Benchmarking: true"));
    assert!(stderr.contains("Benchmarking: printf a"));
}

#[test]
fn test_progress_goes_to_stderr() {
    create_test_cmd()
        .args(["--runs", "2", "printf", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("run 1/2").not())
        .stderr(predicate::str::contains("run 1/2"))
        .stderr(predicate::str::contains("run 2/2"));
}

#[test]
fn test_json_output_parses() {
    let output = create_test_cmd()
        .args(["--format", "json", "--runs", "2", "printf", "x"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["mode"], "single");
    assert_eq!(value["results"][0]["label"], "printf x");
    assert_eq!(value["results"][0]["runs"], 2);
    assert_eq!(value["results"][0]["successes"], 2);
    assert_eq!(value["results"][0]["samples_ms"].as_array().unwrap().len(), 2);
}

#[test]
fn test_forced_color_keeps_layout() {
    let output = create_test_cmd()
        .args(["--color", "--runs", "1", "printf", "x"])
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains('\x1b'));
    let stripped = tui_ttfp::output::strip_ansi(&stdout);
    assert!(stripped.starts_with(&format!("{:<30}  median=", "printf x")));
}

#[test]
fn test_piped_output_is_uncolored_by_default() {
    create_test_cmd()
        .args(["--runs", "1", "printf", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b").not());
}

#[test]
fn test_few_runs_warning_on_stderr() {
    create_test_cmd()
        .args(["--runs", "1", "--no-color", "printf", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[WARNING] Run count of 1"));
}

#[test]
fn test_version_flag() {
    create_test_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("commit: "))
        .stdout(predicate::str::contains("built: "));
}

#[test]
fn test_help_topic() {
    create_test_cmd()
        .args(["--no-color", "--help-topic", "compare"])
        .assert()
        .success()
        .stdout(predicate::str::contains("COMPARE MODE:"));
}

#[test]
fn test_verbose_logs_on_stderr_only() {
    let output = create_test_cmd()
        .args(["--verbose", "--no-color", "--runs", "1", "printf", "x"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stderr.contains("INFO"));
}

#[test]
fn test_debug_logs_are_json_lines() {
    let output = create_test_cmd()
        .args(["--debug", "--no-color", "--runs", "1", "printf", "x"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    let json_lines: Vec<serde_json::Value> = stderr
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(!json_lines.is_empty());
    assert!(json_lines.iter().any(|entry| entry["level"] == "Debug"));
}
