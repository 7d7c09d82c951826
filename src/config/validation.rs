//! Non-fatal configuration checks
//!
//! `Config::validate` rejects values the tool cannot run with; the checks here
//! only flag settings that are legal but likely to give misleading numbers.

use crate::{error::Result, models::Config};
use colored::*;

/// Runs below this give a median that is mostly noise
pub const MIN_RELIABLE_RUNS: u32 = 3;
/// Runs above this make a single invocation noticeably long
pub const HIGH_RUN_COUNT: u32 = 100;
/// Timeouts below this can cut off slow but healthy startups
pub const SHORT_TIMEOUT_SECONDS: f64 = 1.0;
/// Timeouts above this make a hung command stall the whole series
pub const LONG_TIMEOUT_SECONDS: f64 = 60.0;

/// Configuration validator with advanced validation rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate, then collect warnings for legal but questionable settings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_run_settings(config));
        warnings.extend(Self::validate_commands(config));
        Ok(warnings)
    }

    fn validate_run_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.runs == 0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                "Run count is 0; nothing will be measured".to_string(),
            ));
        } else if config.runs < MIN_RELIABLE_RUNS {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Run count of {} may not provide reliable statistics (recommended: >= {})",
                    config.runs, MIN_RELIABLE_RUNS
                ),
            ));
        } else if config.runs > HIGH_RUN_COUNT {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("High run count of {} will increase execution time", config.runs),
            ));
        }

        if config.timeout_seconds < SHORT_TIMEOUT_SECONDS {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Timeout of {}s may cut off slow startups and count them as timeouts",
                    config.timeout_seconds
                ),
            ));
        } else if config.timeout_seconds > LONG_TIMEOUT_SECONDS {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Long timeout of {}s will slow down runs of silent commands",
                    config.timeout_seconds
                ),
            ));
        }

        // Worst case: every probe runs into the deadline
        let worst_case = config.timeout_seconds
            * f64::from(config.runs)
            * config.commands.len().max(1) as f64;
        if worst_case > 600.0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Worst case duration is {:.0}s if every probe times out", worst_case),
            ));
        }

        warnings
    }

    fn validate_commands(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.compare && config.commands.len() == 1 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "Comparison with a single command; the table will have one row".to_string(),
            ));
        }

        if !config.compare {
            if let Some(first) = config.commands.first() {
                if first.contains(char::is_whitespace) {
                    warnings.push(ValidationWarning::new(
                        ValidationLevel::Warning,
                        format!(
                            "Program name '{}' contains whitespace; did you mean --compare?",
                            first
                        ),
                    ));
                }
            }
        }

        warnings
    }
}

/// Validation warning levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }

    /// Get color for terminal display
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Warning => Color::Yellow,
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display on stderr
    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        if use_color {
            format!("{} {}", tag.color(self.level.color()).bold(), self.message)
        } else {
            format!("{} {}", tag, self.message)
        }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(runs: u32, timeout_seconds: f64) -> Config {
        Config {
            runs,
            timeout_seconds,
            commands: vec!["htop".to_string()],
            ..Config::default()
        }
    }

    fn messages(config: &Config) -> Vec<String> {
        validate_config(config)
            .unwrap()
            .into_iter()
            .map(|w| w.message)
            .collect()
    }

    #[test]
    fn test_default_settings_have_no_warnings() {
        assert!(messages(&config_with(10, 10.0)).is_empty());
    }

    #[test]
    fn test_boundary_values_runs() {
        assert!(messages(&config_with(0, 10.0))[0].contains("nothing will be measured"));
        assert!(messages(&config_with(2, 10.0))[0].contains("reliable statistics"));
        assert!(messages(&config_with(3, 10.0)).is_empty());
        assert!(messages(&config_with(100, 1.0)).is_empty());
        assert!(messages(&config_with(101, 1.0))[0].contains("High run count"));
    }

    #[test]
    fn test_boundary_values_timeout() {
        let short = validate_config(&config_with(10, 0.5)).unwrap();
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].level, ValidationLevel::Warning);

        assert!(messages(&config_with(10, 1.0)).is_empty());
        assert!(messages(&config_with(10, 60.0)).is_empty());
        assert!(messages(&config_with(5, 61.0))[0].contains("Long timeout"));
    }

    #[test]
    fn test_worst_case_duration() {
        let all = messages(&config_with(50, 30.0));
        assert!(all.iter().any(|m| m.contains("Worst case duration is 1500s")));
    }

    #[test]
    fn test_single_command_comparison() {
        let mut config = config_with(10, 10.0);
        config.compare = true;
        assert!(messages(&config)[0].contains("single command"));
    }

    #[test]
    fn test_whitespace_in_program_suggests_compare() {
        let mut config = config_with(10, 10.0);
        config.commands = vec!["bun src/index.tsx".to_string()];
        assert!(messages(&config)[0].contains("--compare"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let error = validate_config(&config_with(10, -1.0)).unwrap_err();
        assert_eq!(error.category(), "CONFIG");
    }

    #[test]
    fn test_validation_warning_format() {
        let warning = ValidationWarning::new(ValidationLevel::Info, "hi".to_string());
        assert_eq!(warning.format(false), "[INFO] hi");
        assert_eq!(ValidationLevel::Warning.as_str(), "WARNING");
        assert_eq!(ValidationLevel::Warning.color(), Color::Yellow);
    }
}
