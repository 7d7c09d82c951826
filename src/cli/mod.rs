//! Command-line interface module

pub mod help;

pub use help::HelpSystem;

use crate::{output::resolve_color, types::OutputFormat};
use clap::Parser;

/// ttfp - measure how long a terminal application takes to paint its first byte
#[derive(Parser, Debug, Clone)]
#[command(name = "ttfp")]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Number of probes per command
    #[arg(short, long, default_value_t = crate::defaults::DEFAULT_RUNS)]
    pub runs: u32,

    /// Treat every positional argument as a complete shell-style command
    #[arg(long)]
    pub compare: bool,

    /// Seconds to wait for the first byte of each probe
    #[arg(short, long, value_name = "SECONDS", default_value_t = crate::defaults::DEFAULT_TIMEOUT.as_secs_f64())]
    pub timeout: f64,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log probe activity on stderr
    #[arg(long)]
    pub verbose: bool,

    /// Debug-level JSON logs with source locations on stderr
    #[arg(long)]
    pub debug: bool,

    /// Show help for a topic (compare, timeout, output, examples)
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,

    /// Print version and build information
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Command to measure (or, with --compare, one quoted command per argument)
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.compare && self.command.iter().all(|c| c.trim().is_empty()) {
            return Err("--compare needs at least one command string".to_string());
        }

        Ok(())
    }

    /// Whether anything to measure was given
    pub fn has_command(&self) -> bool {
        self.command
            .iter()
            .any(|arg| arg != crate::models::command::ARG_SEPARATOR)
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        resolve_color(self.color, self.no_color)
    }

    /// Usage text shown when no command is given
    pub fn display_help(&self) -> String {
        HelpSystem::new().display_main_help(self.use_colors())
    }

    /// Help for `--help-topic`, falling back to the usage text for unknown topics
    pub fn display_topic_help(&self, topic: &str) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();
        help_system
            .display_topic_help(topic, use_colors)
            .unwrap_or_else(|| {
                format!(
                    "Unknown help topic: '{}'\n\nAvailable topics: compare, timeout, output, examples\n\n{}",
                    topic,
                    help_system.display_main_help(use_colors)
                )
            })
    }

    /// Version line plus build metadata
    pub fn version_info() -> String {
        format!(
            "{} {}\ncommit: {}\nbuilt: {}",
            crate::PKG_NAME,
            crate::VERSION,
            option_env!("GIT_COMMIT").unwrap_or("unknown"),
            option_env!("BUILD_TIME").unwrap_or("unknown"),
        )
    }
}
