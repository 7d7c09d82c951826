//! Usage text and topic help
//!
//! The main help is what `ttfp` prints on stdout when it is started without
//! a command.

use colored::*;

/// Help text builder for the CLI
pub struct HelpSystem {
    platform: &'static str,
}

impl HelpSystem {
    /// Create a new help system
    pub fn new() -> Self {
        Self {
            platform: std::env::consts::OS,
        }
    }

    /// Full usage text: header, usage patterns, options, examples, topics
    pub fn display_main_help(&self, use_colors: bool) -> String {
        let mut help = String::new();

        help.push_str(&self.format_header(use_colors));
        help.push('\n');
        help.push_str(&self.format_usage_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_options_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_examples_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_footer(use_colors));

        help
    }

    /// Help for a single topic, `None` for an unknown topic
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "examples" => Some(self.format_examples_section(use_colors)),
            "compare" | "comparison" => Some(self.format_compare_help(use_colors)),
            "timeout" | "timeouts" => Some(self.format_timeout_help(use_colors)),
            "output" | "formatting" => Some(self.format_output_help(use_colors)),
            _ => None,
        }
    }

    fn section_header(&self, title: &str, use_colors: bool) -> String {
        if use_colors {
            title.bright_green().bold().to_string()
        } else {
            title.to_string()
        }
    }

    fn format_header(&self, use_colors: bool) -> String {
        let title = "ttfp";
        let subtitle = "Time-to-first-paint benchmark for terminal applications";

        if use_colors {
            format!(
                "{} - {}\nVersion: {} | Platform: {}\n",
                title.bright_cyan().bold(),
                subtitle.bright_blue(),
                crate::VERSION.green(),
                self.platform.yellow()
            )
        } else {
            format!(
                "{} - {}\nVersion: {} | Platform: {}\n",
                title,
                subtitle,
                crate::VERSION,
                self.platform
            )
        }
    }

    fn format_usage_section(&self, use_colors: bool) -> String {
        let usage_patterns = [
            "ttfp [OPTIONS] [--] <COMMAND> [ARGS]...",
            "ttfp [OPTIONS] --compare <COMMAND STRING>...",
        ];

        let mut usage = format!("{}\n", self.section_header("USAGE:", use_colors));
        for pattern in usage_patterns {
            if use_colors {
                usage.push_str(&format!("  {}\n", pattern.bright_white()));
            } else {
                usage.push_str(&format!("  {}\n", pattern));
            }
        }

        usage
    }

    fn format_options_section(&self, use_colors: bool) -> String {
        let options = [
            OptionHelp {
                short: Some("r"),
                long: "runs",
                value: "<N>",
                description: "Probes per command (default 10)",
                example: Some("--runs 20"),
            },
            OptionHelp {
                short: None,
                long: "compare",
                value: "",
                description: "Rank several complete, quoted commands by median",
                example: Some("--compare 'nvim --clean' 'vim -u NONE'"),
            },
            OptionHelp {
                short: Some("t"),
                long: "timeout",
                value: "<SECONDS>",
                description: "Wait for the first byte at most this long (default 10)",
                example: Some("--timeout 2.5"),
            },
            OptionHelp {
                short: None,
                long: "format",
                value: "<text|json>",
                description: "Report format on stdout (default text)",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "color",
                value: "",
                description: "Force colored output",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "no-color",
                value: "",
                description: "Disable colored output",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "verbose",
                value: "",
                description: "Log probe activity on stderr",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "debug",
                value: "",
                description: "Debug-level JSON logs with source locations on stderr",
                example: None,
            },
            OptionHelp {
                short: Some("V"),
                long: "version",
                value: "",
                description: "Print version and build information",
                example: None,
            },
            OptionHelp {
                short: Some("h"),
                long: "help",
                value: "",
                description: "Print clap's generated option reference",
                example: None,
            },
        ];

        let mut output = format!("{}\n", self.section_header("OPTIONS:", use_colors));
        for option in options {
            output.push_str(&option.format(use_colors));
            output.push('\n');
        }

        output
    }

    fn format_examples_section(&self, use_colors: bool) -> String {
        let examples = [
            ExampleHelp {
                title: "Single command",
                command: "ttfp lazygit",
                description: "Ten probes of lazygit, median/min/max on one line",
            },
            ExampleHelp {
                title: "Flags belong to the command",
                command: "ttfp --runs 20 -- nvim --clean",
                description: "Everything after the command name is passed through",
            },
            ExampleHelp {
                title: "Compare implementations",
                command: "ttfp --compare --runs 5 'bun src/index.tsx' 'node dist/index.js'",
                description: "Ranked table, fastest median first",
            },
            ExampleHelp {
                title: "Machine-readable output",
                command: "ttfp --format json htop",
                description: "Same statistics plus mean, std-dev and raw samples as JSON",
            },
        ];

        let mut output = format!("{}\n", self.section_header("EXAMPLES:", use_colors));
        for example in examples {
            output.push_str(&example.format(use_colors));
            output.push('\n');
        }

        output
    }

    fn format_footer(&self, use_colors: bool) -> String {
        let mut footer = format!("{}\n", self.section_header("NOTES:", use_colors));
        footer.push_str("  Each probe runs the command on a fresh 24x80 pseudo-terminal and stops\n");
        footer.push_str("  the clock at the first byte it writes. A command that exits silently or\n");
        footer.push_str("  stays quiet past --timeout counts as a timeout, not as a failure.\n");
        footer.push_str("  Statistics go to stdout; progress and logs go to stderr.\n");
        footer
    }

    fn format_compare_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n", self.section_header("COMPARE MODE:", use_colors));
        help.push_str("Every positional argument is one complete command, split with POSIX\n");
        help.push_str("shell quoting rules (no expansion, no pipes). All strings are checked\n");
        help.push_str("before the first probe; an unbalanced quote aborts with exit status 1.\n\n");
        help.push_str("Rows are ordered by ascending median. Commands with no successful run\n");
        help.push_str("are listed last, in the order they were given.\n");
        help
    }

    fn format_timeout_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n", self.section_header("TIMEOUTS:", use_colors));
        help.push_str("--timeout bounds the wait for the first byte of each probe, measured\n");
        help.push_str("from launch. Fractions are allowed; the upper limit is 300 seconds.\n");
        help.push_str("After the first byte or the deadline the child is killed and reaped,\n");
        help.push_str("so a probe never outlives its timeout by more than the teardown.\n");
        help
    }

    fn format_output_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n", self.section_header("OUTPUT:", use_colors));
        help.push_str("text: <label>  median=<ms>ms  min=<ms>ms  max=<ms>ms  (n=<successes>)\n");
        help.push_str("      or <label>  no successful runs\n");
        help.push_str("json: {\"mode\": ..., \"results\": [{\"label\", \"runs\", \"successes\",\n");
        help.push_str("      \"timeouts\", \"median_ms\", ..., \"samples_ms\"}]}\n");
        help.push_str("Color never changes column widths.\n");
        help
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of the options section
struct OptionHelp {
    short: Option<&'static str>,
    long: &'static str,
    value: &'static str,
    description: &'static str,
    example: Option<&'static str>,
}

impl OptionHelp {
    fn format(&self, use_colors: bool) -> String {
        let mut option_str = String::new();

        if let Some(short) = self.short {
            if use_colors {
                option_str.push_str(&format!("  {}, ", format!("-{}", short).bright_cyan()));
            } else {
                option_str.push_str(&format!("  -{}, ", short));
            }
        } else {
            option_str.push_str("      ");
        }

        let long_with_value = if self.value.is_empty() {
            format!("--{}", self.long)
        } else {
            format!("--{} {}", self.long, self.value)
        };

        // Pad before coloring so escapes don't eat the column
        let padded = format!("{:<24}", long_with_value);
        if use_colors {
            option_str.push_str(&format!("{} {}", padded.bright_cyan(), self.description.white()));
        } else {
            option_str.push_str(&format!("{} {}", padded, self.description));
        }

        if let Some(example) = self.example {
            let line = format!("Example: {}", example);
            if use_colors {
                option_str.push_str(&format!("\n{}{}", " ".repeat(31), line.bright_blue().italic()));
            } else {
                option_str.push_str(&format!("\n{}{}", " ".repeat(31), line));
            }
        }

        option_str
    }
}

/// One entry of the examples section
struct ExampleHelp {
    title: &'static str,
    command: &'static str,
    description: &'static str,
}

impl ExampleHelp {
    fn format(&self, use_colors: bool) -> String {
        if use_colors {
            format!(
                "  {}:\n    {}\n    {}\n",
                self.title.bright_yellow().bold(),
                self.command.bright_white(),
                self.description.bright_blue().italic()
            )
        } else {
            format!("  {}:\n    {}\n    {}\n", self.title, self.command, self.description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_help_sections() {
        let help = HelpSystem::new().display_main_help(false);
        assert!(help.starts_with("ttfp - "));
        assert!(help.contains("USAGE:"));
        assert!(help.contains("OPTIONS:"));
        assert!(help.contains("EXAMPLES:"));
        assert!(help.contains("--compare"));
        assert!(help.contains("--runs <N>"));
    }

    #[test]
    fn test_plain_help_has_no_escapes() {
        let help = HelpSystem::new().display_main_help(false);
        assert!(!help.contains('\x1b'));
    }

    #[test]
    fn test_topic_help() {
        let help_system = HelpSystem::new();
        assert!(help_system
            .display_topic_help("compare", false)
            .unwrap()
            .contains("unbalanced quote"));
        assert!(help_system
            .display_topic_help("TIMEOUT", false)
            .unwrap()
            .contains("300 seconds"));
        assert!(help_system.display_topic_help("output", false).is_some());
        assert!(help_system.display_topic_help("examples", false).is_some());
        assert!(help_system.display_topic_help("dns", false).is_none());
    }

    #[test]
    fn test_option_help_formatting() {
        let option = OptionHelp {
            short: Some("r"),
            long: "runs",
            value: "<N>",
            description: "Probes per command",
            example: Some("--runs 3"),
        };
        let formatted = option.format(false);
        assert!(formatted.starts_with("  -r, --runs <N>"));
        assert!(formatted.contains("Probes per command"));
        assert!(formatted.contains("Example: --runs 3"));

        let no_short = OptionHelp {
            short: None,
            long: "debug",
            value: "",
            description: "d",
            example: None,
        };
        assert!(no_short.format(false).starts_with("      --debug"));
    }

    #[test]
    fn test_example_help_formatting() {
        let example = ExampleHelp {
            title: "T",
            command: "ttfp x",
            description: "D",
        };
        assert_eq!(example.format(false), "  T:\n    ttfp x\n    D\n");
    }
}
