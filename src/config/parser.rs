//! Configuration parsing from CLI arguments

use crate::{
    cli::Cli,
    error::Result,
    models::{command::strip_separator, Config},
};

/// Builds a `Config` from defaults plus command line overrides
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        config.runs = self.cli.runs;
        config.timeout_seconds = self.cli.timeout;
        config.compare = self.cli.compare;
        config.commands = strip_separator(&self.cli.command).to_vec();
        config.output_format = self.cli.format;
        config.enable_color = self.cli.use_colors();

        // Set verbose and debug flags (these are CLI-only)
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!(
        "Mode: {}",
        if config.compare { "compare" } else { "single" }
    ));
    summary.push(format!("Commands: {}", config.commands.join(" | ")));
    summary.push(format!("Runs: {}", config.runs));
    summary.push(format!("Timeout: {}s", config.timeout_seconds));
    summary.push(format!("Window: {}x{}", config.rows, config.cols));
    summary.push(format!("Default TERM: {}", config.term));
    summary.push(format!("Format: {}", config.output_format.as_str()));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
