//! ttfp - time-to-first-paint benchmark for terminal applications
//!
//! Launches the given command on a fresh pseudo-terminal, stops the clock at
//! the first byte it writes, repeats, and prints median/min/max on stdout.

use clap::Parser;
use std::process;
use tui_ttfp::{
    cli::Cli,
    config::{display_config_summary, load_config, validate_config},
    error::{ErrorReporter, Result},
    executor::Benchmark,
    log_debug, log_info,
    logging::LoggerFactory,
    output::{OutputFormatterFactory, StderrProgress},
    probe::{ProbeConfig, Prober},
    PKG_NAME, VERSION,
};

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        eprintln!("Please report this issue with the command line that triggered it.");
        process::exit(99);
    }));

    let cli = Cli::parse();

    if cli.version {
        println!("{}", Cli::version_info());
        return;
    }

    if let Some(topic) = cli.help_topic.as_deref() {
        println!("{}", cli.display_topic_help(topic));
        return;
    }

    if !cli.has_command() {
        println!("{}", cli.display_help());
        process::exit(1);
    }

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose || cli.debug);

    if let Err(e) = run_application(cli) {
        reporter.report_error(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
fn run_application(cli: Cli) -> Result<()> {
    let config = load_config(cli)?;
    colored::control::set_override(config.enable_color);

    let factory = LoggerFactory::new(config.clone());
    let app_logger = factory.create_logger("APP");
    log_debug!(app_logger, "{} v{} starting", PKG_NAME, VERSION);
    log_debug!(app_logger, "Configuration:\n{}", display_config_summary(&config));

    for warning in validate_config(&config)? {
        eprintln!("{}", warning.format(config.enable_color));
    }

    let prober = Prober::with_logger(ProbeConfig::from(&config), factory.create_probe_logger());
    let benchmark = Benchmark::from_config(&config, prober)?.with_logger(factory.create_probe_logger());

    log_info!(
        app_logger,
        "Running {} probe(s) per command with a {}s timeout",
        config.runs,
        config.timeout_seconds
    );

    let report = benchmark.run(&mut StderrProgress::new()).inspect_err(|e| {
        // Structured copy for log readers; the reporter prints the plain one
        if config.verbose || config.debug {
            factory
                .create_error_logger()
                .log_error(e, Some("Benchmark aborted"), None);
        }
    })?;

    let formatter = OutputFormatterFactory::create_formatter(config.output_format, config.enable_color);
    println!("{}", formatter.format_report(&report)?);

    Ok(())
}
