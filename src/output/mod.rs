//! Output formatting and display
//!
//! Statistics go to stdout through an `OutputFormatter`; progress goes to
//! stderr through `StderrProgress`.

mod colored;
mod formatter;
mod json;
mod progress;

pub use self::colored::{strip_ansi, ColorScheme, ColoredFormatter};
pub use formatter::{format_stats, table_header, FormattingOptions, OutputFormatter, PlainFormatter};
pub use json::{JsonFormatter, JsonReport, JsonSeries};
pub use progress::StderrProgress;

use crate::types::OutputFormat;
use std::io::IsTerminal;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter for the requested format and color preference
    pub fn create_formatter(format: OutputFormat, enable_color: bool) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Text => {
                let options = FormattingOptions {
                    enable_color,
                    ..Default::default()
                };
                if enable_color {
                    Box::new(ColoredFormatter::new(options))
                } else {
                    Box::new(PlainFormatter::new(options))
                }
            }
        }
    }
}

/// Resolve the color flags against the environment
///
/// `--color` forces color, `--no-color` forbids it; otherwise color is used only
/// when stdout is a terminal that does not opt out via `NO_COLOR` or `TERM=dumb`.
pub fn resolve_color(force: bool, disable: bool) -> bool {
    if disable {
        false
    } else if force {
        true
    } else {
        std::io::stdout().is_terminal() && ColoredFormatter::supports_color()
    }
}
