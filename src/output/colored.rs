//! Colored formatter implementation with terminal color support
//!
//! Colour is applied after padding so the columns line up exactly as in the
//! plain output.

use super::formatter::{table_header, FormattingOptions, OutputFormatter};
use crate::{models::metrics::RunSeries, types::PerformanceLevel};
use colored::*;

impl PerformanceLevel {
    /// Get color for this performance level
    pub fn color(&self) -> Color {
        match self {
            Self::Instant => Color::Green,
            Self::Fast => Color::Cyan,
            Self::Slow => Color::Yellow,
            Self::Sluggish => Color::Red,
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub error: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            error: Color::Red,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Apply bold formatting if colors are enabled
    fn bold(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    /// Bold and colored, if colors are enabled
    fn styled(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color).bold()
        } else {
            text.normal()
        }
    }

    /// Check if terminal supports colors
    pub fn supports_color() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map(|term| term != "dumb").unwrap_or(true)
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_stats(&self, label: &str, series: &RunSeries) -> String {
        let width = self.options.label_width;
        let padded_label = format!("{:<width$}", label, width = width);

        let (Some(median), Some(min), Some(max)) = (series.median(), series.min(), series.max()) else {
            return format!(
                "{}  {}",
                self.bold(&padded_label),
                self.colorize("no successful runs", self.color_scheme.error)
            );
        };

        let level = PerformanceLevel::from_millis(median);
        let median_text = format!("{:>6.0}", median);
        format!(
            "{}  median={}ms  {}  {}",
            self.bold(&padded_label),
            self.colorize(&median_text, level.color()),
            self.colorize(&format!("min={:.0}ms  max={:.0}ms", min, max), self.color_scheme.muted),
            self.colorize(&format!("(n={})", series.len()), self.color_scheme.muted),
        )
    }

    fn format_table_header(&self) -> String {
        self.styled(&table_header(self.options.label_width), self.color_scheme.header)
            .to_string()
    }
}

/// Remove ANSI SGR sequences
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
