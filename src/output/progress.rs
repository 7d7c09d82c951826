//! In-place progress line on stderr

use crate::executor::{ProgressObserver, RunProgress};
use crate::models::ProbeResult;
use std::io::{self, Write};

/// Width of the blank run that erases the progress line
const CLEAR_WIDTH: usize = 40;

/// Renders `run i/n: ...` on one overwritten line
pub struct StderrProgress<W: Write = io::Stderr> {
    writer: W,
}

impl StderrProgress {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }
}

impl Default for StderrProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StderrProgress<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    // Progress is best effort; a closed stderr must not stop the benchmark
    fn emit(&mut self, text: &str) {
        let _ = self.writer.write_all(text.as_bytes());
        let _ = self.writer.flush();
    }
}

impl<W: Write> ProgressObserver for StderrProgress<W> {
    fn on_series_start(&mut self, label: &str) {
        self.emit(&format!("Benchmarking: {}\n", label));
    }

    fn on_run(&mut self, progress: &RunProgress) {
        let outcome = match progress.result {
            ProbeResult::Latency(ms) => format!("{:.0}ms", ms),
            ProbeResult::Timeout => "timeout".to_string(),
        };
        self.emit(&format!("\r  run {}/{}: {}", progress.index, progress.total, outcome));
    }

    fn on_series_end(&mut self) {
        self.emit(&format!("\r{}\r", " ".repeat(CLEAR_WIDTH)));
    }
}
