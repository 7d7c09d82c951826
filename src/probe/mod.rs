//! Single-run first-paint prober
//!
//! A probe launches the command on a fresh pseudo-terminal, waits for the first
//! byte it writes, and tears the child down before returning. It never fails:
//! anything that prevents observing a byte is reported as `ProbeResult::Timeout`.

pub mod session;

pub use session::{FirstByte, PtySession};

use crate::logging::ProbeLogger;
use crate::models::{Command, Config, ProbeResult};
use nix::unistd::Pid;
use std::time::{Duration, Instant};

/// Anything that can measure one command once
pub trait Probe {
    fn probe(&self, command: &Command) -> ProbeResult;
}

/// Terminal and deadline settings for a probe
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Deadline for the first byte, measured from before pty allocation
    pub timeout: Duration,
    pub rows: u16,
    pub cols: u16,
    /// TERM given to the child when the invoking environment has none
    pub term: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: crate::defaults::DEFAULT_TIMEOUT,
            rows: crate::defaults::DEFAULT_ROWS,
            cols: crate::defaults::DEFAULT_COLS,
            term: crate::defaults::DEFAULT_TERM.to_string(),
        }
    }
}

impl ProbeConfig {
    /// Default terminal with the given timeout; negative or non-finite values mean "no wait"
    pub fn with_timeout_secs(timeout_seconds: f64) -> Self {
        Self {
            timeout: Duration::try_from_secs_f64(timeout_seconds).unwrap_or(Duration::ZERO),
            ..Self::default()
        }
    }
}

impl From<&Config> for ProbeConfig {
    fn from(config: &Config) -> Self {
        Self {
            timeout: Duration::try_from_secs_f64(config.timeout_seconds)
                .unwrap_or(crate::defaults::DEFAULT_TIMEOUT),
            rows: config.rows,
            cols: config.cols,
            term: config.term.clone(),
        }
    }
}

/// Outcome of one probe plus the pid it used
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRecord {
    pub result: ProbeResult,
    /// `None` when the child was never launched
    pub child_pid: Option<Pid>,
    pub correlation_id: String,
}

/// Pseudo-terminal prober
#[derive(Debug, Clone)]
pub struct Prober {
    config: ProbeConfig,
    logger: ProbeLogger,
}

impl Prober {
    /// Create a prober that logs uncolored warnings only
    pub fn new(config: ProbeConfig) -> Self {
        Self::with_logger(config, ProbeLogger::default())
    }

    pub fn with_logger(config: ProbeConfig, logger: ProbeLogger) -> Self {
        Self { config, logger }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Measure once and report which child was used
    pub fn run_once(&self, command: &Command) -> ProbeRecord {
        let correlation_id = self.logger.new_correlation_id();
        let start = Instant::now();

        let mut session = match PtySession::spawn(command, &self.config, self.logger.clone()) {
            Ok(session) => session,
            Err(error) => {
                self.logger.log_spawn_failure(&correlation_id, command, &error);
                return ProbeRecord {
                    result: ProbeResult::Timeout,
                    child_pid: None,
                    correlation_id,
                };
            }
        };

        let child_pid = session.pid();
        if let Some(pid) = child_pid {
            self.logger.log_spawned(&correlation_id, command, pid);
        }

        let result = match session.wait_first_byte(start, self.config.timeout) {
            FirstByte::Received(elapsed) => {
                let result = ProbeResult::from_elapsed(elapsed);
                if let Some(ms) = result.latency_ms() {
                    self.logger.log_first_byte(&correlation_id, ms);
                }
                result
            }
            FirstByte::Hangup => {
                self.logger.log_timeout(&correlation_id, "terminal closed without output");
                ProbeResult::Timeout
            }
            FirstByte::Expired => {
                self.logger.log_timeout(&correlation_id, "deadline expired");
                ProbeResult::Timeout
            }
            FirstByte::Failed(error) => {
                self.logger.log_wait_failure(&correlation_id, &error);
                ProbeResult::Timeout
            }
        };

        drop(session);

        ProbeRecord {
            result,
            child_pid,
            correlation_id,
        }
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new(ProbeConfig::default())
    }
}

impl Probe for Prober {
    fn probe(&self, command: &Command) -> ProbeResult {
        self.run_once(command).result
    }
}

/// Measure `command` once on a default 24x80 terminal
pub fn probe(command: &Command, timeout_seconds: f64) -> ProbeResult {
    Prober::new(ProbeConfig::with_timeout_secs(timeout_seconds)).probe(command)
}
