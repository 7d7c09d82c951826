//! A child process attached to a fresh pseudo-terminal
//!
//! `PtySession` owns the master descriptor and the child pid. Dropping it
//! closes the master, kills the child and reaps it, on every exit path.

use super::ProbeConfig;
use crate::error::{AppError, ErrorContext, Result};
use crate::logging::ProbeLogger;
use crate::models::Command;
use nix::errno::Errno;
use nix::fcntl::{fcntl, FcntlArg, FdFlag};
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::pty::{openpty, OpenptyResult, Winsize};
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::waitpid;
use nix::unistd::Pid;
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{AsFd, BorrowedFd};
use std::os::unix::process::CommandExt;
use std::process::Stdio;
use std::time::{Duration, Instant};

/// What the master side saw while waiting for the first byte
#[derive(Debug)]
pub enum FirstByte {
    /// One byte read; elapsed time since the probe started
    Received(Duration),
    /// Every slave holder went away without writing
    Hangup,
    /// The deadline passed with nothing to read
    Expired,
    /// poll or read failed unexpectedly
    Failed(io::Error),
}

/// Child process bound to the slave side of a pty pair
pub struct PtySession {
    master: Option<File>,
    child: Option<Pid>,
    logger: ProbeLogger,
}

impl PtySession {
    /// Allocate a pty pair and launch `command` with the slave as its controlling terminal
    pub fn spawn(command: &Command, config: &ProbeConfig, logger: ProbeLogger) -> Result<Self> {
        let winsize = Winsize {
            ws_row: config.rows,
            ws_col: config.cols,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        let OpenptyResult { master, slave } =
            openpty(Some(&winsize), None).context("Failed to allocate pseudo-terminal")?;
        set_cloexec(master.as_fd()).context("Failed to mark pty master close-on-exec")?;
        set_cloexec(slave.as_fd()).context("Failed to mark pty slave close-on-exec")?;

        let pid = {
            let mut child = std::process::Command::new(command.program());
            child
                .args(command.args())
                .stdin(Stdio::from(slave.try_clone()?))
                .stdout(Stdio::from(slave.try_clone()?))
                .stderr(Stdio::from(slave));

            if std::env::var_os("TERM").is_none() {
                child.env("TERM", &config.term);
            }

            // SAFETY: only async-signal-safe calls run between fork and exec.
            unsafe {
                child.pre_exec(attach_controlling_terminal);
            }

            let handle = child.spawn().map_err(|e| {
                AppError::spawn(format!("Failed to launch '{}': {}", command.program(), e))
            })?;
            Pid::from_raw(handle.id() as i32)
            // The builder drops here, closing the parent's copies of the slave
        };

        Ok(Self {
            master: Some(File::from(master)),
            child: Some(pid),
            logger,
        })
    }

    /// Pid of the child
    pub fn pid(&self) -> Option<Pid> {
        self.child
    }

    /// Block until the master is readable or `timeout` has passed since `start`, then read one byte
    pub fn wait_first_byte(&mut self, start: Instant, timeout: Duration) -> FirstByte {
        let Some(master) = self.master.as_mut() else {
            return FirstByte::Hangup;
        };
        let deadline = start + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return FirstByte::Expired;
            }

            let mut fds = [PollFd::new(master.as_fd(), PollFlags::POLLIN)];
            match poll(&mut fds, poll_slice(remaining)) {
                Ok(0) => continue,
                Ok(_) => break,
                Err(Errno::EINTR) => continue,
                Err(errno) => return FirstByte::Failed(io::Error::from(errno)),
            }
        }

        let mut buf = [0u8; 1];
        loop {
            match master.read(&mut buf) {
                Ok(1) => return FirstByte::Received(start.elapsed()),
                Ok(_) => return FirstByte::Hangup,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                // Linux reports a closed slave side as EIO
                Err(e) if e.raw_os_error() == Some(libc::EIO) => return FirstByte::Hangup,
                Err(e) => return FirstByte::Failed(e),
            }
        }
    }
}

impl Drop for PtySession {
    fn drop(&mut self) {
        // Master closes before the child is signalled
        self.master.take();

        let Some(pid) = self.child.take() else {
            return;
        };

        match kill(pid, Signal::SIGKILL) {
            Ok(()) | Err(Errno::ESRCH) => {}
            Err(errno) => self.logger.log_teardown_anomaly(pid, "kill", errno),
        }

        loop {
            match waitpid(pid, None) {
                Ok(_) => break,
                Err(Errno::EINTR) => continue,
                Err(Errno::ECHILD) => break,
                Err(errno) => {
                    self.logger.log_teardown_anomaly(pid, "waitpid", errno);
                    break;
                }
            }
        }
    }
}

/// Runs in the forked child: new session, slave (already on fd 0) becomes the controlling terminal
fn attach_controlling_terminal() -> io::Result<()> {
    // SAFETY: setsid and ioctl are async-signal-safe.
    unsafe {
        if libc::setsid() == -1 {
            return Err(io::Error::last_os_error());
        }
        if libc::ioctl(libc::STDIN_FILENO, libc::TIOCSCTTY as _, 0) == -1 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

fn set_cloexec(fd: BorrowedFd<'_>) -> io::Result<()> {
    let flags = FdFlag::from_bits_truncate(fcntl(fd, FcntlArg::F_GETFD)?);
    fcntl(fd, FcntlArg::F_SETFD(flags | FdFlag::FD_CLOEXEC))?;
    Ok(())
}

/// One poll slice: the remaining time rounded up to whole milliseconds, clamped to u16::MAX
fn poll_slice(remaining: Duration) -> PollTimeout {
    let ms = remaining.as_micros().div_ceil(1000).min(u16::MAX as u128) as u16;
    PollTimeout::from(ms)
}
