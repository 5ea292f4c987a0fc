//! Report retrieval from the DHCP server.
//!
//! [`NetshCommand`] runs
//! `netsh dhcp server \\<server> scope <scope> show clients 1` once and
//! returns its standard output. There is no retry. By default there is also
//! no timeout: a hung `netsh` hangs the caller. Set
//! [`NetshCommand::with_timeout`] to bound the wait.
//!
//! [`StaticReport`] replays captured output for offline parsing and tests.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use dhcp_lease_parser::netsh::{LeaseSource, NetshCommand};
//!
//! let netsh = NetshCommand::new().with_timeout(Duration::from_secs(30));
//! let report = netsh.fetch_report("dhcp01", "10.19.10.0").unwrap();
//! println!("{report}");
//! ```

use std::io::{ErrorKind, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;
use wait_timeout::ChildExt;

use crate::error::{LeaseError, Result};

/// Default program name of the network shell.
pub const DEFAULT_NETSH: &str = "netsh";

/// Longest slice of command output kept in error messages.
const DETAIL_PREVIEW_CHARS: usize = 240;

/// Anything that can produce the raw `show clients` report for a scope.
pub trait LeaseSource {
    /// Returns the complete report text for `scope` on `server`.
    fn fetch_report(&self, server: &str, scope: &str) -> Result<String>;
}

/// Runs the Windows network shell to list a scope's clients.
#[derive(Debug, Clone)]
pub struct NetshCommand {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for NetshCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl NetshCommand {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_NETSH),
            timeout: None,
        }
    }

    /// Uses a different executable (full path or a wrapper script).
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Kills the command if it has not exited within `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Arguments passed to the program for one scope.
    ///
    /// ```
    /// use dhcp_lease_parser::netsh::NetshCommand;
    ///
    /// assert_eq!(
    ///     NetshCommand::args("dhcp01", "10.19.10.0"),
    ///     vec!["dhcp", "server", r"\\dhcp01", "scope", "10.19.10.0", "show", "clients", "1"],
    /// );
    /// ```
    pub fn args(server: &str, scope: &str) -> Vec<String> {
        let server = if server.starts_with(r"\\") {
            server.to_string()
        } else {
            format!(r"\\{server}")
        };
        ["dhcp", "server", &server, "scope", scope, "show", "clients", "1"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn spawn(&self, args: &[String]) -> Result<Child> {
        Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    LeaseError::CommandNotFound(self.program.display().to_string())
                } else {
                    LeaseError::CommandSpawn(e)
                }
            })
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait()?);
        };
        match child.wait_timeout(timeout)? {
            Some(status) => Ok(status),
            None => {
                debug!(?timeout, "Report command timed out, killing process");
                let _ = child.kill();
                let _ = child.wait();
                Err(LeaseError::Timeout { timeout })
            }
        }
    }
}

impl LeaseSource for NetshCommand {
    fn fetch_report(&self, server: &str, scope: &str) -> Result<String> {
        let args = Self::args(server, scope);
        debug!(program = %self.program.display(), args = ?args, "Running report command");

        let mut child = self.spawn(&args)?;
        // Drain both pipes in the background so a full pipe buffer cannot
        // stall the child before it exits.
        let stdout_thread = child.stdout.take().map(drain);
        let stderr_thread = child.stderr.take().map(drain);

        // The readers are joined even when the wait failed, so a killed child
        // never leaves them detached.
        let status = self.wait(&mut child);
        let stdout = join_output(stdout_thread);
        let stderr = join_output(stderr_thread);
        let (status, stdout, stderr) = (status?, stdout?, stderr?);

        if !status.success() {
            let detail = if stderr.trim().is_empty() { &stdout } else { &stderr };
            return Err(LeaseError::CommandFailed {
                code: status.code(),
                detail: preview(detail),
            });
        }

        debug!(bytes = stdout.len(), "Report command completed");
        Ok(stdout)
    }
}

/// Replays previously captured report text.
#[derive(Debug, Clone)]
pub struct StaticReport {
    text: String,
}

impl StaticReport {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl LeaseSource for StaticReport {
    fn fetch_report(&self, _server: &str, _scope: &str) -> Result<String> {
        Ok(self.text.clone())
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<std::io::Result<Vec<u8>>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_output(handle: Option<JoinHandle<std::io::Result<Vec<u8>>>>) -> Result<String> {
    let bytes = match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| std::io::Error::other("output reader thread panicked"))??,
        None => Vec::new(),
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn preview(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(DETAIL_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
