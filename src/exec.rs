//! Shell command execution behind the [`Executor`] seam.
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

/// Result of a shell command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Whether the process exited zero.
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// Exit code for reporting; a signal-terminated process reports `-1`.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(-1)
    }
}

impl From<ExitStatus> for ExecResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Runs command lines through the host shell.
///
/// The installer only talks to the OS through this trait, so tests can
/// substitute a mock and never spawn a package manager.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: std::fmt::Debug {
    /// Run `command_line` through the shell and wait for it to exit.
    ///
    /// A non-zero exit is not an error; it is reported in [`ExecResult`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the shell itself cannot be started.
    fn run_shell(&self, command_line: &str) -> Result<ExecResult>;
}

/// [`Executor`] backed by `sh -c` (or `cmd /C` on Windows).
///
/// The child inherits stdin, stdout and stderr so package manager output and
/// `sudo` password prompts reach the user. There is no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl SystemExecutor {
    fn shell_command(command_line: &str) -> Command {
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command_line]);
            cmd
        }
        #[cfg(not(target_os = "windows"))]
        {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command_line]);
            cmd
        }
    }
}

impl Executor for SystemExecutor {
    fn run_shell(&self, command_line: &str) -> Result<ExecResult> {
        let status = Self::shell_command(command_line)
            .status()
            .with_context(|| format!("failed to execute: {command_line}"))?;
        Ok(ExecResult::from(status))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn run_shell_success() {
        let result = SystemExecutor.run_shell("exit 0").unwrap();
        assert!(result.success);
        assert_eq!(result.code, Some(0));
    }

    #[test]
    fn run_shell_reports_exit_code() {
        let result = SystemExecutor.run_shell("exit 3").unwrap();
        assert!(!result.success, "non-zero exit should set success=false");
        assert_eq!(result.exit_code(), 3);
    }

    #[test]
    fn exit_code_for_signal() {
        let result = ExecResult {
            success: false,
            code: None,
        };
        assert_eq!(result.exit_code(), -1);
    }
}
