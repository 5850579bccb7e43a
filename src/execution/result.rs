//! Execution result types.

use std::time::Duration;

/// Result of a completed command execution.
///
/// Exists only for commands that actually ran to completion; launch
/// failures and timeouts are surfaced as [`crate::ShellRunError`] instead.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code reported by the subordinate process.
    ///
    /// -1 if the process terminated without an exit code (killed by a
    /// signal on Unix).
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Execution duration.
    pub duration: Duration,
}

impl CommandResult {
    /// Create a new result.
    pub fn new(exit_code: i32, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
        }
    }

    /// Check if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Get stdout as a trimmed string.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// Get stderr as a trimmed string.
    pub fn stderr_trimmed(&self) -> &str {
        self.stderr.trim()
    }

    /// Iterate over stdout lines.
    pub fn stdout_lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines()
    }
}

impl Default for CommandResult {
    fn default() -> Self {
        Self {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
            duration: Duration::ZERO,
        }
    }
}
