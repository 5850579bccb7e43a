//! Command execution engine.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{error, info, warn};

use super::command::CommandRequest;
use super::result::CommandResult;
use crate::config::Config;
use crate::error::ShellRunError;
use crate::Result;

/// Maximum characters of command text or output included in a log entry.
const PREVIEW_MAX: usize = 200;

/// Executes shell commands against a fixed, read-only configuration.
///
/// Each call is independent: one subordinate process per request, no
/// shared state between calls beyond the configuration itself.
pub struct Executor {
    config: Config,
}

impl Executor {
    /// Create an executor holding the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this executor was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute a command and wait for it to finish.
    ///
    /// Returns a [`CommandResult`] for any command that ran to
    /// completion, including non-zero exits. Errors are reserved for
    /// launch failures and timeouts.
    pub async fn execute(&self, request: &CommandRequest) -> Result<CommandResult> {
        let start = Instant::now();

        let shell = request
            .shell
            .as_deref()
            .unwrap_or_else(|| self.config.execution.shell_program());
        let timeout = request.timeout.or_else(|| self.config.execution.timeout());
        let working_dir = request
            .working_dir
            .as_deref()
            .or(self.config.execution.working_dir.as_deref());

        info!(
            shell,
            cwd = ?working_dir,
            timeout_secs = timeout.map(|t| t.as_secs()),
            command = %preview(&request.command_line),
            "executing command"
        );

        let mut cmd = Command::new(shell);
        cmd.arg(shell_flag(shell))
            .arg(&request.command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }
        cmd.envs(&request.env);

        let mut child = cmd.spawn().map_err(|e| {
            error!(shell, error = %e, "failed to launch shell");
            ShellRunError::Launch {
                command: request.command_line.clone(),
                source: e,
            }
        })?;

        let stdout_task = spawn_reader(child.stdout.take());
        let stderr_task = spawn_reader(child.stderr.take());

        let status = match timeout {
            Some(limit) => match time::timeout(limit, child.wait()).await {
                Ok(status) => status?,
                Err(_) => {
                    // Kill and reap so no orphan survives the call.
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                    error!(
                        timeout_secs = limit.as_secs(),
                        command = %preview(&request.command_line),
                        "command timed out"
                    );
                    return Err(ShellRunError::Timeout { limit });
                }
            },
            None => child.wait().await?,
        };

        let stdout = collect(stdout_task).await?;
        let stderr = collect(stderr_task).await?;
        let duration = start.elapsed();
        let exit_code = status.code().unwrap_or(-1);

        // POSIX shells report that the command itself could not be
        // launched through exit codes 127 (not found) and 126 (not
        // executable). Surface those as launch failures, not results.
        if exit_code == 127 {
            error!(exit_code, stderr = %preview(&stderr), "command not found");
            return Err(ShellRunError::CommandNotFound {
                command: request.command_line.clone(),
            });
        }
        if exit_code == 126 {
            error!(exit_code, stderr = %preview(&stderr), "command not executable");
            return Err(ShellRunError::PermissionDenied {
                command: request.command_line.clone(),
            });
        }

        let result = CommandResult::new(exit_code, stdout, stderr, duration);
        if result.success() {
            info!(
                exit_code,
                duration_ms = duration.as_millis() as u64,
                stdout = %preview(&result.stdout),
                "command completed"
            );
        } else {
            warn!(
                exit_code,
                duration_ms = duration.as_millis() as u64,
                stdout = %preview(&result.stdout),
                stderr = %preview(&result.stderr),
                "command exited non-zero"
            );
        }

        Ok(result)
    }

    /// Execute a command, blocking the current thread until it finishes.
    ///
    /// Spins up a private current-thread runtime; must not be called
    /// from within an async context.
    pub fn execute_blocking(&self, request: &CommandRequest) -> Result<CommandResult> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.execute(request))
    }
}

/// Simple one-shot command execution with default configuration.
pub fn execute_simple(command_line: &str) -> Result<CommandResult> {
    let executor = Executor::new(Config::default());
    executor.execute_blocking(&CommandRequest::new(command_line))
}

/// One-shot command execution with a timeout.
pub fn execute_with_timeout(command_line: &str, timeout: Duration) -> Result<CommandResult> {
    let executor = Executor::new(Config::default());
    executor.execute_blocking(&CommandRequest::new(command_line).timeout(timeout))
}

/// Flag that makes the given shell run a command string.
fn shell_flag(shell: &str) -> &'static str {
    let name = Path::new(shell)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(shell);
    if name.eq_ignore_ascii_case("cmd") {
        "/C"
    } else {
        "-c"
    }
}

/// Drain one output pipe to completion on a background task.
fn spawn_reader<R>(pipe: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf).await?;
        }
        Ok(buf)
    })
}

async fn collect(task: JoinHandle<std::io::Result<Vec<u8>>>) -> Result<String> {
    let bytes = task
        .await
        .map_err(|e| ShellRunError::Io(std::io::Error::other(e)))??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Single-line, length-limited rendering of text for log entries.
fn preview(text: &str) -> String {
    let escaped = text.replace('\r', "\\r").replace('\n', "\\n");
    if escaped.chars().count() > PREVIEW_MAX {
        let truncated: String = escaped.chars().take(PREVIEW_MAX).collect();
        format!("{}...", truncated)
    } else {
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_escapes_newlines() {
        assert_eq!(preview("echo a\necho b"), "echo a\\necho b");
        assert_eq!(preview("a\r\nb"), "a\\r\\nb");
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(PREVIEW_MAX + 50);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), PREVIEW_MAX + 3);
    }

    #[test]
    fn test_preview_short_unchanged() {
        assert_eq!(preview("echo hi"), "echo hi");
    }

    #[test]
    fn test_shell_flag() {
        assert_eq!(shell_flag("/bin/sh"), "-c");
        assert_eq!(shell_flag("/bin/bash"), "-c");
        assert_eq!(shell_flag("cmd"), "/C");
        assert_eq!(shell_flag("cmd.exe"), "/C");
    }
}
