//! Error types for shellrun.

use std::time::Duration;

use thiserror::Error;

/// Main error type for shellrun operations.
///
/// A command that launches successfully but exits non-zero is *not* an
/// error; it is reported through [`crate::CommandResult`]. These variants
/// cover the cases where no result exists: the subordinate process could
/// not be created, or it was killed for exceeding its time budget.
#[derive(Error, Debug)]
pub enum ShellRunError {
    /// The shell interpreter itself could not be spawned.
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The shell reported exit code 127: the named executable does not exist.
    #[error("command not found: {command}")]
    CommandNotFound { command: String },

    /// The shell reported exit code 126: the executable exists but cannot run.
    #[error("permission denied: {command}")]
    PermissionDenied { command: String },

    /// The command exceeded its time budget and was terminated.
    #[error("command timed out after {limit:?}")]
    Timeout { limit: Duration },

    /// I/O error while capturing output or waiting on the child.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellRunError {
    /// Whether this error belongs to the launch-failure family:
    /// the requested command never ran at all.
    pub fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            Self::Launch { .. } | Self::CommandNotFound { .. } | Self::PermissionDenied { .. }
        )
    }

    /// Conventional process exit code for this error.
    ///
    /// Follows the shell conventions: 124 for timeouts (as `timeout(1)`
    /// does), 126 for permission problems, 127 for a missing executable.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Timeout { .. } => 124,
            Self::PermissionDenied { .. } => 126,
            Self::CommandNotFound { .. } => 127,
            Self::Launch { .. } | Self::Io(_) => 1,
        }
    }
}

/// Convenience Result type for shellrun operations.
pub type Result<T> = std::result::Result<T, ShellRunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_not_found_display() {
        let err = ShellRunError::CommandNotFound {
            command: "nonexistent_cmd_xyz".into(),
        };
        assert!(err.to_string().contains("nonexistent_cmd_xyz"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_launch_failure_family() {
        let launch = ShellRunError::Launch {
            command: "echo hi".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such shell"),
        };
        let not_found = ShellRunError::CommandNotFound {
            command: "x".into(),
        };
        let denied = ShellRunError::PermissionDenied {
            command: "x".into(),
        };
        let timeout = ShellRunError::Timeout {
            limit: Duration::from_secs(1),
        };

        assert!(launch.is_launch_failure());
        assert!(not_found.is_launch_failure());
        assert!(denied.is_launch_failure());
        assert!(!timeout.is_launch_failure());
    }

    #[test]
    fn test_exit_codes() {
        let timeout = ShellRunError::Timeout {
            limit: Duration::from_secs(1),
        };
        let not_found = ShellRunError::CommandNotFound {
            command: "x".into(),
        };
        let denied = ShellRunError::PermissionDenied {
            command: "x".into(),
        };

        assert_eq!(timeout.exit_code(), 124);
        assert_eq!(denied.exit_code(), 126);
        assert_eq!(not_found.exit_code(), 127);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ShellRunError = io_err.into();
        assert!(matches!(err, ShellRunError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_timeout_display() {
        let err = ShellRunError::Timeout {
            limit: Duration::from_secs(5),
        };
        assert!(err.to_string().contains("timed out"));
    }
}
