//! Command request building and representation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// A command to be executed through a shell interpreter.
///
/// The command text may contain embedded newlines; multi-line scripts are
/// handed to the shell verbatim, with no splitting or reinterpretation.
#[derive(Debug, Clone)]
pub struct CommandRequest {
    /// The command line (or multi-line script) to execute.
    pub command_line: String,
    /// Working directory override (if any).
    pub working_dir: Option<PathBuf>,
    /// Environment variables to set.
    pub env: HashMap<String, String>,
    /// Maximum execution time.
    pub timeout: Option<Duration>,
    /// Shell interpreter override (if any).
    pub shell: Option<String>,
}

impl CommandRequest {
    /// Create a new request with the given command line.
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
            working_dir: None,
            env: HashMap::new(),
            timeout: None,
            shell: None,
        }
    }

    /// Create a request from an argument list, joined with single spaces.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line = args
            .into_iter()
            .map(|a| a.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(line)
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Add multiple environment variables.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            self.env.insert(k.into(), v.into());
        }
        self
    }

    /// Set the execution timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the shell interpreter.
    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }
}

impl Default for CommandRequest {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_new() {
        let req = CommandRequest::new("ls -la");
        assert_eq!(req.command_line, "ls -la");
        assert!(req.working_dir.is_none());
        assert!(req.env.is_empty());
        assert!(req.timeout.is_none());
        assert!(req.shell.is_none());
    }

    #[test]
    fn test_request_builder_chain() {
        let req = CommandRequest::new("cargo build")
            .working_dir("/project")
            .env("RUST_LOG", "debug")
            .timeout(Duration::from_secs(60))
            .shell("/bin/bash");

        assert_eq!(req.command_line, "cargo build");
        assert_eq!(req.working_dir, Some(PathBuf::from("/project")));
        assert_eq!(req.env.get("RUST_LOG"), Some(&"debug".to_string()));
        assert_eq!(req.timeout, Some(Duration::from_secs(60)));
        assert_eq!(req.shell.as_deref(), Some("/bin/bash"));
    }

    #[test]
    fn test_request_envs() {
        let vars = [("KEY1", "val1"), ("KEY2", "val2")];
        let req = CommandRequest::new("echo").envs(vars);

        assert_eq!(req.env.len(), 2);
        assert_eq!(req.env.get("KEY1"), Some(&"val1".to_string()));
        assert_eq!(req.env.get("KEY2"), Some(&"val2".to_string()));
    }

    #[test]
    fn test_request_from_args() {
        let req = CommandRequest::from_args(["echo", "Hello,", "World!"]);
        assert_eq!(req.command_line, "echo Hello, World!");
    }

    #[test]
    fn test_request_multiline_preserved() {
        let req = CommandRequest::new("echo a\necho b");
        assert_eq!(req.command_line, "echo a\necho b");
    }
}
