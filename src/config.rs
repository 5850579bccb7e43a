//! Configuration management for shellrun.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values
//!
//! The loaded [`Config`] is read-only at runtime: the executor holds it
//! for the lifetime of the process and never mutates it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::logging::LogBackend;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration.
    pub logging: LoggingSection,
    /// Command execution configuration.
    pub execution: ExecutionSection,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Active logging backend.
    pub backend: LogBackend,
    /// Log level filter (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            backend: LogBackend::default(),
            level: "info".to_string(),
        }
    }
}

/// Command execution configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSection {
    /// Shell interpreter to run commands through.
    pub shell: Option<String>,
    /// Working directory for spawned commands.
    pub working_dir: Option<PathBuf>,
    /// Maximum command runtime in seconds. Absent means no limit.
    pub timeout_secs: Option<u64>,
}

impl ExecutionSection {
    /// Effective shell interpreter, falling back to the platform default.
    pub fn shell_program(&self) -> &str {
        self.shell.as_deref().unwrap_or(default_shell())
    }

    /// Effective timeout as a [`Duration`].
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Platform default shell interpreter.
pub fn default_shell() -> &'static str {
    if cfg!(windows) {
        "cmd"
    } else {
        "/bin/sh"
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(backend) = std::env::var("SHELLRUN_LOG_BACKEND") {
            if let Ok(backend) = backend.parse() {
                self.logging.backend = backend;
            }
        }

        if let Ok(level) = std::env::var("SHELLRUN_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }

        if let Ok(shell) = std::env::var("SHELLRUN_SHELL") {
            if !shell.is_empty() {
                self.execution.shell = Some(shell);
            }
        }

        if let Ok(dir) = std::env::var("SHELLRUN_WORKDIR") {
            if !dir.is_empty() {
                self.execution.working_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(secs) = std::env::var("SHELLRUN_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.execution.timeout_secs = Some(secs);
            }
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) -> Result<(), ConfigError> {
        if let Some(ref backend) = args.backend {
            self.logging.backend = backend
                .parse()
                .map_err(|_| ConfigError::InvalidBackend(backend.clone()))?;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }

        if let Some(ref shell) = args.shell {
            self.execution.shell = Some(shell.clone());
        }

        if let Some(ref dir) = args.workdir {
            self.execution.working_dir = Some(dir.clone());
        }

        if let Some(secs) = args.timeout_secs {
            self.execution.timeout_secs = Some(secs);
        }

        Ok(())
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Config::default();

        // Load from config file if specified
        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        // Apply environment variable overrides
        config.apply_env();

        // Apply CLI argument overrides (highest priority)
        config.apply_args(args)?;

        Ok(config)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Unrecognized logging backend name.
    InvalidBackend(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidBackend(name) => write!(f, "unknown log backend: '{}'", name),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.backend, LogBackend::Compact);
        assert_eq!(config.logging.level, "info");
        assert!(config.execution.shell.is_none());
        assert!(config.execution.working_dir.is_none());
        assert!(config.execution.timeout().is_none());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "logging": {
                "backend": "json",
                "level": "debug"
            },
            "execution": {
                "shell": "/bin/bash",
                "working_dir": "/tmp",
                "timeout_secs": 30
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.backend, LogBackend::Json);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.execution.shell_program(), "/bin/bash");
        assert_eq!(config.execution.working_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(config.execution.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{
            "logging": {
                "level": "trace"
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.backend, LogBackend::Compact); // Default
        assert_eq!(config.logging.level, "trace");
        assert!(config.execution.timeout_secs.is_none());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let args = Args {
            backend: Some("json".to_string()),
            log_level: Some("debug".to_string()),
            timeout_secs: Some(5),
            workdir: Some(PathBuf::from("/var/tmp")),
            shell: Some("/bin/bash".to_string()),
            ..Args::default()
        };

        config.apply_args(&args).unwrap();

        assert_eq!(config.logging.backend, LogBackend::Json);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.execution.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.execution.working_dir, Some(PathBuf::from("/var/tmp")));
        assert_eq!(config.execution.shell_program(), "/bin/bash");
    }

    #[test]
    fn test_apply_args_invalid_backend() {
        let mut config = Config::default();
        let args = Args {
            backend: Some("syslog".to_string()),
            ..Args::default()
        };

        let result = config.apply_args(&args);
        assert!(matches!(result, Err(ConfigError::InvalidBackend(_))));
    }

    #[test]
    fn test_default_shell_platform() {
        let shell = default_shell();
        if cfg!(windows) {
            assert_eq!(shell, "cmd");
        } else {
            assert_eq!(shell, "/bin/sh");
        }
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"backend\""));
        assert!(json.contains("\"level\""));
    }
}
