//! Logging initialization and backend selection.
//!
//! Two interchangeable backends write structured log lines (timestamp,
//! level, message) to standard error: a compact human-readable format and
//! a JSON format. The backend is chosen once, at subscriber construction,
//! through [`LogBackend`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingSection;

/// Selector for the active logging backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogBackend {
    /// Compact single-line text output.
    #[default]
    Compact,
    /// Newline-delimited JSON output.
    Json,
}

impl fmt::Display for LogBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogBackend {
    type Err = InvalidBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(InvalidBackend(other.to_string())),
        }
    }
}

/// Error for an unrecognized backend name.
#[derive(Debug)]
pub struct InvalidBackend(pub String);

impl fmt::Display for InvalidBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log backend: '{}' (expected 'compact' or 'json')", self.0)
    }
}

impl std::error::Error for InvalidBackend {}

/// Build a subscriber for the given logging configuration without
/// installing it.
///
/// Useful for scoping a backend to a region of code with
/// `tracing::subscriber::with_default`, e.g. in tests.
pub fn subscriber(cfg: &LoggingSection) -> impl tracing::Subscriber + Send + Sync {
    let filter = EnvFilter::try_new(&cfg.level).unwrap_or_else(|_| EnvFilter::new("info"));

    // Both backends are fmt layers boxed behind the Layer trait, so the
    // choice is made exactly once, here.
    let fmt_layer = match cfg.backend {
        LogBackend::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .boxed(),
        LogBackend::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}

/// Initialize the logging system globally.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init(cfg: &LoggingSection) {
    subscriber(cfg).init();
}

/// Try to initialize the logging system globally.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init(cfg: &LoggingSection) -> Result<(), tracing_subscriber::util::TryInitError> {
    subscriber(cfg).try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("compact".parse::<LogBackend>().unwrap(), LogBackend::Compact);
        assert_eq!("text".parse::<LogBackend>().unwrap(), LogBackend::Compact);
        assert_eq!("json".parse::<LogBackend>().unwrap(), LogBackend::Json);
        assert_eq!("JSON".parse::<LogBackend>().unwrap(), LogBackend::Json);
        assert!("syslog".parse::<LogBackend>().is_err());
    }

    #[test]
    fn test_backend_display_roundtrip() {
        for backend in [LogBackend::Compact, LogBackend::Json] {
            let parsed: LogBackend = backend.to_string().parse().unwrap();
            assert_eq!(parsed, backend);
        }
    }

    #[test]
    fn test_backend_serde() {
        let json: LogBackend = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(json, LogBackend::Json);
        assert_eq!(serde_json::to_string(&LogBackend::Compact).unwrap(), "\"compact\"");
    }

    #[test]
    fn test_try_init_idempotent() {
        let cfg = LoggingSection::default();
        // First call may or may not succeed depending on test order;
        // the second must not panic either way.
        let _ = try_init(&cfg);
        let _ = try_init(&cfg);
    }

    #[test]
    fn test_scoped_backends_emit() {
        for backend in [LogBackend::Compact, LogBackend::Json] {
            let cfg = LoggingSection {
                backend,
                ..LoggingSection::default()
            };
            tracing::subscriber::with_default(subscriber(&cfg), || {
                tracing::info!("test message");
                tracing::warn!("test warning");
            });
        }
    }
}
