//! # shellrun
//!
//! Thin shell-command runner with configurable structured logging.
//!
//! This crate wraps subprocess invocation behind one small contract: give
//! the executor a command string (single-line or multi-line), get back a
//! [`CommandResult`] with separate stdout/stderr capture, the exit code,
//! and the elapsed duration. Launch failures and timeouts surface as
//! [`ShellRunError`] instead of a result.
//!
//! ## Features
//!
//! - **Verbatim multi-line scripts**: command text reaches the shell unchanged
//! - **Two logging backends**: compact text or JSON, selected at construction
//! - **Timeout enforcement**: the subordinate process is killed and reaped
//! - **Explicit configuration**: no hidden process-wide mutable state
//!
//! ## Quick Start
//!
//! ```no_run
//! use shellrun::{CommandRequest, Config, Executor};
//!
//! #[tokio::main]
//! async fn main() -> shellrun::Result<()> {
//!     let config = Config::default();
//!     shellrun::logging::try_init(&config.logging).ok();
//!
//!     let executor = Executor::new(config);
//!     let result = executor.execute(&CommandRequest::new("echo hello")).await?;
//!
//!     println!("exit {}: {}", result.exit_code, result.stdout_trimmed());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;

// Re-export commonly used types
pub use config::{Config, ExecutionSection, LoggingSection};
pub use error::{Result, ShellRunError};
pub use execution::{execute_simple, execute_with_timeout, CommandRequest, CommandResult, Executor};
pub use logging::LogBackend;
