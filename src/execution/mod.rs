//! Command execution engine.
//!
//! This module provides the command execution wrapper:
//! - Single-line and multi-line command text, run verbatim through a shell
//! - Separate stdout/stderr capture
//! - Timeout handling with guaranteed child termination
//!
//! # Example
//!
//! ```no_run
//! use shellrun::execution::{CommandRequest, execute_simple};
//!
//! // Simple one-shot execution
//! let result = execute_simple("echo hello").unwrap();
//! println!("Output: {}", result.stdout);
//!
//! // Request with options
//! use std::time::Duration;
//! let req = CommandRequest::new("cargo build")
//!     .timeout(Duration::from_secs(60))
//!     .working_dir("/project");
//! ```

mod command;
mod executor;
mod result;

pub use command::CommandRequest;
pub use executor::{execute_simple, execute_with_timeout, Executor};
pub use result::CommandResult;
