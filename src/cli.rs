//! Command-line interface for shellrun.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Command to execute (positional arguments, joined with spaces).
    pub command: Option<String>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Logging backend (compact, json).
    pub backend: Option<String>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Execution timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Working directory for the command.
    pub workdir: Option<PathBuf>,
    /// Shell interpreter to run the command through.
    pub shell: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut positionals: Vec<String> = Vec::new();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('b') | Long("backend") => {
                result.backend = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Short('t') | Long("timeout") => {
                let value: String = parser.value()?.parse()?;
                result.timeout_secs = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("timeout", value))?,
                );
            }
            Short('w') | Long("workdir") => {
                result.workdir = Some(parser.value()?.parse()?);
            }
            Short('s') | Long("shell") => {
                result.shell = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                positionals.push(val.to_string_lossy().into_owned());
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    if !positionals.is_empty() {
        result.command = Some(positionals.join(" "));
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"shellrun {version}
Thin shell-command runner with configurable structured logging

USAGE:
    shellrun [OPTIONS] [COMMAND]...

    COMMAND may be a single word, a quoted line, or a quoted multi-line
    script. Multiple positional arguments are joined with spaces. With no
    command, a built-in demo script is run.

OPTIONS:
    -c, --config <FILE>     Path to configuration file (JSON)
    -b, --backend <NAME>    Logging backend (compact, json)
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -t, --timeout <SECS>    Kill the command after SECS seconds
    -w, --workdir <DIR>     Working directory for the command
    -s, --shell <PROG>      Shell interpreter [default: /bin/sh]
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    SHELLRUN_LOG_BACKEND    Logging backend (overrides config)
    SHELLRUN_LOG_LEVEL      Log level (overrides config)
    SHELLRUN_SHELL          Shell interpreter (overrides config)
    SHELLRUN_WORKDIR        Working directory (overrides config)
    SHELLRUN_TIMEOUT_SECS   Timeout in seconds (overrides config)
    RUST_LOG                Alternative log level setting

EXIT STATUS:
    Mirrors the executed command's exit code. 124 on timeout, 126 when
    the command is not executable, 127 when it is not found.

EXAMPLES:
    # Run the built-in demo
    shellrun

    # Run a command with JSON logs
    shellrun -b json 'echo hello'

    # Multi-line script with a timeout
    shellrun -t 30 'echo a
    echo b'
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("shellrun {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
