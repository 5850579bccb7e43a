//! Shellrun binary entry point.

use std::io::Write;

use shellrun::{cli, logging, CommandRequest, Config, Executor};

/// Script run when no command is given on the command line.
const DEMO_SCRIPT: &str = "echo 123\necho 456";

#[tokio::main]
async fn main() {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("shellrun: {}", e);
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return;
    }
    if args.version {
        cli::print_version();
        return;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("shellrun: {}", e);
            std::process::exit(2);
        }
    };

    logging::init(&config.logging);

    let command_line = args.command.unwrap_or_else(|| DEMO_SCRIPT.to_string());
    let executor = Executor::new(config);
    let request = CommandRequest::new(command_line);

    match executor.execute(&request).await {
        Ok(result) => {
            print!("{}", result.stdout);
            eprint!("{}", result.stderr);
            let _ = std::io::stdout().flush();
            let _ = std::io::stderr().flush();

            // Mirror the command's exit code; a signal death has none.
            let code = if result.exit_code >= 0 {
                result.exit_code
            } else {
                1
            };
            std::process::exit(code);
        }
        Err(e) => {
            eprintln!("shellrun: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
