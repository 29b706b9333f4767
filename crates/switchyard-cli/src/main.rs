//! Switchyard - Entry point

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use switchyard_cli::{execute, load_config, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging settings come from the config, so load errors go straight to stderr.
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = switchyard_telemetry::init_logging(&config.logging.to_log_config()) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    debug!(
        version = switchyard_cli::VERSION,
        config = %cli.config.display(),
        "configuration loaded"
    );

    let stdout = io::stdout();
    match execute(&cli.command, &config, &mut stdout.lock()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
