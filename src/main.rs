//! Beatstore: service clients for the studio storefront
//!
//! Entry point for the beatstore command-line tool.

use beatstore_clients::config::{Cli, Command, Layered, ProcessEnv, TomlConfig, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Command::Init { output } = &cli.command {
        return handle_init(output);
    }

    // Load the optional config file beneath the process environment
    let file = match &cli.config {
        Some(path) => match TomlConfig::load(path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                print_config_hint(&e);
                return exit_code::CONFIG_ERROR;
            }
        },
        None => TomlConfig::default(),
    };
    let env = Layered::new(ProcessEnv, file);

    setup_tracing(cli.verbose);
    if !cli.live {
        tracing::debug!("Email and checkout requests go to the offline stub (use --live to send)");
    }

    run_application(&cli, &env)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs the selected command and prints its JSON result.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(cli: &Cli, env: &Layered<ProcessEnv, TomlConfig>) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(cli, env)) {
        Ok(output) => {
            println!("{output}");
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(config_error) = e.config_error() {
                print_config_hint(config_error);
                return exit_code::CONFIG_ERROR;
            }
            exit_code::runtime_error()
        }
    }
}
