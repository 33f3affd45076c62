//! UI test runner CLI - entry point
//!
//! Parses flags, resolves the run configuration (device id and address
//! where the platform requires it), launches the NUnit console runner and
//! maps its exit code to ours.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::{error, info};

use uirunner::cli::Args;
use uirunner::common::{config::Config, logging, paths};
use uirunner::{params, runner};

/// Exit codes surfaced to callers.
#[derive(Clone, Copy)]
enum ExitCodes {
    Success = 0,
    UnknownError = 1,
    InvalidArguments = 2,
}

#[tokio::main]
async fn main() {
    std::process::exit(run().await as i32);
}

async fn run() -> ExitCodes {
    let args = Args::parse();

    match std::env::current_dir() {
        Ok(dir) => println!("Executing in: {}", dir.display()),
        Err(_) => println!("Executing in: <unknown>"),
    }

    if let Err(e) = args.validate() {
        display_error(&e.to_string());
        return ExitCodes::InvalidArguments;
    }

    let result_directory = match resolve_result_dir(&args) {
        Ok(dir) => dir,
        Err(message) => {
            display_error(&message);
            return ExitCodes::UnknownError;
        }
    };

    // Held for the whole run; flushes runner.log in the results directory.
    let _log_guard = logging::init(&result_directory);
    info!(result_directory = %result_directory.display(), "runner starting");

    let outcome = execute(&args, result_directory.clone()).await;

    // This should be the last thing printed - calling tooling scrapes it.
    println!("Results: {}", result_directory.display());

    match outcome {
        Ok(0) => ExitCodes::Success,
        Ok(exit_code) => {
            info!(exit_code, "runner reported a failing test run");
            ExitCodes::UnknownError
        }
        Err(e) => {
            error!("{e}");
            eprintln!("{}", format!("Error: {e}").red());
            ExitCodes::UnknownError
        }
    }
}

/// Explicit flag, or a fresh timestamped directory under the current one;
/// either way the directory exists when this returns.
fn resolve_result_dir(args: &Args) -> Result<PathBuf, String> {
    let dir = match args.result_dir_path.clone() {
        Some(dir) => dir,
        None => paths::default_result_dir()
            .map_err(|e| format!("Could not determine a results directory: {e}"))?,
    };

    paths::ensure_result_dir(&dir)
        .map_err(|e| format!("Could not prepare result directory '{}': {e}", dir.display()))?;

    Ok(dir)
}

async fn execute(args: &Args, result_directory: PathBuf) -> uirunner::Result<i32> {
    let mut config = Config::load()?;
    if let Some(secs) = args.timeout_secs {
        config.timeouts.runner_secs = Some(secs);
    }

    let parameters = params::assemble(args, &config, result_directory).await?;
    runner::run_ui_tests(&parameters, &config).await
}

/// Show the error to the user on the terminal (red) and in the log.
fn display_error(message: &str) {
    eprintln!("{}", message.red());
    error!("{message}");
}
