//! NUnit console runner invocation
//!
//! Turns assembled run parameters into a deterministic argv and launches
//! the runner through the process invoker, relaying every streamed output
//! line to the log. The exit code comes back verbatim: failing tests are
//! the runner's verdict to make, and output content is never inspected.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::common::config::Config;
use crate::common::Result;
use crate::params::RunParameters;
use crate::process::{self, InvokeOptions};

/// A fully built runner invocation: program plus argv. No shell is
/// involved, so no quoting happens anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Build the runner command line for the given parameters.
///
/// With an interpreter, the console-runner path becomes the interpreter's
/// first argument; otherwise the runner binary is the program itself.
/// Everything after that is derived from the parameters in a fixed order,
/// ending with the test assembly as the positional argument.
pub fn build_command_line(
    params: &RunParameters,
    console_path: &Path,
    interpreter: Option<&Path>,
) -> RunnerCommand {
    let mut args = Vec::new();

    let program = match interpreter {
        Some(interpreter) => {
            args.push(console_path.display().to_string());
            interpreter.to_path_buf()
        }
        None => console_path.to_path_buf(),
    };

    args.push("--work".to_string());
    args.push(params.result_directory.display().to_string());

    if let Some(filter) = params.filter.as_deref().filter(|f| !f.trim().is_empty()) {
        args.push("--where".to_string());
        args.push(filter.to_string());
    }

    push_testparam_if_present(&mut args, "deviceId", &params.device_id);
    push_testparam_if_present(&mut args, "deviceName", &params.device_name);
    push_testparam_if_present(&mut args, "deviceIp", &params.device_address);

    push_testparam(&mut args, "deviceIndex", &params.device_index.to_string());
    push_testparam(
        &mut args,
        "appFilePath",
        &params.drop_directory.join(&params.app_package_name).display().to_string(),
    );
    push_testparam(&mut args, "dropDir", &params.drop_directory.display().to_string());
    push_testparam(
        &mut args,
        "testResultDirectory",
        &params.result_directory.display().to_string(),
    );

    args.push(
        params
            .drop_directory
            .join(&params.ui_test_assembly_name)
            .display()
            .to_string(),
    );

    RunnerCommand { program, args }
}

fn push_testparam(args: &mut Vec<String>, key: &str, value: &str) {
    args.push("--testparam".to_string());
    args.push(format!("{key}={value}"));
}

/// One `--testparam key=value` pair, emitted only for non-empty values.
fn push_testparam_if_present(args: &mut Vec<String>, key: &str, value: &str) {
    if !value.is_empty() {
        push_testparam(args, key, value);
    }
}

/// Launch the runner and relay its exit code.
pub async fn run_ui_tests(params: &RunParameters, config: &Config) -> Result<i32> {
    let console_path = config.runner.resolve_console_path()?;
    let command = build_command_line(params, &console_path, config.runner.interpreter());

    debug!(program = %command.program.display(), args = ?command.args, "starting runner process");

    let options = match config.timeouts.runner_secs {
        Some(secs) => InvokeOptions::with_deadline(secs),
        None => InvokeOptions::default(),
    };

    let result = process::invoke(&command.program, &command.args, options, |line| info!("{line}")).await?;

    info!(exit_code = result.exit_code, "runner process exited");
    Ok(result.exit_code)
}
