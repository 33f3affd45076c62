//! Generic subprocess invocation with streamed output capture
//!
//! Spawns an external process with both output streams piped, delivers
//! every line - stdout and stderr interleaved, in arrival order - to a
//! caller-supplied callback while collecting the full transcript, and
//! waits for the process to exit. The exit code is returned as data;
//! deciding what counts as success is the caller's job.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::common::{Error, Result};

/// Outcome of a finished subprocess: the exact observed exit code plus the
/// transcript of stdout/stderr lines in arrival order. Created once at
/// process exit and immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub exit_code: i32,
    pub output: Vec<String>,
}

/// Invocation settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokeOptions {
    /// Kill the child and fail with `InvokeTimeout` once this much time
    /// has passed. `None` waits for the child indefinitely.
    pub deadline: Option<Duration>,
}

impl InvokeOptions {
    pub fn with_deadline(secs: u64) -> Self {
        Self {
            deadline: Some(Duration::from_secs(secs)),
        }
    }
}

/// Spawn `program` with `args` and wait for it to exit.
///
/// Every line from either output stream is handed to `on_line` in arrival
/// order and appended to the returned transcript. Failing to spawn at all
/// is `Error::Launch`; a non-zero exit code is not an error.
pub async fn invoke(
    program: &Path,
    args: &[String],
    options: InvokeOptions,
    mut on_line: impl FnMut(&str),
) -> Result<ProcessResult> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::launch(program, e))?;

    let (tx, mut rx) = mpsc::channel::<String>(64);
    spawn_line_reader(child.stdout.take(), tx.clone());
    spawn_line_reader(child.stderr.take(), tx);

    let mut output = Vec::new();
    let drain_and_wait = async {
        // The channel closes once both reader tasks hit EOF, which happens
        // when the child exits and the pipes drain. This loop is the only
        // writer to the transcript, so delivery is strictly sequential.
        while let Some(line) = rx.recv().await {
            on_line(&line);
            output.push(line);
        }
        child.wait().await
    };

    let status = match options.deadline {
        Some(deadline) => match tokio::time::timeout(deadline, drain_and_wait).await {
            Ok(status) => status,
            Err(_) => {
                child.kill().await.ok();
                return Err(Error::InvokeTimeout {
                    program: program.to_path_buf(),
                    secs: deadline.as_secs(),
                });
            }
        },
        None => drain_and_wait.await,
    }?;

    Ok(ProcessResult {
        // Unix reports no code when the child dies to a signal.
        exit_code: status.code().unwrap_or(-1),
        output,
    })
}

fn spawn_line_reader(
    stream: Option<impl AsyncRead + Unpin + Send + 'static>,
    tx: mpsc::Sender<String>,
) {
    let Some(stream) = stream else { return };

    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });
}
