//! Single invocation of the external copy tool

use super::exit_code::RunOutcome;
use crate::args::ArgumentList;
use crate::types::RoboError;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Program name used when none is configured.
pub const DEFAULT_PROGRAM: &str = "robocopy";

/// Spawn `program` with `args` and stream its output into `lines`.
///
/// Arguments are passed as a vector; no shell is involved. Stdout and
/// stderr are forwarded as they arrive, split on `\n` and `\r` (robocopy
/// rewrites its progress percentage with carriage returns and only ends the
/// line when the file is done). The call
/// returns once the process has exited and both streams are drained.
pub async fn run_process(
    program: &str,
    args: &ArgumentList,
    lines: mpsc::Sender<String>,
) -> Result<RunOutcome, RoboError> {
    let mut command = Command::new(program);
    command
        .args(args.iter())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(windows)]
    {
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        command.creation_flags(CREATE_NO_WINDOW);
    }

    let spawn_error = |reason: String| RoboError::Spawn {
        program: program.to_string(),
        reason,
    };

    let mut child = command.spawn().map_err(|e| spawn_error(e.to_string()))?;
    info!(program, args = %args, "copy tool started");

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| spawn_error("stdout was not captured".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| spawn_error("stderr was not captured".to_string()))?;

    let stdout_task = tokio::spawn(forward_lines(stdout, lines.clone()));
    let stderr_task = tokio::spawn(forward_lines(stderr, lines));

    let status = child.wait().await?;

    for (stream, task) in [("stdout", stdout_task), ("stderr", stderr_task)] {
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(stream, error = %e, "output stream read failed"),
            Err(e) => warn!(stream, error = %e, "output forwarder failed"),
        }
    }

    let outcome = RunOutcome::from_code(status.code());
    info!(code = ?outcome.code, success = outcome.success, "copy tool exited");
    Ok(outcome)
}

/// Forward `reader` line by line. Stops quietly if the receiver is gone.
///
/// A fragment is sent as soon as its `\r` or `\n` terminator arrives, so
/// progress rewrites go out while the line is still open. An unterminated
/// tail is held back until more bytes arrive or the stream ends.
pub async fn forward_lines<R>(reader: R, lines: mpsc::Sender<String>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut pending: Vec<u8> = Vec::new();

    loop {
        let chunk = reader.fill_buf().await?;
        if chunk.is_empty() {
            break;
        }
        let len = chunk.len();
        pending.extend_from_slice(chunk);
        reader.consume(len);

        let Some(last) = pending.iter().rposition(|&b| matches!(b, b'\r' | b'\n')) else {
            continue;
        };
        // Terminators are ASCII, so this never splits a UTF-8 sequence.
        let complete: Vec<u8> = pending.drain(..=last).collect();
        if !send_fragments(&complete, &lines).await {
            return Ok(());
        }
    }

    if !pending.is_empty() {
        send_fragments(&pending, &lines).await;
    }
    Ok(())
}

/// Returns `false` once the receiver has been dropped.
async fn send_fragments(bytes: &[u8], lines: &mpsc::Sender<String>) -> bool {
    let text = String::from_utf8_lossy(bytes);
    for line in split_output(&text) {
        if lines.send(line.to_string()).await.is_err() {
            return false;
        }
    }
    true
}

/// Split a chunk on carriage returns, dropping empty fragments.
pub fn split_output(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n']).filter(|line| !line.is_empty())
}
