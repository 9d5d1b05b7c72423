// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Subprocess execution
//!
//! Runs one assembled invocation per call with a wall-clock timeout and a
//! ceiling on captured output. Content is never interpreted here; a non-zero
//! exit code is an outcome, not an error. No retries: build tools are not
//! safe to blindly re-run, a partial failure must surface as-is.

use crate::error::{Result, XcserveError};
use crate::xcode::command::Invocation;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Raw result of one subprocess run. Transport-level only.
#[derive(Debug)]
pub struct ExecutionOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Execute an invocation, capturing stdout and stderr line by line.
///
/// Fails with `ToolNotFound` when the binary is absent, `Timeout` when the
/// wall-clock budget elapses, and `OutputLimitExceeded` when combined output
/// crosses `output_limit` bytes. The child is killed on every early exit.
pub async fn execute(
    invocation: &Invocation,
    timeout: Duration,
    output_limit: usize,
) -> Result<ExecutionOutcome> {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    tracing::info!("running: {}", invocation.display());

    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            XcserveError::ToolNotFound {
                tool: invocation.program.clone(),
                detail: e.to_string(),
            }
        } else {
            XcserveError::CommandFailed(format!(
                "failed to spawn {}: {}",
                invocation.program, e
            ))
        }
    })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| XcserveError::Internal("child stdout was not piped".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| XcserveError::Internal("child stderr was not piped".to_string()))?;

    let limit_mb = (output_limit / (1024 * 1024)).max(1) as u64;

    let capture = async move {
        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let mut stdout_buf = String::new();
        let mut stderr_buf = String::new();
        let mut stdout_done = false;
        let mut stderr_done = false;

        while !stdout_done || !stderr_done {
            tokio::select! {
                line = stdout_reader.next_line(), if !stdout_done => {
                    match line {
                        Ok(Some(line)) => {
                            stdout_buf.push_str(&line);
                            stdout_buf.push('\n');
                        }
                        Ok(None) => stdout_done = true,
                        Err(e) => {
                            tracing::warn!("error reading stdout: {}", e);
                            stdout_done = true;
                        }
                    }
                }
                line = stderr_reader.next_line(), if !stderr_done => {
                    match line {
                        Ok(Some(line)) => {
                            stderr_buf.push_str(&line);
                            stderr_buf.push('\n');
                        }
                        Ok(None) => stderr_done = true,
                        Err(e) => {
                            tracing::warn!("error reading stderr: {}", e);
                            stderr_done = true;
                        }
                    }
                }
            }

            if stdout_buf.len() + stderr_buf.len() > output_limit {
                return Err(XcserveError::OutputLimitExceeded { limit_mb });
            }
        }

        let status = child.wait().await.map_err(|e| {
            XcserveError::CommandFailed(format!("failed to wait for child: {}", e))
        })?;

        Ok(ExecutionOutcome {
            exit_code: status.code().unwrap_or(-1),
            stdout: stdout_buf,
            stderr: stderr_buf,
        })
    };

    match tokio::time::timeout(timeout, capture).await {
        Ok(outcome) => outcome,
        // Dropping the capture future drops the child; kill_on_drop reaps it.
        Err(_) => Err(XcserveError::Timeout(timeout.as_secs())),
    }
}
