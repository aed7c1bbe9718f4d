// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Detached spawning and graceful termination.

use super::{ProcessControl, ProcessError, Signal};
use pm_storage::open_capped_log;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};

/// Spawn `sh -c <command>` in its own process group with stdout and stderr
/// appended to `log_path`.
///
/// The child leads a new process group so signals aimed at the supervisor
/// (or its terminal) do not reach it.
pub fn spawn_detached(
    command: &str,
    cwd: Option<&Path>,
    log_path: &Path,
    log_max_bytes: u64,
) -> Result<Child, ProcessError> {
    let log_err = |source| ProcessError::Log {
        path: log_path.to_path_buf(),
        source,
    };
    let stdout = open_capped_log(log_path, log_max_bytes).map_err(log_err)?;
    let stderr = stdout.try_clone().map_err(log_err)?;

    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        .process_group(0);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    cmd.spawn().map_err(|source| ProcessError::Spawn {
        command: command.to_string(),
        source,
    })
}

/// Ask `pid` to quit, escalating to SIGKILL after `grace`.
///
/// Signals the process group first (children spawned by a shell share it)
/// and falls back to the single pid. Returns `true` if the process had to
/// be killed.
pub async fn terminate_gracefully<P: ProcessControl>(
    process: &P,
    pid: u32,
    grace: Duration,
) -> Result<bool, ProcessError> {
    if !process.is_alive(pid) {
        return Ok(false);
    }

    send(process, pid, Signal::Interrupt)?;

    let poll = crate::env::terminate_poll_ms();
    let deadline = tokio::time::Instant::now() + grace;
    while tokio::time::Instant::now() < deadline {
        if !process.is_alive(pid) {
            return Ok(false);
        }
        tokio::time::sleep(poll).await;
    }
    if !process.is_alive(pid) {
        return Ok(false);
    }

    tracing::warn!(pid, grace_secs = grace.as_secs(), "process ignored SIGINT, killing");
    send(process, pid, Signal::Kill)?;
    Ok(true)
}

fn send<P: ProcessControl>(process: &P, pid: u32, signal: Signal) -> Result<(), ProcessError> {
    process
        .signal_group(pid, signal)
        .or_else(|_| process.signal(pid, signal))
}

#[cfg(test)]
#[path = "spawn_tests.rs"]
mod tests;
