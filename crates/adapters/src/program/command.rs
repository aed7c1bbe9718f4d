// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in `command` handler: runs a shell command as the program.

use super::{ProgramAdapter, ProgramError};
use crate::process::{spawn_detached, terminate_gracefully, ProcessControl, ProcessError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Instrument;

pub struct CommandProgram<P> {
    name: String,
    command: String,
    cwd: Option<PathBuf>,
    log_path: PathBuf,
    log_max_bytes: u64,
    stop_grace: Duration,
    process: P,
}

impl<P: ProcessControl> CommandProgram<P> {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        log_path: PathBuf,
        process: P,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            cwd: None,
            log_path,
            log_max_bytes: pm_storage::DEFAULT_LOG_MAX_BYTES,
            stop_grace: Duration::from_secs(10),
            process,
        }
    }

    pub fn cwd(mut self, cwd: Option<PathBuf>) -> Self {
        self.cwd = cwd;
        self
    }

    pub fn log_max_bytes(mut self, max: u64) -> Self {
        self.log_max_bytes = max;
        self
    }

    pub fn stop_grace(mut self, grace: Duration) -> Self {
        self.stop_grace = grace;
        self
    }
}

#[async_trait]
impl<P: ProcessControl> ProgramAdapter for CommandProgram<P> {
    async fn start(&self) -> Result<u32, ProgramError> {
        let mut child = spawn_detached(
            &self.command,
            self.cwd.as_deref(),
            &self.log_path,
            self.log_max_bytes,
        )?;
        let pid = child.id().ok_or(ProcessError::NoPid)?;

        // Reap the child so a dead program does not linger as a zombie that
        // still passes the liveness probe.
        let name = self.name.clone();
        tokio::spawn(
            async move {
                match child.wait().await {
                    Ok(status) => tracing::info!(pid, %status, "program exited"),
                    Err(e) => tracing::warn!(pid, error = %e, "failed to wait for program"),
                }
            }
            .instrument(tracing::info_span!("program.reap", name = %name)),
        );

        Ok(pid)
    }

    async fn stop(&self, pid: Option<u32>) -> Result<(), ProgramError> {
        let Some(pid) = pid else {
            return Ok(());
        };
        let forced = terminate_gracefully(&self.process, pid, self.stop_grace).await?;
        if forced {
            tracing::warn!(program = %self.name, pid, "program killed after grace period");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
