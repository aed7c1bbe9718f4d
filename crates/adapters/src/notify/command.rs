// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External command notification adapter.
//!
//! Runs a configured program with the title and message appended as its
//! last two arguments, e.g. a mail or chat wrapper script. The same values
//! are exported as `PM_NOTIFY_TITLE` and `PM_NOTIFY_MESSAGE`.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct CommandNotifyAdapter {
    argv: Arc<[String]>,
}

impl CommandNotifyAdapter {
    /// Returns `None` for an empty argv.
    pub fn new(argv: Vec<String>) -> Option<Self> {
        if argv.is_empty() {
            return None;
        }
        Some(Self { argv: argv.into() })
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

#[async_trait]
impl NotifyAdapter for CommandNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(NotifyError::SendFailed("empty notify command".to_string()));
        };
        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args)
            .arg(title)
            .arg(message)
            .env("PM_NOTIFY_TITLE", title)
            .env("PM_NOTIFY_MESSAGE", message)
            .stdin(std::process::Stdio::null());

        let program = program.clone();
        tokio::spawn(async move {
            match cmd.output().await {
                Ok(output) if output.status.success() => {
                    tracing::debug!(%program, "notify command succeeded");
                }
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    tracing::warn!(%program, %stderr, "notify command exited with non-zero status");
                }
                Err(e) => {
                    tracing::warn!(%program, error = %e, "notify command failed to spawn");
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
