// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pm run` - execute a task now

use super::Context;
use crate::exit_error::ExitError;
use crate::output::{print_action, OutputFormat};
use anyhow::Result;
use pm_core::STATUS_TIME_FORMAT;
use serde_json::json;

/// Run the task synchronously. The process exits with the task's code.
///
/// Dependents are not triggered and the task is not re-armed; the daemon
/// keeps its own timers.
pub async fn handle(ctx: &Context, name: &str, format: OutputFormat) -> Result<()> {
    let schedule = ctx.schedule()?;
    let task = ctx.task(&schedule, name)?;
    let run = task.run_once().await?;

    let at = run.at.format(STATUS_TIME_FORMAT).to_string();
    let text = match (run.success, run.exit_code) {
        (true, _) => format!("{name} finished at {at}"),
        (false, Some(code)) => format!("{name} failed with exit code {code} at {at}"),
        (false, None) => format!("{name} was killed by a signal at {at}"),
    };
    print_action(
        format,
        &text,
        json!({
            "name": name,
            "success": run.success,
            "exit_code": run.exit_code,
            "at": at,
        }),
    )?;

    if run.success {
        Ok(())
    } else {
        Err(ExitError::new(run.exit_code.unwrap_or(1), "").into())
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
