// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pm stop` / `pm start`
//!
//! Both flip the program's `disable_restart` switch so the daemon's
//! monitor loop stands back while the operator is in control.

use super::Context;
use crate::output::{print_action, OutputFormat};
use anyhow::Result;
use serde_json::json;

/// Disable restarts, then stop the program.
pub async fn stop(ctx: &Context, name: &str, format: OutputFormat) -> Result<()> {
    let schedule = ctx.schedule()?;
    let mut program = ctx.program(&schedule, name)?;

    ctx.store.update(name, |s| s.disable_restart = true)?;
    program.stop().await?;

    print_action(
        format,
        &format!("Stopped {name} (restarts disabled)"),
        json!({ "name": name, "action": "stop", "disable_restart": true }),
    )
}

/// Start the program, then re-enable restarts.
pub async fn start(ctx: &Context, name: &str, format: OutputFormat) -> Result<()> {
    let schedule = ctx.schedule()?;
    let mut program = ctx.program(&schedule, name)?;

    let pid = program.start().await?;
    ctx.store.update(name, |s| s.disable_restart = false)?;

    print_action(
        format,
        &format!("Started {name} (pid {pid})"),
        json!({ "name": name, "action": "start", "pid": pid, "disable_restart": false }),
    )
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
