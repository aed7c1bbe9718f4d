// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pm reload` - ask the host process manager to restart the daemon

use super::Context;
use crate::output::{print_action, OutputFormat};
use anyhow::{anyhow, bail, Context as _, Result};
use serde_json::json;

pub async fn handle(ctx: &Context, format: OutputFormat) -> Result<()> {
    let argv = &ctx.settings.reload_command;
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("reload_command is empty"))?;

    let status = tokio::process::Command::new(program)
        .args(args)
        .status()
        .await
        .with_context(|| format!("failed to run {program}"))?;
    if !status.success() {
        bail!("'{}' failed: {status}", argv.join(" "));
    }

    print_action(
        format,
        "Reload requested",
        json!({ "action": "reload", "command": argv }),
    )
}

#[cfg(test)]
#[path = "reload_tests.rs"]
mod tests;
