// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host process control through `kill(1)`.

use super::{ProcessControl, ProcessError, Signal};
use std::process::{Command, Stdio};

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProcessControl;

impl SystemProcessControl {
    pub fn new() -> Self {
        Self
    }
}

/// Run `kill` with the given arguments, reporting success.
fn kill(args: &[&str]) -> bool {
    Command::new("kill")
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

impl ProcessControl for SystemProcessControl {
    fn is_alive(&self, pid: u32) -> bool {
        pid != 0 && kill(&["-0", &pid.to_string()])
    }

    fn signal(&self, pid: u32, signal: Signal) -> Result<(), ProcessError> {
        if pid != 0 && kill(&[signal.flag(), &pid.to_string()]) {
            Ok(())
        } else {
            Err(ProcessError::Signal { pid, signal })
        }
    }

    fn signal_group(&self, pgid: u32, signal: Signal) -> Result<(), ProcessError> {
        // pid 1 would address every process
        if pgid > 1 && kill(&[signal.flag(), "--", &format!("-{pgid}")]) {
            Ok(())
        } else {
            Err(ProcessError::Signal { pid: pgid, signal })
        }
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
