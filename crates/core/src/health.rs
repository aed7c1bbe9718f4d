// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Health probe outcomes and supervisor states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one health probe of a supervised program.
///
/// The silent and notify variants let a probe control notifications
/// across an outage: notify on the first failed poll, stay silent while
/// the program remains down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthOutcome {
    Healthy,
    NeedsRestart,
    NeedsRestartSilent,
    NeedsRestartNotify,
}

impl HealthOutcome {
    /// Outcome of the default pid-liveness probe.
    pub fn from_alive(alive: bool) -> Self {
        if alive {
            HealthOutcome::Healthy
        } else {
            HealthOutcome::NeedsRestart
        }
    }

    pub fn needs_restart(self) -> bool {
        !matches!(self, HealthOutcome::Healthy)
    }

    /// Whether a restart caused by this outcome should be announced.
    pub fn notifies(self) -> bool {
        matches!(
            self,
            HealthOutcome::NeedsRestart | HealthOutcome::NeedsRestartNotify
        )
    }
}

impl fmt::Display for HealthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthOutcome::Healthy => "healthy",
            HealthOutcome::NeedsRestart => "needs_restart",
            HealthOutcome::NeedsRestartSilent => "needs_restart_silent",
            HealthOutcome::NeedsRestartNotify => "needs_restart_notify",
        };
        f.write_str(s)
    }
}

/// Supervisor state of a program's monitor loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramState {
    Stopped,
    Running,
    /// Restart suppressed by the operator
    Disabled,
    /// Retries exhausted; terminal until re-enabled
    Failed,
}

impl ProgramState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ProgramState::Failed)
    }
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProgramState::Stopped => "stopped",
            ProgramState::Running => "running",
            ProgramState::Disabled => "disabled",
            ProgramState::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
