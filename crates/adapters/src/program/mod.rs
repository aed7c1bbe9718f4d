// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Program adapters: how a supervised program is started, stopped and probed

mod command;

pub use command::CommandProgram;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProgramAdapter, ProgramCall};

use crate::process::ProcessError;
use async_trait::async_trait;
use pm_core::HealthOutcome;
use thiserror::Error;

/// Errors from program adapters
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("handler '{handler}' requires '{field}'")]
    MissingOption {
        handler: &'static str,
        field: &'static str,
    },
    #[error("health probe failed: {0}")]
    Probe(String),
    #[error("{0}")]
    Other(String),
}

/// Start/stop/probe behavior for one supervised program.
///
/// `pid` arguments carry the pid recorded in the program's status, if any.
#[async_trait]
pub trait ProgramAdapter: Send + Sync + 'static {
    /// Launch the program detached from the supervisor and return its pid.
    async fn start(&self) -> Result<u32, ProgramError>;

    /// Shut the program down, gracefully first.
    async fn stop(&self, pid: Option<u32>) -> Result<(), ProgramError>;

    /// Program-specific health probe. `None` selects the default pid
    /// liveness check.
    async fn custom_monitor(&self, _pid: Option<u32>) -> Option<Result<HealthOutcome, ProgramError>> {
        None
    }
}
