// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pm execution engine: program supervision, task scheduling, orchestration

pub mod env;
mod error;
mod handlers;
pub mod log_paths;
mod notice;
mod orchestrator;
mod program;
mod settings;
mod task;

#[cfg(test)]
mod test_helpers;

pub use error::EngineError;
pub use handlers::{HandlerContext, HandlerFactory, HandlerRegistry};
pub use notice::Notice;
pub use orchestrator::Orchestrator;
pub use program::{Program, Tick};
pub use settings::{NotifyKind, Settings, SettingsError};
pub use task::{Task, TaskRegistry, TaskRun};

use pm_storage::StatusStore;
use std::sync::Arc;

/// Shared collaborators handed to every program and task.
#[derive(Clone)]
pub struct RuntimeDeps<C, P, N> {
    pub clock: C,
    pub process: P,
    pub notifier: N,
    pub store: StatusStore,
    pub settings: Arc<Settings>,
}
