// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use pm_adapters::{ProcessError, ProgramError};
use pm_storage::StatusError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown handler '{handler}' for program '{program}'")]
    UnknownHandler { program: String, handler: String },
    #[error("handler for program '{program}' failed to build: {source}")]
    HandlerBuild {
        program: String,
        #[source]
        source: ProgramError,
    },
    #[error("{program}: {source}")]
    Program {
        program: String,
        #[source]
        source: ProgramError,
    },
    #[error("task {task}: {source}")]
    Task {
        task: String,
        #[source]
        source: ProcessError,
    },
    #[error("task {task}: failed waiting for process: {source}")]
    Wait {
        task: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Status(#[from] StatusError),
}
