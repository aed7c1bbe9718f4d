// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a schedule document.
///
/// Document-level variants abort the load. [`ConfigError::Entry`] and
/// [`ConfigError::DuplicateName`] reject a single entry and the rest of the
/// document still loads.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read schedule file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schedule document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("schedule document has no 'schedules' array")]
    MissingSchedules,

    #[error("schedule entry {index}{}: {message}", describe_name(name))]
    Entry {
        index: usize,
        name: Option<String>,
        message: String,
    },

    #[error("duplicate job name '{0}'")]
    DuplicateName(String),

    #[error("failed to write hash file {path}: {source}")]
    WriteHash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_name(name: &Option<String>) -> String {
    name.as_ref()
        .map(|n| format!(" ('{n}')"))
        .unwrap_or_default()
}
