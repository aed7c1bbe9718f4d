// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared path builders for log files.
//!
//! Used by the daemon and engine (writers) and the CLI (reader):
//!   `<log_dir>/pmd.log`
//!   `<log_dir>/<job>.log`

use std::path::{Path, PathBuf};

/// Daemon log file name
pub const DAEMON_LOG: &str = "pmd.log";

pub fn daemon_log_path(log_dir: &Path) -> PathBuf {
    log_dir.join(DAEMON_LOG)
}

/// Log receiving a job's subprocess output.
pub fn job_log_path(log_dir: &Path, job: &str) -> PathBuf {
    log_dir.join(format!("{job}.log"))
}

#[cfg(test)]
#[path = "log_paths_tests.rs"]
mod tests;
