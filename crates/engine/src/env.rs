// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for pm.
//!
//! Shared by the daemon and the CLI so both resolve the same directories.

use std::path::PathBuf;

/// Resolve state directory: PM_STATE_DIR > XDG_STATE_HOME/pm > ~/.local/state/pm
pub fn state_dir() -> Option<PathBuf> {
    state_dir_from(|key| std::env::var(key).ok())
}

pub(crate) fn state_dir_from(var: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(dir) = var("PM_STATE_DIR").filter(|s| !s.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    if let Some(xdg) = var("XDG_STATE_HOME").filter(|s| !s.is_empty()) {
        return Some(PathBuf::from(xdg).join("pm"));
    }
    let home = var("HOME").filter(|s| !s.is_empty())?;
    Some(PathBuf::from(home).join(".local/state/pm"))
}

/// Path overrides, each falling back to a location under the state dir.
pub(crate) const SCHEDULE_FILE: &str = "PM_SCHEDULE_FILE";
pub(crate) const STATUS_DIR: &str = "PM_STATUS_DIR";
pub(crate) const LOG_DIR: &str = "PM_LOG_DIR";

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
