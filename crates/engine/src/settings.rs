// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime settings.
//!
//! Resolved in order: built-in defaults, then `<state_dir>/config.toml`,
//! then environment overrides for the directory layout.

use crate::env;
use pm_adapters::{CommandNotifyAdapter, DesktopNotifyAdapter, NoOpNotifyAdapter, Notifier};
use pm_core::parse_frequency;
use pm_storage::DEFAULT_LOG_MAX_BYTES;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file name inside the state dir
pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_STOP_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine state directory (set PM_STATE_DIR or HOME)")]
    NoStateDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid {field} '{value}': {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Notification backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyKind {
    Desktop,
    Command,
    #[default]
    None,
}

/// Optional keys of `config.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    schedule_file: Option<PathBuf>,
    status_dir: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    log_max_bytes: Option<u64>,
    stop_grace: Option<String>,
    notify: Option<NotifyKind>,
    notify_command: Option<Vec<String>>,
    reload_command: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub state_dir: PathBuf,
    pub schedule_file: PathBuf,
    pub status_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Ceiling for each job log before its head is dropped
    pub log_max_bytes: u64,
    /// How long a stopped program gets between SIGINT and SIGKILL
    pub stop_grace: Duration,
    pub notify: NotifyKind,
    pub notify_command: Vec<String>,
    /// Command that asks the host process manager to restart the daemon
    pub reload_command: Vec<String>,
}

impl Settings {
    /// Defaults for everything under `state_dir`.
    pub fn with_state_dir(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            schedule_file: state_dir.join("schedule.json"),
            status_dir: state_dir.join("status"),
            log_dir: state_dir.join("logs"),
            log_max_bytes: DEFAULT_LOG_MAX_BYTES,
            stop_grace: DEFAULT_STOP_GRACE,
            notify: NotifyKind::None,
            notify_command: Vec::new(),
            reload_command: ["supervisorctl", "restart", "pmd"]
                .map(String::from)
                .to_vec(),
            state_dir,
        }
    }

    /// Resolve settings from the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        let state_dir = env::state_dir().ok_or(SettingsError::NoStateDir)?;
        Self::load_from(&state_dir, |key| std::env::var(key).ok())
    }

    /// Resolve settings for `state_dir`, reading overrides through `var`.
    pub fn load_from(
        state_dir: &Path,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut settings = Self::with_state_dir(state_dir);

        let path = state_dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let file: FileConfig = toml::from_str(&content)
                    .map_err(|source| SettingsError::Parse { path, source })?;
                settings.apply(file)?;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(SettingsError::Read { path, source }),
        }

        let path_var = |key: &str| var(key).filter(|s| !s.is_empty()).map(PathBuf::from);
        if let Some(path) = path_var(env::SCHEDULE_FILE) {
            settings.schedule_file = path;
        }
        if let Some(path) = path_var(env::STATUS_DIR) {
            settings.status_dir = path;
        }
        if let Some(path) = path_var(env::LOG_DIR) {
            settings.log_dir = path;
        }
        Ok(settings)
    }

    fn apply(&mut self, file: FileConfig) -> Result<(), SettingsError> {
        // Relative paths in the config file are relative to the state dir
        let state_dir = self.state_dir.clone();
        let under_state = |p: PathBuf| state_dir.join(p);
        if let Some(p) = file.schedule_file {
            self.schedule_file = under_state(p);
        }
        if let Some(p) = file.status_dir {
            self.status_dir = under_state(p);
        }
        if let Some(p) = file.log_dir {
            self.log_dir = under_state(p);
        }
        if let Some(max) = file.log_max_bytes {
            if max == 0 {
                return Err(SettingsError::Invalid {
                    field: "log_max_bytes",
                    value: max.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
            self.log_max_bytes = max;
        }
        if let Some(raw) = file.stop_grace {
            self.stop_grace = parse_frequency(&raw).map_err(|e| SettingsError::Invalid {
                field: "stop_grace",
                value: raw.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(kind) = file.notify {
            self.notify = kind;
        }
        if let Some(argv) = file.notify_command {
            self.notify_command = argv;
        }
        if let Some(argv) = file.reload_command {
            self.reload_command = argv;
        }
        if self.notify == NotifyKind::Command && self.notify_command.is_empty() {
            return Err(SettingsError::Invalid {
                field: "notify_command",
                value: String::new(),
                reason: "required when notify = \"command\"".to_string(),
            });
        }
        Ok(())
    }

    /// Notification backend for these settings.
    pub fn notifier(&self) -> Notifier {
        match self.notify {
            NotifyKind::Desktop => Notifier::Desktop(DesktopNotifyAdapter::new()),
            NotifyKind::Command => CommandNotifyAdapter::new(self.notify_command.clone())
                .map(Notifier::Command)
                .unwrap_or(Notifier::None(NoOpNotifyAdapter)),
            NotifyKind::None => Notifier::None(NoOpNotifyAdapter),
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
