// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use fs2::FileExt;
use pm_adapters::{Notifier, SystemProcessControl};
use pm_core::SystemClock;
use pm_engine::log_paths::daemon_log_path;
use pm_engine::{HandlerRegistry, Orchestrator, RuntimeDeps, Settings, SettingsError};
use pm_schedule::{load_schedule, write_hash, ConfigError};
use pm_storage::StatusStore;
use thiserror::Error;
use tracing::{info, warn};

/// Orchestrator with the production adapters
pub type DaemonOrchestrator = Orchestrator<SystemClock, SystemProcessControl, Notifier>;

/// Lock/PID file name under the state dir
pub const LOCK_FILE: &str = "pmd.pid";

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, LifecycleError> {
        Ok(Self::from_settings(Settings::load()?))
    }

    pub fn from_settings(settings: Settings) -> Self {
        Self {
            lock_path: settings.state_dir.join(LOCK_FILE),
            log_path: daemon_log_path(&settings.log_dir),
            settings,
        }
    }
}

/// Running daemon
pub struct DaemonState {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    pub orchestrator: DaemonOrchestrator,
}

impl DaemonState {
    /// Stop supervision and release the PID file.
    pub fn shutdown(&mut self) {
        info!("Shutting down daemon...");
        self.orchestrator.shutdown();

        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }
        info!("Daemon shutdown complete");
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error(transparent)]
    Schedule(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Take the lock, load the schedule and build the orchestrator.
pub fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    match startup_inner(config) {
        Ok(daemon) => Ok(daemon),
        Err(e) => {
            // The PID file belongs to the running daemon when the lock is held
            if !matches!(e, LifecycleError::LockFailed(_)) {
                cleanup_on_failure(config);
            }
            Err(e)
        }
    }
}

fn startup_inner(config: &Config) -> Result<DaemonState, LifecycleError> {
    let settings = &config.settings;
    std::fs::create_dir_all(&settings.state_dir)?;

    // Open without truncating so a running daemon's PID survives a failed lock
    let mut lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    std::fs::create_dir_all(&settings.status_dir)?;
    std::fs::create_dir_all(&settings.log_dir)?;

    let schedule = load_schedule(&settings.schedule_file)?;
    write_hash(&settings.schedule_file, &schedule.hash)?;
    info!(
        path = %settings.schedule_file.display(),
        hash = %schedule.hash,
        "loaded schedule"
    );

    let deps = RuntimeDeps {
        clock: SystemClock,
        process: SystemProcessControl::new(),
        notifier: settings.notifier(),
        store: StatusStore::new(&settings.status_dir),
        settings: Arc::new(settings.clone()),
    };
    let orchestrator = Orchestrator::new(&schedule, &HandlerRegistry::with_builtins(), deps);

    Ok(DaemonState {
        config: config.clone(),
        lock_file,
        orchestrator,
    })
}

fn cleanup_on_failure(config: &Config) {
    if config.lock_path.exists() {
        if let Err(e) = std::fs::remove_file(&config.lock_path) {
            warn!("Failed to remove PID file: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
