// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process control: liveness checks, signals, detached spawning

mod spawn;
mod system;

pub use spawn::{spawn_detached, terminate_gracefully};
pub use system::SystemProcessControl;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProcessControl, SignalCall};

use std::fmt;
use thiserror::Error;

/// Signals the supervisor sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Graceful quit request (SIGINT)
    Interrupt,
    /// SIGTERM
    Terminate,
    /// SIGKILL
    Kill,
}

impl Signal {
    /// Flag understood by `kill(1)`.
    pub fn flag(self) -> &'static str {
        match self {
            Signal::Interrupt => "-INT",
            Signal::Terminate => "-TERM",
            Signal::Kill => "-KILL",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Interrupt => f.write_str("SIGINT"),
            Signal::Terminate => f.write_str("SIGTERM"),
            Signal::Kill => f.write_str("SIGKILL"),
        }
    }
}

/// Errors from spawning or signalling processes
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open log {path}: {source}")]
    Log {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("spawned process exited before reporting a pid")]
    NoPid,
    #[error("failed to send {signal} to {pid}")]
    Signal { pid: u32, signal: Signal },
}

/// Access to host processes by pid
pub trait ProcessControl: Clone + Send + Sync + 'static {
    /// Zero-signal existence check.
    fn is_alive(&self, pid: u32) -> bool;

    /// Send `signal` to a single process.
    fn signal(&self, pid: u32, signal: Signal) -> Result<(), ProcessError>;

    /// Send `signal` to every process in group `pgid`.
    fn signal_group(&self, pgid: u32, signal: Signal) -> Result<(), ProcessError>;
}
