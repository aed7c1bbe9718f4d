// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process control for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ProcessControl, ProcessError, Signal};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Recorded signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalCall {
    pub pid: u32,
    pub signal: Signal,
    pub group: bool,
}

#[derive(Default)]
struct FakeProcessState {
    alive: HashSet<u32>,
    /// Processes that ignore SIGINT and SIGTERM
    stubborn: HashSet<u32>,
    calls: Vec<SignalCall>,
}

/// In-memory process table. Any delivered signal ends a process unless it
/// is marked stubborn, in which case only SIGKILL does.
#[derive(Clone, Default)]
pub struct FakeProcessControl {
    inner: Arc<Mutex<FakeProcessState>>,
}

impl FakeProcessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&self, pid: u32) {
        self.inner.lock().alive.insert(pid);
    }

    pub fn spawn_stubborn(&self, pid: u32) {
        let mut state = self.inner.lock();
        state.alive.insert(pid);
        state.stubborn.insert(pid);
    }

    /// Simulate the process exiting on its own.
    pub fn exit(&self, pid: u32) {
        self.inner.lock().alive.remove(&pid);
    }

    pub fn calls(&self) -> Vec<SignalCall> {
        self.inner.lock().calls.clone()
    }

    fn deliver(&self, pid: u32, signal: Signal, group: bool) -> Result<(), ProcessError> {
        let mut state = self.inner.lock();
        state.calls.push(SignalCall { pid, signal, group });
        if !state.alive.contains(&pid) {
            return Err(ProcessError::Signal { pid, signal });
        }
        if signal == Signal::Kill || !state.stubborn.contains(&pid) {
            state.alive.remove(&pid);
        }
        Ok(())
    }
}

impl ProcessControl for FakeProcessControl {
    fn is_alive(&self, pid: u32) -> bool {
        self.inner.lock().alive.contains(&pid)
    }

    fn signal(&self, pid: u32, signal: Signal) -> Result<(), ProcessError> {
        self.deliver(pid, signal, false)
    }

    fn signal_group(&self, pgid: u32, signal: Signal) -> Result<(), ProcessError> {
        self.deliver(pgid, signal, true)
    }
}
