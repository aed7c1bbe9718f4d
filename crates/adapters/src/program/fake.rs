// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake program adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ProgramAdapter, ProgramError};
use crate::process::FakeProcessControl;
use async_trait::async_trait;
use parking_lot::Mutex;
use pm_core::HealthOutcome;
use std::collections::VecDeque;
use std::sync::Arc;

/// Recorded adapter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramCall {
    Start,
    Stop { pid: Option<u32> },
    Probe { pid: Option<u32> },
}

/// Scripted probe step
#[derive(Debug, Clone)]
enum ProbeStep {
    Outcome(HealthOutcome),
    Fail,
    Panic,
}

struct FakeProgramState {
    calls: Vec<ProgramCall>,
    next_pid: u32,
    fail_start: bool,
    /// `None` uses the default liveness probe
    probes: Option<VecDeque<ProbeStep>>,
    last_probe: Option<ProbeStep>,
}

/// Fake program adapter.
///
/// Started programs are registered as alive in an optional
/// [`FakeProcessControl`] so the default liveness probe sees them.
#[derive(Clone)]
pub struct FakeProgramAdapter {
    inner: Arc<Mutex<FakeProgramState>>,
    process: Option<FakeProcessControl>,
}

impl Default for FakeProgramAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeProgramState {
                calls: Vec::new(),
                next_pid: 1000,
                fail_start: false,
                probes: None,
                last_probe: None,
            })),
            process: None,
        }
    }
}

impl FakeProgramAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register started pids with `process`.
    pub fn with_process(mut self, process: FakeProcessControl) -> Self {
        self.process = Some(process);
        self
    }

    /// Use a custom probe that returns `outcomes` in order, repeating the
    /// last one once exhausted.
    pub fn with_probe(self, outcomes: impl IntoIterator<Item = HealthOutcome>) -> Self {
        self.inner.lock().probes = Some(outcomes.into_iter().map(ProbeStep::Outcome).collect());
        self
    }

    /// Make the next custom probe return an error.
    pub fn probe_fails_next(&self) {
        self.push_front(ProbeStep::Fail);
    }

    /// Make the next custom probe panic.
    pub fn probe_panics_next(&self) {
        self.push_front(ProbeStep::Panic);
    }

    pub fn fail_start(&self, fail: bool) {
        self.inner.lock().fail_start = fail;
    }

    pub fn calls(&self) -> Vec<ProgramCall> {
        self.inner.lock().calls.clone()
    }

    pub fn start_count(&self) -> usize {
        self.count(|c| matches!(c, ProgramCall::Start))
    }

    pub fn stop_count(&self) -> usize {
        self.count(|c| matches!(c, ProgramCall::Stop { .. }))
    }

    fn count(&self, f: impl Fn(&ProgramCall) -> bool) -> usize {
        self.inner.lock().calls.iter().filter(|c| f(c)).count()
    }

    fn push_front(&self, step: ProbeStep) {
        let mut state = self.inner.lock();
        state.probes.get_or_insert_with(VecDeque::new).push_front(step);
    }
}

#[async_trait]
impl ProgramAdapter for FakeProgramAdapter {
    async fn start(&self) -> Result<u32, ProgramError> {
        let pid = {
            let mut state = self.inner.lock();
            state.calls.push(ProgramCall::Start);
            if state.fail_start {
                return Err(ProgramError::Other("scripted start failure".to_string()));
            }
            state.next_pid += 1;
            state.next_pid
        };
        if let Some(process) = &self.process {
            process.spawn(pid);
        }
        Ok(pid)
    }

    async fn stop(&self, pid: Option<u32>) -> Result<(), ProgramError> {
        self.inner.lock().calls.push(ProgramCall::Stop { pid });
        if let (Some(process), Some(pid)) = (&self.process, pid) {
            process.exit(pid);
        }
        Ok(())
    }

    async fn custom_monitor(&self, pid: Option<u32>) -> Option<Result<HealthOutcome, ProgramError>> {
        let step = {
            let mut state = self.inner.lock();
            let next = state.probes.as_mut()?.pop_front();
            state.calls.push(ProgramCall::Probe { pid });
            match next {
                Some(step) => {
                    if matches!(step, ProbeStep::Outcome(_)) {
                        state.last_probe = Some(step.clone());
                    }
                    step
                }
                None => state
                    .last_probe
                    .clone()
                    .unwrap_or(ProbeStep::Outcome(HealthOutcome::Healthy)),
            }
        };
        match step {
            ProbeStep::Outcome(outcome) => Some(Ok(outcome)),
            ProbeStep::Fail => Some(Err(ProgramError::Probe("scripted failure".to_string()))),
            #[allow(clippy::panic)]
            ProbeStep::Panic => panic!("scripted probe panic"),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
