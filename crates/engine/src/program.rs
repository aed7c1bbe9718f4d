// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Program supervisor.
//!
//! Each program runs one monitor loop. Every tick records a checkup,
//! honors the operator's restart switch and the schedule window, probes
//! health, and applies the retry policy.

use crate::error::EngineError;
use crate::notice::Notice;
use crate::RuntimeDeps;
use chrono::NaiveDateTime;
use pm_adapters::{NotifyAdapter, ProcessControl, ProgramAdapter, Signal};
use pm_core::{Clock, HealthOutcome, JobStatus, ProgramState, TimeWindow};
use pm_schedule::ProgramSpec;
use std::sync::Arc;
use tracing::Instrument;

/// Result of one monitor tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    /// Supervision ended in the given state
    Exit(ProgramState),
}

pub struct Program<C, P, N> {
    spec: ProgramSpec,
    adapter: Arc<dyn ProgramAdapter>,
    deps: RuntimeDeps<C, P, N>,
    retries: u32,
    /// A down notice was sent and no recovery seen yet
    is_down: bool,
    state: ProgramState,
}

impl<C, P, N> Program<C, P, N>
where
    C: Clock,
    P: ProcessControl,
    N: NotifyAdapter,
{
    pub fn new(
        spec: ProgramSpec,
        adapter: Arc<dyn ProgramAdapter>,
        deps: RuntimeDeps<C, P, N>,
    ) -> Self {
        Self {
            spec,
            adapter,
            deps,
            retries: 0,
            is_down: false,
            state: ProgramState::Stopped,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn spec(&self) -> &ProgramSpec {
        &self.spec
    }

    pub fn state(&self) -> ProgramState {
        self.state
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// True if no window is configured or `now` falls inside it.
    pub fn within_schedule(&self, now: NaiveDateTime) -> bool {
        TimeWindow::within(self.spec.window.as_ref(), now)
    }

    /// Run the monitor loop until supervision ends.
    pub async fn run(mut self) -> ProgramState {
        let span = tracing::info_span!("program", name = %self.spec.name);
        async move {
            tracing::info!(
                interval_secs = self.spec.check_interval.as_secs(),
                keep_alive = self.spec.keep_alive,
                max_retries = self.spec.max_retries,
                "monitor started"
            );
            loop {
                if let Tick::Exit(state) = self.tick().await {
                    tracing::info!(%state, "monitor stopped");
                    return state;
                }
                tokio::time::sleep(self.spec.check_interval).await;
            }
        }
        .instrument(span)
        .await
    }

    /// One pass of the monitor loop.
    pub async fn tick(&mut self) -> Tick {
        let now = self.deps.clock.now();

        let status = match self
            .deps
            .store
            .update(&self.spec.name, |s| s.last_checkup = Some(now))
        {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "failed to record checkup");
                self.deps.store.read(&self.spec.name)
            }
        };

        if status.disable_restart {
            if self.state != ProgramState::Disabled {
                tracing::info!("restart disabled, skipping health checks");
            }
            self.state = ProgramState::Disabled;
            return Tick::Continue;
        }
        if self.state == ProgramState::Disabled {
            tracing::info!("restart re-enabled");
            self.state = ProgramState::Stopped;
        }

        if !self.within_schedule(now) {
            if let Some(pid) = status.recorded_pid() {
                if self.deps.process.is_alive(pid) {
                    tracing::info!(pid, "outside schedule window, stopping");
                    if let Err(e) = self.stop().await {
                        tracing::error!(error = %e, "failed to stop program");
                    }
                }
            }
            self.state = ProgramState::Stopped;
            return Tick::Continue;
        }

        let outcome = self.probe(&status).await;
        if !outcome.needs_restart() {
            self.retries = 0;
            self.state = ProgramState::Running;
            if self.is_down {
                self.is_down = false;
                self.send(Notice::Recovered, now).await;
            }
            return Tick::Continue;
        }

        tracing::warn!(%outcome, "health check failed");

        if !self.spec.keep_alive {
            if outcome.notifies() && !self.is_down {
                self.send(Notice::Down, now).await;
            }
            self.state = ProgramState::Stopped;
            return Tick::Exit(ProgramState::Stopped);
        }

        self.retries += 1;
        if self.retries > self.spec.max_retries {
            tracing::error!(retries = self.retries - 1, "retries exhausted, giving up");
            self.state = ProgramState::Failed;
            self.send(
                Notice::Failure {
                    retries: self.spec.max_retries,
                },
                now,
            )
            .await;
            return Tick::Exit(ProgramState::Failed);
        }

        tracing::info!(attempt = self.retries, max = self.spec.max_retries, "restarting");
        match self.start().await {
            Ok(pid) => {
                tracing::info!(pid, "restarted");
                self.state = ProgramState::Running;
            }
            Err(e) => {
                tracing::error!(error = %e, "restart failed");
                self.state = ProgramState::Stopped;
            }
        }

        if outcome.notifies() && !self.is_down {
            self.is_down = true;
            self.send(
                Notice::Restart {
                    attempt: self.retries,
                    max_retries: self.spec.max_retries,
                },
                now,
            )
            .await;
        }
        Tick::Continue
    }

    /// Start the program, replacing any process still recorded for it.
    ///
    /// The status document is rewritten only after a successful start.
    pub async fn start(&mut self) -> Result<u32, EngineError> {
        let previous = self.deps.store.read(&self.spec.name);
        if let Some(old) = previous.recorded_pid() {
            self.kill_recorded(old);
        }

        let pid = self
            .adapter
            .start()
            .await
            .map_err(|source| EngineError::Program {
                program: self.spec.name.clone(),
                source,
            })?;

        // The operator may flip the switch while the adapter is starting
        let (now, retries) = (self.deps.clock.now(), self.retries);
        self.deps.store.update(&self.spec.name, |s| {
            *s = JobStatus::started(pid, now, retries, s.disable_restart);
        })?;
        self.state = ProgramState::Running;
        Ok(pid)
    }

    /// Stop the program and record it as stopped.
    pub async fn stop(&mut self) -> Result<(), EngineError> {
        let previous = self.deps.store.read(&self.spec.name);
        self.adapter
            .stop(previous.recorded_pid())
            .await
            .map_err(|source| EngineError::Program {
                program: self.spec.name.clone(),
                source,
            })?;

        let retries = self.retries;
        self.deps.store.update(&self.spec.name, |s| {
            *s = JobStatus::stopped(retries, s.disable_restart);
        })?;
        self.state = ProgramState::Stopped;
        Ok(())
    }

    fn kill_recorded(&self, pid: u32) {
        let process = &self.deps.process;
        if !process.is_alive(pid) {
            return;
        }
        let killed = process
            .signal_group(pid, Signal::Kill)
            .or_else(|_| process.signal(pid, Signal::Kill));
        match killed {
            Ok(()) => tracing::info!(pid, "killed previously recorded process before start"),
            Err(e) => tracing::error!(pid, error = %e, "failed to kill previously recorded process"),
        }
    }

    /// Evaluate health. Probe errors and panics count as needing a restart.
    async fn probe(&self, status: &JobStatus) -> HealthOutcome {
        let pid = status.recorded_pid();
        let adapter = Arc::clone(&self.adapter);
        let custom = tokio::spawn(async move { adapter.custom_monitor(pid).await }).await;

        match custom {
            Ok(None) => {
                HealthOutcome::from_alive(pid.is_some_and(|pid| self.deps.process.is_alive(pid)))
            }
            Ok(Some(Ok(outcome))) => outcome,
            Ok(Some(Err(e))) => {
                tracing::error!(error = %e, "health probe failed");
                HealthOutcome::NeedsRestart
            }
            Err(e) => {
                tracing::error!(error = %e, "health probe panicked");
                HealthOutcome::NeedsRestart
            }
        }
    }

    async fn send(&self, notice: Notice, at: NaiveDateTime) {
        let title = notice.title(&self.spec.name);
        let message = notice.message(&self.spec.name, at);
        if let Err(e) = self.deps.notifier.notify(&title, &message).await {
            tracing::warn!(%title, error = %e, "notification failed");
        }
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
