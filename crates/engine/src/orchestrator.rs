// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator: builds every job from a loaded schedule and starts them.
//!
//! One bad entry never blocks the rest. Programs whose handler does not
//! resolve are logged and skipped; schedule entries the loader rejected
//! are logged once here.

use crate::handlers::{HandlerContext, HandlerRegistry};
use crate::program::Program;
use crate::task::{Task, TaskRegistry};
use crate::RuntimeDeps;
use pm_adapters::{NotifyAdapter, ProcessControl};
use pm_core::{Clock, ProgramState};
use pm_schedule::Schedule;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct Orchestrator<C, P, N> {
    deps: RuntimeDeps<C, P, N>,
    /// Built but not yet started
    pending: Vec<Program<C, P, N>>,
    program_names: Vec<String>,
    tasks: TaskRegistry<C>,
    monitors: Vec<(String, JoinHandle<ProgramState>)>,
}

impl<C, P, N> Orchestrator<C, P, N>
where
    C: Clock,
    P: ProcessControl,
    N: NotifyAdapter,
{
    /// Instantiate programs and tasks from `schedule`.
    pub fn new(schedule: &Schedule, handlers: &HandlerRegistry, deps: RuntimeDeps<C, P, N>) -> Self {
        for rejected in &schedule.rejected {
            tracing::error!(error = %rejected, "skipping schedule entry");
        }

        let mut pending = Vec::new();
        for spec in schedule.programs() {
            let ctx = HandlerContext::from_settings(&deps.settings, &spec.name);
            match handlers.build(spec, &ctx) {
                Ok(adapter) => pending.push(Program::new(spec.clone(), adapter, deps.clone())),
                Err(e) => tracing::error!(program = %spec.name, error = %e, "skipping program"),
            }
        }

        let tasks = TaskRegistry::new();
        let built: Vec<_> = schedule
            .tasks()
            .map(|spec| {
                Arc::new(Task::new(
                    spec.clone(),
                    deps.clock.clone(),
                    deps.store.clone(),
                    Arc::clone(&deps.settings),
                    &tasks,
                ))
            })
            .collect();
        tasks.fill(built);

        let program_names = pending.iter().map(|p| p.name().to_string()).collect();
        tracing::info!(
            programs = pending.len(),
            tasks = tasks.len(),
            rejected = schedule.rejected.len(),
            "schedule loaded"
        );

        Self {
            deps,
            pending,
            program_names,
            tasks,
            monitors: Vec::new(),
        }
    }

    pub fn program_names(&self) -> &[String] {
        &self.program_names
    }

    pub fn tasks(&self) -> &TaskRegistry<C> {
        &self.tasks
    }

    /// Eager-start flagged programs, spawn one monitor per program and arm
    /// every task that has a start time.
    pub async fn start(&mut self) {
        let now = self.deps.clock.now();
        for mut program in std::mem::take(&mut self.pending) {
            if program.spec().run_on_start && program.within_schedule(now) {
                match program.start().await {
                    Ok(pid) => tracing::info!(program = %program.name(), pid, "started on launch"),
                    Err(e) => tracing::error!(error = %e, "start on launch failed"),
                }
            }
            let name = program.name().to_string();
            self.monitors.push((name, tokio::spawn(program.run())));
        }

        for task in self.tasks.tasks() {
            if task.spec().start_time.is_some() {
                task.schedule();
            }
        }
    }

    /// Number of monitor loops still supervising.
    pub fn active_monitors(&self) -> usize {
        self.monitors
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .count()
    }

    /// Abort every monitor loop and pending task timer.
    ///
    /// Supervised processes keep running.
    pub fn shutdown(&mut self) {
        for (name, handle) in self.monitors.drain(..) {
            tracing::debug!(program = %name, "stopping monitor");
            handle.abort();
        }
        for task in self.tasks.tasks() {
            task.cancel();
        }
        tracing::info!("orchestrator stopped");
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
