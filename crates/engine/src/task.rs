// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task scheduler.
//!
//! A task arms a one-shot timer for its next eligible instant. When the
//! timer fires the entry point runs as a detached subprocess, the outcome
//! is recorded, the task re-arms itself and its dependents are triggered.

use crate::error::EngineError;
use crate::log_paths::job_log_path;
use crate::Settings;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use pm_adapters::spawn_detached;
use pm_core::{delay_until, Clock};
use pm_schedule::TaskSpec;
use pm_storage::StatusStore;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock, Weak};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Outcome of one task execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRun {
    pub success: bool,
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub at: NaiveDateTime,
}

/// Name to task lookup used for dependent triggering.
///
/// Filled once after every task is built. Tasks keep a weak handle so a
/// dependent can be resolved by name at trigger time while the owner of
/// the registry decides how long the tasks live.
pub struct TaskRegistry<C> {
    tasks: Arc<TaskTable<C>>,
}

type TaskTable<C> = OnceLock<BTreeMap<String, Arc<Task<C>>>>;

impl<C> Clone for TaskRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
        }
    }
}

impl<C> Default for TaskRegistry<C> {
    fn default() -> Self {
        Self {
            tasks: Arc::new(OnceLock::new()),
        }
    }
}

impl<C> TaskRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the task table. Returns `false` if it was already filled.
    pub fn fill(&self, tasks: impl IntoIterator<Item = Arc<Task<C>>>) -> bool {
        let map = tasks
            .into_iter()
            .map(|task| (task.spec.name.clone(), task))
            .collect();
        self.tasks.set(map).is_ok()
    }

    pub fn get(&self, name: &str) -> Option<Arc<Task<C>>> {
        self.tasks.get()?.get(name).cloned()
    }

    fn downgrade(&self) -> Weak<TaskTable<C>> {
        Arc::downgrade(&self.tasks)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Arc<Task<C>>> {
        self.tasks.get().into_iter().flat_map(|map| map.values())
    }

    pub fn len(&self) -> usize {
        self.tasks.get().map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct Task<C> {
    spec: TaskSpec,
    clock: C,
    store: StatusStore,
    settings: Arc<Settings>,
    registry: Weak<TaskTable<C>>,
    /// Pending timer, replaced on every `schedule`
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<C: Clock> Task<C> {
    pub fn new(
        spec: TaskSpec,
        clock: C,
        store: StatusStore,
        settings: Arc<Settings>,
        registry: &TaskRegistry<C>,
    ) -> Self {
        Self {
            spec,
            clock,
            store,
            settings,
            registry: registry.downgrade(),
            timer: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn spec(&self) -> &TaskSpec {
        &self.spec
    }

    /// Next instant the task would fire, if it schedules itself.
    pub fn next_run(&self) -> Option<NaiveDateTime> {
        let timing = self.spec.timing()?;
        Some(timing.next_run(self.clock.now()))
    }

    /// True while a timer is armed and has not fired yet.
    pub fn is_armed(&self) -> bool {
        self.timer
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Arm the timer for the next run, cancelling any pending one.
    ///
    /// Tasks without a start time are never armed.
    pub fn schedule(self: &Arc<Self>) -> Option<NaiveDateTime> {
        let Some(timing) = self.spec.timing() else {
            tracing::debug!(task = %self.spec.name, "no start time, not scheduling");
            return None;
        };
        let now = self.clock.now();
        let next = timing.next_run(now);
        let delay = delay_until(next, now);

        let task = Arc::clone(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.spawn_run();
        });
        if let Some(previous) = self.timer.lock().replace(handle) {
            previous.abort();
        }

        tracing::info!(
            task = %self.spec.name,
            next_run = %next,
            delay_secs = delay.as_secs(),
            "scheduled"
        );
        Some(next)
    }

    /// Cancel the pending timer, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.timer.lock().take() {
            handle.abort();
        }
    }

    /// Run the entry point once, wait for it and record the outcome.
    pub async fn run_once(&self) -> Result<TaskRun, EngineError> {
        let name = &self.spec.name;
        let log_path = job_log_path(&self.settings.log_dir, name);

        let spawned = spawn_detached(
            &self.spec.entry_point,
            self.spec.cwd.as_deref(),
            &log_path,
            self.settings.log_max_bytes,
        );
        let mut child = match spawned {
            Ok(child) => child,
            Err(source) => {
                self.record(false, self.clock.now());
                return Err(EngineError::Task {
                    task: name.clone(),
                    source,
                });
            }
        };
        tracing::info!(pid = ?child.id(), "task started");

        let exit = match child.wait().await {
            Ok(exit) => exit,
            Err(source) => {
                self.record(false, self.clock.now());
                return Err(EngineError::Wait {
                    task: name.clone(),
                    source,
                });
            }
        };

        let run = TaskRun {
            success: exit.success(),
            exit_code: exit.code(),
            at: self.clock.now(),
        };
        self.record(run.success, run.at);
        if run.success {
            tracing::info!("task finished");
        } else {
            tracing::warn!(exit_code = ?run.exit_code, "task failed");
        }
        Ok(run)
    }

    /// Run, re-arm and trigger dependents.
    pub async fn run_and_reschedule(self: Arc<Self>) {
        let span = tracing::info_span!("task", name = %self.spec.name);
        async {
            if let Err(e) = self.run_once().await {
                tracing::error!(error = %e, "task run failed");
            }
            if self.spec.start_time.is_some() {
                self.schedule();
            }
            self.trigger_dependents();
        }
        .instrument(span)
        .await
    }

    /// Start each `run_on_complete` task: immediately if it has no start
    /// time, otherwise through its own schedule.
    pub fn trigger_dependents(&self) {
        for name in &self.spec.run_on_complete {
            let dependent = self
                .registry
                .upgrade()
                .and_then(|table| table.get()?.get(name).cloned());
            let Some(dependent) = dependent else {
                tracing::error!(dependent = %name, "unknown dependent task");
                continue;
            };
            if dependent.spec.start_time.is_none() {
                tracing::info!(dependent = %name, "running dependent");
                dependent.spawn_run();
            } else {
                dependent.schedule();
            }
        }
    }

    fn spawn_run(self: &Arc<Self>) -> JoinHandle<()> {
        let task = Arc::clone(self);
        tokio::spawn(async move { task.run_and_reschedule().await })
    }

    fn record(&self, success: bool, at: NaiveDateTime) {
        if let Err(e) = self
            .store
            .update(&self.spec.name, |s| s.record_run(success, at))
        {
            tracing::warn!(task = %self.spec.name, error = %e, "failed to record run");
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
