// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod control;
pub mod list;
pub mod reload;
pub mod run;

use anyhow::{anyhow, Context as _, Result};
use pm_adapters::{Notifier, ProgramAdapter, SystemProcessControl};
use pm_core::SystemClock;
use pm_engine::{
    HandlerContext, HandlerRegistry, Program, RuntimeDeps, Settings, Task, TaskRegistry,
};
use pm_schedule::{load_schedule, JobSpec, ProgramSpec, Schedule, TaskSpec};
use pm_storage::StatusStore;
use std::sync::Arc;

/// Program wired to the production clock and process control. The CLI
/// never sends notifications.
pub type CliProgram = Program<SystemClock, SystemProcessControl, Notifier>;

/// Resolved settings plus the status store they point at.
pub struct Context {
    pub settings: Arc<Settings>,
    pub store: StatusStore,
    pub handlers: HandlerRegistry,
}

impl Context {
    pub fn load() -> Result<Self> {
        Ok(Self::new(Settings::load()?))
    }

    pub fn new(settings: Settings) -> Self {
        Self {
            store: StatusStore::new(&settings.status_dir),
            settings: Arc::new(settings),
            handlers: HandlerRegistry::with_builtins(),
        }
    }

    pub fn schedule(&self) -> Result<Schedule> {
        let path = &self.settings.schedule_file;
        load_schedule(path).with_context(|| format!("cannot load schedule {}", path.display()))
    }

    fn deps(&self) -> RuntimeDeps<SystemClock, SystemProcessControl, Notifier> {
        RuntimeDeps {
            clock: SystemClock,
            process: SystemProcessControl::new(),
            notifier: Notifier::default(),
            store: self.store.clone(),
            settings: Arc::clone(&self.settings),
        }
    }

    pub fn adapter(&self, spec: &ProgramSpec) -> Result<Arc<dyn ProgramAdapter>> {
        let ctx = HandlerContext::from_settings(&self.settings, &spec.name);
        Ok(self.handlers.build(spec, &ctx)?)
    }

    /// Build the named program from the schedule.
    pub fn program(&self, schedule: &Schedule, name: &str) -> Result<CliProgram> {
        let spec = program_spec(schedule, name)?;
        let adapter = self.adapter(spec)?;
        Ok(Program::new(spec.clone(), adapter, self.deps()))
    }

    /// Build the named task, without dependents.
    pub fn task(&self, schedule: &Schedule, name: &str) -> Result<Arc<Task<SystemClock>>> {
        let spec = task_spec(schedule, name)?;
        Ok(Arc::new(Task::new(
            spec.clone(),
            SystemClock,
            self.store.clone(),
            Arc::clone(&self.settings),
            &TaskRegistry::new(),
        )))
    }
}

fn program_spec<'a>(schedule: &'a Schedule, name: &str) -> Result<&'a ProgramSpec> {
    match schedule.get(name) {
        Some(JobSpec::Program(spec)) => Ok(spec),
        Some(JobSpec::Task(_)) => Err(anyhow!("'{name}' is a task, not a program")),
        None => Err(anyhow!("no program named '{name}' in the schedule")),
    }
}

fn task_spec<'a>(schedule: &'a Schedule, name: &str) -> Result<&'a TaskSpec> {
    match schedule.get(name) {
        Some(JobSpec::Task(spec)) => Ok(spec),
        Some(JobSpec::Program(_)) => Err(anyhow!("'{name}' is a program, not a task")),
        None => Err(anyhow!("no task named '{name}' in the schedule")),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
