// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job definitions resolved from schedule entries.
//!
//! Raw entries carry human-authored strings. Resolution parses them into
//! typed values; a string that fails to parse is logged and replaced with
//! its default rather than rejecting the entry.

use chrono::NaiveTime;
use pm_core::{
    end_of_day, parse_frequency, parse_time_of_day, parse_weekday, TaskTiming, TimeWindow,
    Weekdays, DEFAULT_FREQUENCY,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Check interval used when `check_alive_freq` is absent.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Program,
    Task,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Program => f.write_str("program"),
            JobKind::Task => f.write_str("task"),
        }
    }
}

/// One validated entry of the schedule document
#[derive(Debug, Clone, PartialEq)]
pub enum JobSpec {
    Program(ProgramSpec),
    Task(TaskSpec),
}

impl JobSpec {
    pub fn name(&self) -> &str {
        match self {
            JobSpec::Program(p) => &p.name,
            JobSpec::Task(t) => &t.name,
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            JobSpec::Program(_) => JobKind::Program,
            JobSpec::Task(_) => JobKind::Task,
        }
    }
}

/// A supervised long-running program
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSpec {
    pub name: String,
    /// Registered handler that provides start/stop/probe behavior
    pub handler: String,
    pub keep_alive: bool,
    pub check_interval: Duration,
    pub max_retries: u32,
    pub run_on_start: bool,
    /// Only set when both ends parsed
    pub window: Option<TimeWindow>,
    /// Shell command for the built-in `command` handler
    pub command: Option<String>,
    pub cwd: Option<PathBuf>,
    /// Overrides the daemon-wide stop grace period
    pub stop_grace: Option<Duration>,
}

/// A scheduled one-shot job
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpec {
    pub name: String,
    /// Shell command line run on each fire
    pub entry_point: String,
    /// Tasks without a start time only run as dependents or on demand
    pub start_time: Option<NaiveTime>,
    pub stop_time: NaiveTime,
    pub frequency: Option<Duration>,
    pub weekdays: Weekdays,
    pub run_on_complete: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl TaskSpec {
    /// Timing rules, if the task schedules itself.
    pub fn timing(&self) -> Option<TaskTiming> {
        self.start_time.map(|start| TaskTiming {
            start,
            stop: self.stop_time,
            frequency: self.frequency,
            weekdays: self.weekdays,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum RawJob {
    Program(RawProgram),
    Task(RawTask),
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawProgram {
    name: String,
    #[serde(alias = "program_class")]
    handler: String,
    #[serde(default)]
    keep_alive: bool,
    #[serde(default)]
    check_alive_freq: Option<String>,
    #[serde(default)]
    max_retries: u32,
    #[serde(default)]
    run_on_start: bool,
    #[serde(default, alias = "start")]
    start_time: Option<String>,
    #[serde(default, alias = "end")]
    end_time: Option<String>,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    cwd: Option<PathBuf>,
    #[serde(default)]
    stop_grace: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTask {
    name: String,
    #[serde(alias = "main_path", alias = "command")]
    entry_point: String,
    #[serde(default, alias = "start_time")]
    start: Option<String>,
    #[serde(default, alias = "stop_time")]
    stop: Option<String>,
    #[serde(default)]
    freq: Option<String>,
    #[serde(default)]
    days: Option<Vec<String>>,
    #[serde(default)]
    run_on_complete: Vec<String>,
    #[serde(default)]
    cwd: Option<PathBuf>,
}

impl RawJob {
    pub(crate) fn name(&self) -> &str {
        match self {
            RawJob::Program(p) => &p.name,
            RawJob::Task(t) => &t.name,
        }
    }

    pub(crate) fn resolve(self) -> JobSpec {
        match self {
            RawJob::Program(raw) => JobSpec::Program(raw.resolve()),
            RawJob::Task(raw) => JobSpec::Task(raw.resolve()),
        }
    }
}

impl RawProgram {
    fn resolve(self) -> ProgramSpec {
        let name = self.name;
        let check_interval = match self.check_alive_freq.as_deref() {
            Some(raw) => frequency_or_default(&name, "check_alive_freq", raw),
            None => DEFAULT_CHECK_INTERVAL,
        };
        let start = self
            .start_time
            .as_deref()
            .and_then(|raw| time_or_none(&name, "start_time", raw));
        let end = self
            .end_time
            .as_deref()
            .and_then(|raw| time_or_none(&name, "end_time", raw));
        let window = match (start, end) {
            (Some(start), Some(end)) => Some(TimeWindow::new(start, end)),
            (None, None) => None,
            _ => {
                tracing::warn!(job = %name, "schedule window needs both start and end, ignoring");
                None
            }
        };
        let stop_grace = self.stop_grace.as_deref().and_then(|raw| {
            parse_frequency(raw)
                .map_err(|e| tracing::warn!(job = %name, error = %e, "ignoring stop_grace"))
                .ok()
        });

        ProgramSpec {
            handler: self.handler,
            keep_alive: self.keep_alive,
            check_interval,
            max_retries: self.max_retries,
            run_on_start: self.run_on_start,
            window,
            command: self.command,
            cwd: self.cwd,
            stop_grace,
            name,
        }
    }
}

impl RawTask {
    fn resolve(self) -> TaskSpec {
        let name = self.name;
        let start_time = self
            .start
            .as_deref()
            .and_then(|raw| time_or_none(&name, "start", raw));
        let stop_time = self
            .stop
            .as_deref()
            .and_then(|raw| time_or_none(&name, "stop", raw))
            .unwrap_or_else(end_of_day);
        let frequency = self
            .freq
            .as_deref()
            .map(|raw| frequency_or_default(&name, "freq", raw));
        let weekdays = self
            .days
            .as_deref()
            .map(|days| resolve_weekdays(&name, days))
            .unwrap_or_default();

        TaskSpec {
            entry_point: self.entry_point,
            start_time,
            stop_time,
            frequency,
            weekdays,
            run_on_complete: self.run_on_complete,
            cwd: self.cwd,
            name,
        }
    }
}

fn frequency_or_default(job: &str, field: &str, raw: &str) -> Duration {
    parse_frequency(raw).unwrap_or_else(|e| {
        tracing::warn!(
            job,
            field,
            error = %e,
            default_secs = DEFAULT_FREQUENCY.as_secs(),
            "unparseable frequency, using default"
        );
        DEFAULT_FREQUENCY
    })
}

fn time_or_none(job: &str, field: &str, raw: &str) -> Option<NaiveTime> {
    parse_time_of_day(raw)
        .map_err(|e| tracing::warn!(job, field, error = %e, "unparseable time, ignoring"))
        .ok()
}

fn resolve_weekdays(job: &str, days: &[String]) -> Weekdays {
    let set: Weekdays = days
        .iter()
        .filter_map(|raw| {
            parse_weekday(raw)
                .map_err(|e| tracing::warn!(job, error = %e, "skipping weekday"))
                .ok()
        })
        .collect();
    if set.is_empty() {
        Weekdays::ALL
    } else {
        set
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
