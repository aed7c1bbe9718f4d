// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pm list` - schedule validity plus program and task status tables
//!
//! Reads status documents and probes pids directly; the daemon is not
//! consulted. A row whose status cannot be determined carries its error
//! text instead of aborting the listing.

use super::Context;
use crate::color;
use crate::output::{cell, print_json, OutputFormat};
use crate::table::{self, PROGRAM_COLUMNS, TASK_COLUMNS};
use anyhow::Result;
use chrono::NaiveDateTime;
use pm_adapters::{ProcessControl, SystemProcessControl};
use pm_core::{
    format_elapsed, format_frequency, Clock, HealthOutcome, JobStatus, SystemClock,
    STATUS_TIME_FORMAT,
};
use pm_schedule::{hash_matches, ProgramSpec, Schedule, TaskSpec};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct ListReport {
    pub schedule_valid: bool,
    pub programs: Vec<ProgramRow>,
    pub tasks: Vec<TaskRow>,
    /// Schedule entries the loader skipped
    pub rejected: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProgramRow {
    pub name: String,
    pub pid: Option<u32>,
    pub state: &'static str,
    pub uptime: Option<String>,
    pub retries: u32,
    pub disable_restart: bool,
    pub last_checkup: Option<String>,
    pub health: Option<HealthOutcome>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskRow {
    pub name: String,
    pub frequency: Option<String>,
    pub days: String,
    pub start: Option<String>,
    pub last_ran: Option<String>,
    pub last_err: Option<String>,
    pub next_run: Option<String>,
}

pub async fn handle(ctx: &Context, format: OutputFormat) -> Result<()> {
    let schedule = ctx.schedule()?;
    let process = SystemProcessControl::new();
    let report = build_report(ctx, &schedule, SystemClock.now(), &process).await;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print!("{}", render_text(&report, color::should_colorize())),
    }
    Ok(())
}

pub async fn build_report<P: ProcessControl>(
    ctx: &Context,
    schedule: &Schedule,
    now: NaiveDateTime,
    process: &P,
) -> ListReport {
    let schedule_valid = match hash_matches(&ctx.settings.schedule_file) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(error = %e, "cannot compare schedule hash");
            false
        }
    };

    let mut programs = Vec::new();
    for spec in schedule.programs() {
        programs.push(program_row(ctx, spec, now, process).await);
    }
    let tasks = schedule
        .tasks()
        .map(|spec| task_row(spec, &ctx.store.read(&spec.name), now))
        .collect();

    ListReport {
        schedule_valid,
        programs,
        tasks,
        rejected: schedule.rejected.iter().map(ToString::to_string).collect(),
    }
}

async fn program_row<P: ProcessControl>(
    ctx: &Context,
    spec: &ProgramSpec,
    now: NaiveDateTime,
    process: &P,
) -> ProgramRow {
    let status = ctx.store.read(&spec.name);
    let pid = status.recorded_pid();
    let alive = pid.is_some_and(|pid| process.is_alive(pid));

    let (health, error) = match ctx.adapter(spec) {
        Ok(adapter) => match adapter.custom_monitor(pid).await {
            None => (Some(HealthOutcome::from_alive(alive)), None),
            Some(Ok(outcome)) => (Some(outcome), None),
            Some(Err(e)) => (None, Some(e.to_string())),
        },
        Err(e) => (None, Some(e.to_string())),
    };

    let state = if status.disable_restart {
        "disabled"
    } else if alive {
        "running"
    } else {
        "stopped"
    };

    ProgramRow {
        name: spec.name.clone(),
        pid,
        state,
        uptime: alive
            .then(|| status.uptime(now))
            .flatten()
            .map(|d| format_elapsed(d.as_secs())),
        retries: status.num_retries,
        disable_restart: status.disable_restart,
        last_checkup: stamp(status.last_checkup),
        health,
        error,
    }
}

fn task_row(spec: &TaskSpec, status: &JobStatus, now: NaiveDateTime) -> TaskRow {
    TaskRow {
        name: spec.name.clone(),
        frequency: spec.frequency.map(format_frequency),
        days: spec.weekdays.to_string(),
        start: spec.start_time.map(|t| t.format("%H:%M").to_string()),
        last_ran: stamp(status.last_ran),
        last_err: stamp(status.last_err),
        next_run: stamp(spec.timing().map(|timing| timing.next_run(now))),
    }
}

impl ProgramRow {
    fn cells(&self) -> [String; 7] {
        let health = match (&self.error, &self.health) {
            (Some(e), _) => format!("error: {e}"),
            (None, health) => cell(health.as_ref()),
        };
        [
            self.name.clone(),
            cell(self.pid),
            self.state.to_string(),
            cell(self.uptime.as_deref()),
            self.retries.to_string(),
            cell(self.last_checkup.as_deref()),
            health,
        ]
    }
}

impl TaskRow {
    fn cells(&self) -> [String; 7] {
        [
            self.name.clone(),
            cell(self.frequency.as_deref()),
            self.days.clone(),
            cell(self.start.as_deref()),
            cell(self.last_ran.as_deref()),
            cell(self.last_err.as_deref()),
            cell(self.next_run.as_deref()),
        ]
    }
}

fn stamp(at: Option<NaiveDateTime>) -> Option<String> {
    at.map(|at| at.format(STATUS_TIME_FORMAT).to_string())
}

pub fn render_text(report: &ListReport, colorize: bool) -> String {
    let header = |text: &str| {
        if colorize {
            color::apply_header(text)
        } else {
            text.to_string()
        }
    };
    let mut out = Vec::new();

    let valid = report.schedule_valid.to_string();
    let valid = if colorize {
        color::apply_status(&valid)
    } else {
        valid
    };
    let _ = writeln!(out, "{} {}", header("Schedule Valid:"), valid);
    if !report.schedule_valid {
        let _ = writeln!(out, "  schedule changed since the daemon loaded it, run `pm reload`");
    }

    if !report.programs.is_empty() {
        let rows: Vec<_> = report.programs.iter().map(ProgramRow::cells).collect();
        let _ = writeln!(out, "\n{}", header("Programs"));
        let _ = table::render(&mut out, &PROGRAM_COLUMNS, &rows, colorize);
    }

    if !report.tasks.is_empty() {
        let rows: Vec<_> = report.tasks.iter().map(TaskRow::cells).collect();
        let _ = writeln!(out, "\n{}", header("Tasks"));
        let _ = table::render(&mut out, &TASK_COLUMNS, &rows, colorize);
    }

    if !report.rejected.is_empty() {
        let _ = writeln!(out, "\n{}", header("Skipped entries"));
        for rejected in &report.rejected {
            let _ = writeln!(out, "  {rejected}");
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
