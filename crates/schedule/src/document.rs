// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule document parsing.
//!
//! The document is a JSON object with a `schedules` array. Each entry is
//! decoded on its own so a malformed entry is reported and skipped while
//! the remaining jobs still load.

use crate::error::ConfigError;
use crate::hash::schedule_hash;
use crate::job::{JobSpec, ProgramSpec, RawJob, TaskSpec};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// A loaded schedule document
#[derive(Debug, Default)]
pub struct Schedule {
    pub jobs: Vec<JobSpec>,
    /// Entries that were skipped, in document order
    pub rejected: Vec<ConfigError>,
    /// Canonical hash of the `schedules` array
    pub hash: String,
}

impl Schedule {
    pub fn programs(&self) -> impl Iterator<Item = &ProgramSpec> {
        self.jobs.iter().filter_map(|job| match job {
            JobSpec::Program(p) => Some(p),
            JobSpec::Task(_) => None,
        })
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskSpec> {
        self.jobs.iter().filter_map(|job| match job {
            JobSpec::Task(t) => Some(t),
            JobSpec::Program(_) => None,
        })
    }

    pub fn get(&self, name: &str) -> Option<&JobSpec> {
        self.jobs.iter().find(|job| job.name() == name)
    }
}

/// Read and parse the schedule document at `path`.
pub fn load_schedule(path: &Path) -> Result<Schedule, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schedule(&content)
}

/// Parse a schedule document from JSON text.
pub fn parse_schedule(content: &str) -> Result<Schedule, ConfigError> {
    let document: Value = serde_json::from_str(content)?;
    let entries = document
        .get("schedules")
        .and_then(Value::as_array)
        .ok_or(ConfigError::MissingSchedules)?;

    let mut schedule = Schedule {
        hash: schedule_hash(entries),
        ..Schedule::default()
    };
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let raw: RawJob = match serde_json::from_value(entry.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                let err = ConfigError::Entry {
                    index,
                    name: entry
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    message: e.to_string(),
                };
                tracing::error!(error = %err, "skipping schedule entry");
                schedule.rejected.push(err);
                continue;
            }
        };

        if !seen.insert(raw.name().to_string()) {
            let err = ConfigError::DuplicateName(raw.name().to_string());
            tracing::error!(error = %err, "skipping schedule entry");
            schedule.rejected.push(err);
            continue;
        }

        schedule.jobs.push(raw.resolve());
    }

    warn_unknown_dependents(&schedule);
    Ok(schedule)
}

fn warn_unknown_dependents(schedule: &Schedule) {
    let tasks: HashSet<&str> = schedule.tasks().map(|t| t.name.as_str()).collect();
    for task in schedule.tasks() {
        for dependent in &task.run_on_complete {
            if !tasks.contains(dependent.as_str()) {
                tracing::warn!(
                    task = %task.name,
                    dependent = %dependent,
                    "run_on_complete names an unknown task"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
