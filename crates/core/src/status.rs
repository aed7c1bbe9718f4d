// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted per-job runtime state.
//!
//! One document per job name. Programs use the process fields, tasks use
//! `last_ran` / `last_err`. Documents are always replaced whole.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Timestamp format used in status documents.
pub const STATUS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether the supervisor believes the program is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Running,
    Stopped,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running => f.write_str("running"),
            RunState::Stopped => f.write_str("stopped"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobStatus {
    /// 0 when no process is recorded
    #[serde(skip_serializing_if = "is_zero")]
    pub pid: u32,
    #[serde(with = "stamp", skip_serializing_if = "Option::is_none")]
    pub time_started: Option<NaiveDateTime>,
    #[serde(with = "stamp", skip_serializing_if = "Option::is_none")]
    pub last_checkup: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "is_zero")]
    pub num_retries: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_restart: bool,
    #[serde(rename = "status", skip_serializing_if = "Option::is_none")]
    pub run_state: Option<RunState>,
    #[serde(
        alias = "last-ran",
        with = "stamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_ran: Option<NaiveDateTime>,
    #[serde(
        alias = "last-err",
        with = "stamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_err: Option<NaiveDateTime>,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl JobStatus {
    /// Fresh document for a program that was just launched.
    ///
    /// Only the operator-owned `disable_restart` flag survives from the
    /// previous document.
    pub fn started(pid: u32, now: NaiveDateTime, num_retries: u32, disable_restart: bool) -> Self {
        Self {
            pid,
            time_started: Some(now),
            num_retries,
            disable_restart,
            run_state: Some(RunState::Running),
            ..Self::default()
        }
    }

    /// Fresh document for a program that was just stopped.
    pub fn stopped(num_retries: u32, disable_restart: bool) -> Self {
        Self {
            num_retries,
            disable_restart,
            run_state: Some(RunState::Stopped),
            ..Self::default()
        }
    }

    /// Recorded pid, if any.
    pub fn recorded_pid(&self) -> Option<u32> {
        (self.pid != 0).then_some(self.pid)
    }

    pub fn is_running(&self) -> bool {
        self.run_state == Some(RunState::Running) && self.pid != 0
    }

    /// Time since the recorded start, if running.
    pub fn uptime(&self, now: NaiveDateTime) -> Option<Duration> {
        if !self.is_running() {
            return None;
        }
        self.time_started
            .and_then(|started| (now - started).to_std().ok())
    }

    /// Record the end of a task run.
    ///
    /// Fields never move backwards, so an older run finishing late cannot
    /// overwrite a newer timestamp.
    pub fn record_run(&mut self, success: bool, at: NaiveDateTime) {
        let slot = if success {
            &mut self.last_ran
        } else {
            &mut self.last_err
        };
        *slot = Some(slot.map_or(at, |prev| prev.max(at)));
    }
}

/// Serde adapter for optional timestamps in [`STATUS_TIME_FORMAT`].
///
/// Also accepts ISO-8601 (`T` separator, optional fraction) on read.
mod stamp {
    use super::STATUS_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.collect_str(&t.format(STATUS_TIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDateTime::parse_from_str(raw, STATUS_TIME_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
