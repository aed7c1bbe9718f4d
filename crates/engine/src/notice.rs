// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator notifications raised by the program supervisor.

use chrono::NaiveDateTime;
use pm_core::STATUS_TIME_FORMAT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Program is down and will not be restarted (`keep_alive = false`)
    Down,
    /// Program came back after an outage
    Recovered,
    /// Program was down and has been restarted
    Restart { attempt: u32, max_retries: u32 },
    /// Retries exhausted, supervision stopped
    Failure { retries: u32 },
}

impl Notice {
    pub fn title(&self, program: &str) -> String {
        match self {
            Notice::Down => format!("pm: {program} down"),
            Notice::Recovered => format!("pm: {program} recovered"),
            Notice::Restart { .. } => format!("pm: {program} restarted"),
            Notice::Failure { .. } => format!("pm: {program} failed"),
        }
    }

    pub fn message(&self, program: &str, at: NaiveDateTime) -> String {
        let at = at.format(STATUS_TIME_FORMAT);
        match self {
            Notice::Down => {
                format!("{program} is not running at {at}; keep_alive is off, not restarting")
            }
            Notice::Recovered => format!("{program} is healthy again at {at}"),
            Notice::Restart {
                attempt,
                max_retries,
            } => format!("{program} was down at {at}; restart attempt {attempt} of {max_retries}"),
            Notice::Failure { retries } => format!(
                "{program} could not be kept running after {retries} restart attempts; gave up at {at}"
            ),
        }
    }
}

#[cfg(test)]
#[path = "notice_tests.rs"]
mod tests;
