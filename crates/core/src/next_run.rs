// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Next-run computation for scheduled tasks.
//!
//! A task is eligible on allowed weekdays between its start and stop
//! times. Without a frequency it fires once per eligible day at the start
//! time; with a frequency it fires on every `start + n * frequency` that
//! still falls inside the day's window.

use crate::window::{end_of_day, Weekdays};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::time::Duration;

/// Resolved timing rules for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTiming {
    pub start: NaiveTime,
    pub stop: NaiveTime,
    pub frequency: Option<Duration>,
    pub weekdays: Weekdays,
}

impl TaskTiming {
    /// Daily timing at `start` with no frequency, every day until end of day.
    pub fn daily(start: NaiveTime) -> Self {
        Self {
            start,
            stop: end_of_day(),
            frequency: None,
            weekdays: Weekdays::ALL,
        }
    }

    /// The `[start, stop]` instants for `date`.
    pub fn day_window(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (date.and_time(self.start), date.and_time(self.stop))
    }

    /// First allowed date strictly after `date`.
    fn next_allowed_date(&self, date: NaiveDate) -> NaiveDate {
        let mut candidate = date;
        for _ in 0..7 {
            candidate = match candidate.succ_opt() {
                Some(d) => d,
                None => return date,
            };
            if self.weekdays.contains(candidate.weekday()) {
                return candidate;
            }
        }
        // Only reachable with an empty weekday set
        date.succ_opt().unwrap_or(date)
    }

    /// Compute the next instant strictly after `now` at which the task
    /// should fire.
    pub fn next_run(&self, now: NaiveDateTime) -> NaiveDateTime {
        let mut date = now.date();
        let (mut start, mut end) = self.day_window(date);

        if !self.weekdays.contains(now.weekday()) || now >= end {
            date = self.next_allowed_date(date);
            (start, end) = self.day_window(date);
        }

        if let Some(step) = self.frequency_millis() {
            if start <= now && now < end {
                let elapsed = (now - start).num_milliseconds();
                // floor + 1 rather than ceil: an exact boundary must not replay `now`
                let n = elapsed / step + 1;
                let candidate = start + chrono::Duration::milliseconds(n.saturating_mul(step));
                if candidate <= end {
                    return candidate;
                }
                return self.day_window(self.next_allowed_date(date)).0;
            }
        }

        if now < start {
            return start;
        }

        self.day_window(self.next_allowed_date(date)).0
    }

    fn frequency_millis(&self) -> Option<i64> {
        self.frequency
            .and_then(|f| i64::try_from(f.as_millis()).ok())
            .filter(|ms| *ms > 0)
    }
}

/// Time to wait from `now` until `next`, clamped at zero so a run that is
/// already due fires immediately.
pub fn delay_until(next: NaiveDateTime, now: NaiveDateTime) -> Duration {
    (next - now).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
#[path = "next_run_tests.rs"]
mod tests;
