// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable durations and timestamps for status output.

use crate::status::STATUS_TIME_FORMAT;
use chrono::NaiveDateTime;
use std::time::Duration;

/// Format seconds as a short duration: `"5s"`, `"2m"`, `"1h30m"`, `"3d"`.
///
/// Minutes are shown alongside hours when non-zero.
pub fn format_elapsed(secs: u64) -> String {
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3599 => format!("{}m", secs / 60),
        3600..=86_399 => {
            let (h, m) = (secs / 3600, (secs % 3600) / 60);
            if m > 0 {
                format!("{h}h{m}m")
            } else {
                format!("{h}h")
            }
        }
        _ => format!("{}d", secs / 86_400),
    }
}

/// Format a frequency the way it is written in schedule documents,
/// e.g. `"30 s"`, `"5 m"`, `"1 h"`.
pub fn format_frequency(freq: Duration) -> String {
    let secs = freq.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        format!("{} h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{} m", secs / 60)
    } else {
        format!("{secs} s")
    }
}

/// Optional timestamp in status format, `"-"` when absent.
pub fn format_timestamp(at: Option<NaiveDateTime>) -> String {
    at.map_or_else(|| "-".to_string(), |t| t.format(STATUS_TIME_FORMAT).to_string())
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
