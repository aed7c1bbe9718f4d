// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time-of-day windows and weekday sets.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use std::fmt;

/// Last second of a day, the default stop time for tasks.
pub const END_OF_DAY: (u32, u32, u32) = (23, 59, 59);

pub fn end_of_day() -> NaiveTime {
    let (h, m, s) = END_OF_DAY;
    NaiveTime::from_hms_opt(h, m, s).unwrap_or(NaiveTime::MIN)
}

/// Inclusive time-of-day range during which a program may run.
///
/// A window whose start is after its end spans midnight
/// (e.g. `22:00`..`02:00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time <= self.end
        } else {
            time >= self.start || time <= self.end
        }
    }

    /// True when no window is configured or `now` falls inside it.
    pub fn within(window: Option<&TimeWindow>, now: NaiveDateTime) -> bool {
        window.map_or(true, |w| w.contains(now.time()))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Set of allowed weekdays, Monday as bit 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Weekdays(u8);

impl Weekdays {
    pub const ALL: Weekdays = Weekdays(0b0111_1111);
    pub const NONE: Weekdays = Weekdays(0);

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_all(self) -> bool {
        self == Self::ALL
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        let mut day = Weekday::Mon;
        (0..7).filter_map(move |_| {
            let current = day;
            day = day.succ();
            self.contains(current).then_some(current)
        })
    }

    /// True if `date_time` falls on an allowed day.
    pub fn allows(self, date_time: NaiveDateTime) -> bool {
        self.contains(date_time.weekday())
    }
}

impl Default for Weekdays {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromIterator<Weekday> for Weekdays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = Weekdays::NONE;
        for day in iter {
            days.insert(day);
        }
        days
    }
}

impl fmt::Debug for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return write!(f, "daily");
        }
        let names: Vec<String> = self
            .iter()
            .map(|d| d.to_string().to_lowercase())
            .collect();
        write!(f, "{}", names.join(","))
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
