// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::NaiveDate;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 4)
        .unwrap()
        .and_time(t(h, m))
}

#[yare::parameterized(
    before_start = { 8, 59,  false },
    at_start     = { 9, 0,   true },
    middle       = { 12, 30, true },
    at_end       = { 17, 0,  true },
    after_end    = { 17, 1,  false },
)]
fn daytime_window(h: u32, m: u32, inside: bool) {
    let window = TimeWindow::new(t(9, 0), t(17, 0));
    assert_eq!(window.contains(t(h, m)), inside);
}

#[yare::parameterized(
    late_evening  = { 23, 0, true },
    after_midnight = { 1, 30, true },
    midday        = { 12, 0, false },
)]
fn overnight_window(h: u32, m: u32, inside: bool) {
    let window = TimeWindow::new(t(22, 0), t(2, 0));
    assert_eq!(window.contains(t(h, m)), inside);
}

#[test]
fn no_window_is_always_within() {
    assert!(TimeWindow::within(None, at(3, 0)));
}

#[test]
fn within_checks_time_of_day() {
    let window = TimeWindow::new(t(9, 0), t(17, 0));
    assert!(TimeWindow::within(Some(&window), at(10, 0)));
    assert!(!TimeWindow::within(Some(&window), at(18, 0)));
}

#[test]
fn weekdays_collect_and_display() {
    let days: Weekdays = [Weekday::Fri, Weekday::Mon].into_iter().collect();
    assert!(days.contains(Weekday::Mon));
    assert!(!days.contains(Weekday::Tue));
    assert_eq!(days.to_string(), "mon,fri");
    assert_eq!(Weekdays::ALL.to_string(), "daily");
}

#[test]
fn weekdays_default_is_all() {
    let days = Weekdays::default();
    assert_eq!(days.iter().count(), 7);
    assert!(days.is_all());
    assert!(Weekdays::NONE.is_empty());
}

#[test]
fn end_of_day_is_last_second() {
    assert_eq!(end_of_day(), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
}
