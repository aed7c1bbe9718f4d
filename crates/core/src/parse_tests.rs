// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    spaced_seconds = { "30 s",      30 },
    spaced_minutes = { "5 m",       300 },
    spaced_hours   = { "1 h",       3600 },
    compact_sec    = { "30s",       30 },
    compact_min    = { "15m",       900 },
    compact_hour   = { "2h",        7200 },
    word_minutes   = { "10 minutes", 600 },
    word_hour      = { "1 hour",    3600 },
    upper_unit     = { "5 M",       300 },
    bare_number    = { "45",        45 },
    padded         = { "  5 m  ",   300 },
)]
fn frequency_valid(input: &str, secs: u64) {
    assert_eq!(parse_frequency(input).unwrap(), Duration::from_secs(secs));
}

#[yare::parameterized(
    empty        = { "" },
    blank        = { "   " },
    no_number    = { "m" },
    unknown_unit = { "5 fortnights" },
    negative     = { "-5 m" },
    fractional   = { "1.5 h" },
    words        = { "every hour" },
)]
fn frequency_invalid(input: &str) {
    assert!(parse_frequency(input).is_err(), "{input:?} should not parse");
}

#[test]
fn frequency_zero_is_rejected() {
    assert_eq!(
        parse_frequency("0 m"),
        Err(ParseError::ZeroFrequency("0 m".to_string()))
    );
}

#[test]
fn frequency_overflow_is_rejected() {
    assert!(parse_frequency("18446744073709551615 h").is_err());
}

#[yare::parameterized(
    twenty_four_hour = { "09:00",       9,  0,  0 },
    late_evening     = { "21:30",       21, 30, 0 },
    with_seconds     = { "23:59:59",    23, 59, 59 },
    single_digit     = { "9:05",        9,  5,  0 },
    morning_spaced   = { "9:00 am",     9,  0,  0 },
    evening_spaced   = { "9:30 pm",     21, 30, 0 },
    compact_pm       = { "9:30pm",      21, 30, 0 },
    bare_hour_am     = { "7 am",        7,  0,  0 },
    noon             = { "12:00 pm",    12, 0,  0 },
    midnight         = { "12:00 am",    0,  0,  0 },
    upper_meridiem   = { "8:15 PM",     20, 15, 0 },
    zone_label       = { "9:00 am pst", 9,  0,  0 },
    zone_label_24h   = { "16:00 utc",   16, 0,  0 },
)]
fn time_valid(input: &str, h: u32, m: u32, s: u32) {
    assert_eq!(
        parse_time_of_day(input).unwrap(),
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    );
}

#[yare::parameterized(
    empty          = { "" },
    bare_hour      = { "9" },
    hour_overflow  = { "24:00" },
    minute_overflow = { "10:60" },
    pm_overflow    = { "13:00 pm" },
    zero_am        = { "0:30 am" },
    garbage        = { "noon" },
    too_many_parts = { "1:2:3:4" },
    long_field     = { "009:00" },
    extra_tokens   = { "9 00 am pst" },
)]
fn time_invalid(input: &str) {
    assert!(parse_time_of_day(input).is_err(), "{input:?} should not parse");
}

#[yare::parameterized(
    short      = { "mon",      Weekday::Mon },
    full       = { "friday",   Weekday::Fri },
    mixed_case = { "Sun",      Weekday::Sun },
    padded     = { " tue ",    Weekday::Tue },
)]
fn weekday_valid(input: &str, expected: Weekday) {
    assert_eq!(parse_weekday(input).unwrap(), expected);
}

#[test]
fn weekday_invalid() {
    assert_eq!(
        parse_weekday("funday"),
        Err(ParseError::InvalidWeekday("funday".to_string()))
    );
}
