// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsers for the human-authored strings in a schedule document:
//! run frequencies (`"5 m"`, `"30s"`), times of day (`"09:30"`,
//! `"9:30 pm"`), and weekday names (`"mon"`, `"Friday"`).

use chrono::{NaiveTime, Weekday};
use std::time::Duration;
use thiserror::Error;

/// Frequency substituted when a frequency string cannot be parsed
pub const DEFAULT_FREQUENCY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty {0} string")]
    Empty(&'static str),
    #[error("invalid frequency '{0}'")]
    InvalidFrequency(String),
    #[error("frequency must be greater than zero: '{0}'")]
    ZeroFrequency(String),
    #[error("invalid time of day '{0}'")]
    InvalidTime(String),
    #[error("unknown weekday '{0}'")]
    InvalidWeekday(String),
}

/// Parse a frequency like `"5 m"`, `"30s"` or `"1 hour"` into a duration.
///
/// A bare number is read as seconds. Zero is rejected because a zero
/// period can never advance a schedule.
pub fn parse_frequency(s: &str) -> Result<Duration, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::Empty("frequency"));
    }

    let (num_str, suffix) = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| (&s[..i], &s[i..]))
        .unwrap_or((s, ""));

    let num: u64 = num_str
        .parse()
        .map_err(|_| ParseError::InvalidFrequency(s.to_string()))?;

    let multiplier: u64 = match suffix.trim().to_ascii_lowercase().as_str() {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3600,
        _ => return Err(ParseError::InvalidFrequency(s.to_string())),
    };

    if num == 0 {
        return Err(ParseError::ZeroFrequency(s.to_string()));
    }

    num.checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(|| ParseError::InvalidFrequency(s.to_string()))
}

#[derive(Clone, Copy)]
enum Meridiem {
    Am,
    Pm,
}

/// Parse a time of day in 24-hour (`"21:30"`, `"21:30:15"`) or 12-hour
/// (`"9:30 pm"`, `"9pm"`) form. A trailing zone label such as `"pst"` is
/// accepted and ignored; times are always interpreted in local time.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, ParseError> {
    let invalid = || ParseError::InvalidTime(s.to_string());

    let lower = s.trim().to_ascii_lowercase();
    if lower.is_empty() {
        return Err(ParseError::Empty("time"));
    }

    let mut tokens: Vec<&str> = lower.split_whitespace().collect();
    if tokens.len() > 1 {
        if let Some(last) = tokens.last() {
            let is_label = last.chars().all(|c| c.is_ascii_alphabetic());
            if is_label && !matches!(*last, "am" | "pm") {
                tokens.pop();
            }
        }
    }
    if tokens.len() > 2 {
        return Err(invalid());
    }
    let joined = tokens.concat();

    let (clock, meridiem) = if let Some(rest) = joined.strip_suffix("am") {
        (rest, Some(Meridiem::Am))
    } else if let Some(rest) = joined.strip_suffix("pm") {
        (rest, Some(Meridiem::Pm))
    } else {
        (joined.as_str(), None)
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.is_empty()
        || parts.len() > 3
        || parts
            .iter()
            .any(|p| p.is_empty() || p.len() > 2 || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(invalid());
    }
    // A bare hour is ambiguous without am/pm
    if parts.len() == 1 && meridiem.is_none() {
        return Err(invalid());
    }

    let field = |i: usize| -> Result<u32, ParseError> {
        match parts.get(i) {
            Some(p) => p.parse().map_err(|_| invalid()),
            None => Ok(0),
        }
    };
    let mut hour = field(0)?;
    let minute = field(1)?;
    let second = field(2)?;

    if let Some(meridiem) = meridiem {
        if !(1..=12).contains(&hour) {
            return Err(invalid());
        }
        hour = match (meridiem, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        };
    }

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

/// Parse a weekday name: three-letter (`"mon"`) or full (`"monday"`), any case.
pub fn parse_weekday(s: &str) -> Result<Weekday, ParseError> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| ParseError::InvalidWeekday(s.to_string()))
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
