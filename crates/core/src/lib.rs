// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pm-core: domain types for the pm process supervisor and task scheduler

pub mod clock;
pub mod health;
pub mod next_run;
pub mod parse;
pub mod status;
pub mod time_fmt;
pub mod window;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use health::{HealthOutcome, ProgramState};
pub use next_run::{delay_until, TaskTiming};
pub use parse::{
    parse_frequency, parse_time_of_day, parse_weekday, ParseError, DEFAULT_FREQUENCY,
};
pub use status::{JobStatus, RunState, STATUS_TIME_FORMAT};
pub use time_fmt::{format_elapsed, format_frequency, format_timestamp};
pub use window::{end_of_day, TimeWindow, Weekdays};
