// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock abstraction.
//!
//! Schedules are expressed in local time-of-day, so the clock hands out
//! local naive date-times rather than monotonic instants.

use chrono::{Local, NaiveDateTime};

/// Source of the current local date-time
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the host's local time zone
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use chrono::NaiveDateTime;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    /// Manually driven clock for tests
    #[derive(Clone, Debug)]
    pub struct FakeClock {
        now: Arc<Mutex<NaiveDateTime>>,
    }

    impl FakeClock {
        pub fn at(now: NaiveDateTime) -> Self {
            Self {
                now: Arc::new(Mutex::new(now)),
            }
        }

        pub fn set(&self, now: NaiveDateTime) {
            *self.now.lock() = now;
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock();
            *now += chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> NaiveDateTime {
            *self.now.lock()
        }
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
