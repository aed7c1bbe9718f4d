// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Liveness poll interval while waiting for a stopped process to exit
/// (default: 100ms).
pub fn terminate_poll_ms() -> Duration {
    parse_duration_ms("PM_TERMINATE_POLL_MS").unwrap_or(Duration::from_millis(100))
}
