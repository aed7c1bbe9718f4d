// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Flat-file persistence: per-job status documents and size-capped logs.

mod atomic;
mod log;
mod status;

pub use atomic::write_atomic;
pub use log::{open_capped_log, truncate_head, DEFAULT_LOG_MAX_BYTES};
pub use status::{StatusError, StatusStore};
