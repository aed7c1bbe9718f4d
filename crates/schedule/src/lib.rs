// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Schedule document loading and definition

mod document;
mod error;
mod hash;
mod job;

pub use document::{load_schedule, parse_schedule, Schedule};
pub use error::ConfigError;
pub use hash::{canonical_json, hash_file_path, hash_matches, read_hash, schedule_hash, write_hash};
pub use job::{JobKind, JobSpec, ProgramSpec, TaskSpec, DEFAULT_CHECK_INTERVAL};
