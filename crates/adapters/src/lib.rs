// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: processes, programs and notifications

mod env;
pub mod notify;
pub mod process;
pub mod program;

pub use notify::{
    CommandNotifyAdapter, DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter, NotifyError,
    Notifier,
};
pub use process::{
    spawn_detached, terminate_gracefully, ProcessControl, ProcessError, Signal,
    SystemProcessControl,
};
pub use program::{CommandProgram, ProgramAdapter, ProgramError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeProcessControl, SignalCall};
#[cfg(any(test, feature = "test-support"))]
pub use program::{FakeProgramAdapter, ProgramCall};
