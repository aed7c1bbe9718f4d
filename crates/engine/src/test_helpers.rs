// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{RuntimeDeps, Settings};
use chrono::{NaiveDate, NaiveDateTime};
use pm_adapters::{FakeNotifyAdapter, FakeProcessControl};
use pm_core::{end_of_day, FakeClock, Weekdays};
use pm_schedule::{ProgramSpec, TaskSpec};
use pm_storage::StatusStore;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub(crate) type TestDeps = RuntimeDeps<FakeClock, FakeProcessControl, FakeNotifyAdapter>;

/// 2026-03-02 is a Monday
pub(crate) fn monday(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

pub(crate) fn program_spec(name: &str) -> ProgramSpec {
    ProgramSpec {
        name: name.to_string(),
        handler: "fake".to_string(),
        keep_alive: true,
        check_interval: Duration::from_secs(60),
        max_retries: 3,
        run_on_start: false,
        window: None,
        command: None,
        cwd: None,
        stop_grace: None,
    }
}

pub(crate) fn task_spec(name: &str, entry_point: &str) -> TaskSpec {
    TaskSpec {
        name: name.to_string(),
        entry_point: entry_point.to_string(),
        start_time: None,
        stop_time: end_of_day(),
        frequency: None,
        weekdays: Weekdays::ALL,
        run_on_complete: Vec::new(),
        cwd: None,
    }
}

/// Fakes plus a temp state dir
pub(crate) struct Harness {
    pub dir: TempDir,
    pub clock: FakeClock,
    pub process: FakeProcessControl,
    pub notifier: FakeNotifyAdapter,
    pub deps: TestDeps,
}

impl Harness {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::with_state_dir(dir.path());
        let clock = FakeClock::at(monday(9, 0));
        let process = FakeProcessControl::new();
        let notifier = FakeNotifyAdapter::new();
        let deps = RuntimeDeps {
            clock: clock.clone(),
            process: process.clone(),
            notifier: notifier.clone(),
            store: StatusStore::new(&settings.status_dir),
            settings: Arc::new(settings),
        };
        Self {
            dir,
            clock,
            process,
            notifier,
            deps,
        }
    }

    pub fn store(&self) -> &StatusStore {
        &self.deps.store
    }
}
