//! Daemon lifecycle specs
//!
//! Startup, single-instance locking and clean shutdown.

use crate::prelude::*;

const IDLE_SCHEDULE: &str = r#"{
    "schedules": [
        {"type": "task", "name": "nightly", "entry_point": "true", "start": "03:00"}
    ]
}"#;

#[test]
fn missing_schedule_is_fatal() {
    let temp = Project::empty();
    let out = temp.daemon().wait();

    assert!(!out.status.success());
    assert!(!temp.path().join("pmd.pid").exists());
    assert!(
        temp.daemon_log().contains("Failed to start daemon"),
        "{}",
        temp.daemon_log()
    );
}

#[test]
fn startup_marks_schedule_valid() {
    let temp = Project::with_schedule(IDLE_SCHEDULE);
    let daemon = temp.daemon();

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || temp.daemon_log().contains("Daemon ready")),
        "daemon never became ready:\n{}",
        temp.daemon_log()
    );
    let pid = std::fs::read_to_string(temp.path().join("pmd.pid")).unwrap();
    assert_eq!(pid.trim(), daemon.pid().to_string());

    temp.pm()
        .args(&["list"])
        .passes()
        .stdout_has("Schedule Valid: true");

    // Editing the schedule invalidates it until the daemon reloads
    temp.file(
        "schedule.json",
        &IDLE_SCHEDULE.replace("03:00", "04:00"),
    );
    temp.pm()
        .args(&["list"])
        .passes()
        .stdout_has("Schedule Valid: false");
}

#[test]
fn second_daemon_refuses_to_start() {
    let temp = Project::with_schedule(IDLE_SCHEDULE);
    let _first = temp.daemon();
    assert!(wait_for(SPEC_WAIT_MAX_MS, || temp
        .daemon_log()
        .contains("Daemon ready")));

    let out = temp.daemon().wait();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("pmd is already running"));
    assert!(temp.path().join("pmd.pid").exists());
}

#[test]
fn sigterm_removes_pid_file() {
    let temp = Project::with_schedule(IDLE_SCHEDULE);
    let daemon = temp.daemon();
    assert!(wait_for(SPEC_WAIT_MAX_MS, || temp
        .daemon_log()
        .contains("Daemon ready")));

    let status = daemon.terminate();
    assert!(status.success(), "{status:?}\n{}", temp.daemon_log());
    assert!(!temp.path().join("pmd.pid").exists());
    assert!(temp.daemon_log().contains("Daemon stopped"));
}
