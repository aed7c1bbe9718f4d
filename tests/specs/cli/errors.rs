//! CLI error handling specs
//!
//! Verify error messages and exit codes for bad input.

use crate::prelude::*;

#[test]
fn missing_schedule_names_the_file() {
    let temp = Project::empty();
    temp.pm()
        .args(&["list"])
        .fails()
        .stderr_has("cannot load schedule")
        .stderr_has("schedule.json");
}

#[test]
fn malformed_schedule_is_reported() {
    let temp = Project::with_schedule("{ not json");
    temp.pm()
        .args(&["list"])
        .fails()
        .stderr_has("invalid schedule document");
}

#[test]
fn unknown_program_is_an_error() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    temp.pm()
        .args(&["stop", "ghost"])
        .fails()
        .stderr_eq("Error: no program named 'ghost' in the schedule\n");
    assert!(temp.status("ghost").is_null());
}

#[test]
fn tasks_and_programs_are_not_interchangeable() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    temp.pm()
        .args(&["start", "backup"])
        .fails()
        .stderr_has("'backup' is a task, not a program");
    temp.pm()
        .args(&["run", "web"])
        .fails()
        .stderr_has("'web' is a program, not a task");
}

#[test]
fn invalid_config_is_reported() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    temp.file("config.toml", "log_max_bytes = 0\n");
    temp.pm()
        .args(&["list"])
        .fails()
        .stderr_has("invalid log_max_bytes '0'");
}
