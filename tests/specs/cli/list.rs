//! `pm list` specs

use crate::prelude::*;

#[test]
fn list_shows_programs_and_tasks() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    temp.pm()
        .args(&["list"])
        .passes()
        .stdout_has("Schedule Valid: false")
        .stdout_has("Programs\nNAME")
        .stdout_has("Tasks\nNAME")
        .stdout_has("backup")
        .stdout_has("mon,wed")
        .stdout_has("02:00")
        .stdout_lacks("Skipped entries");
}

#[test]
fn never_started_program_needs_restart() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    let out = temp.pm().args(&["list", "-o", "json"]).passes().json();

    let web = &out["programs"][0];
    assert_eq!(web["name"], "web");
    assert_eq!(web["state"], "stopped");
    assert_eq!(web["health"], "needs_restart");
    assert!(web["pid"].is_null());
}

#[test]
fn json_lists_rejected_entries() {
    let temp = Project::with_schedule(
        r#"{"schedules": [
            {"type": "task", "name": "ok", "entry_point": "true"},
            {"type": "task", "name": "ok", "entry_point": "false"},
            {"type": "gadget", "name": "odd"}
        ]}"#,
    );
    let out = temp.pm().args(&["list", "-o", "json"]).passes().json();

    assert_eq!(out["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(out["rejected"].as_array().unwrap().len(), 2);
    assert!(out["programs"].as_array().unwrap().is_empty());
}

#[test]
fn unknown_handler_shows_row_error() {
    let temp = Project::with_schedule(
        r#"{"schedules": [{"type": "program", "name": "nas", "handler": "NasProgram"}]}"#,
    );
    temp.pm()
        .args(&["list"])
        .passes()
        .stdout_has("error: unknown handler 'NasProgram'");
}
