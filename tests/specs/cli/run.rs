//! `pm run` specs

use crate::prelude::*;

#[test]
fn run_records_success() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    temp.pm()
        .args(&["run", "backup"])
        .passes()
        .stdout_has("backup finished at");

    let status = temp.status("backup");
    assert!(status["last_ran"].is_string(), "{status}");
    assert!(status.get("last_err").is_none(), "{status}");

    let log = std::fs::read_to_string(temp.path().join("logs/backup.log")).unwrap();
    assert!(log.contains("backed up"));
}

#[test]
fn run_does_not_trigger_dependents() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    temp.pm().args(&["run", "backup"]).passes();
    assert!(temp.status("report").is_null());
}

#[test]
fn run_passes_exit_code_through() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    let out = temp.pm().args(&["run", "report"]).fails();

    assert_eq!(out.code(), Some(3));
    // Exit-code passthrough prints no error line
    out.stdout_has("report failed with exit code 3")
        .stderr_lacks("Error:");
    assert!(temp.status("report")["last_err"].is_string());
}

#[test]
fn run_json_output() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    let out = temp.pm().args(&["run", "report", "-o", "json"]).fails().json();

    assert_eq!(out["name"], "report");
    assert_eq!(out["success"], false);
    assert_eq!(out["exit_code"], 3);
}
