//! Program supervision specs
//!
//! Exercise the monitor loop end to end with real processes.

use crate::prelude::*;

fn recorded_pid(temp: &Project, name: &str) -> Option<u64> {
    temp.status(name).get("pid").and_then(|p| p.as_u64())
}

#[test]
fn run_on_start_program_is_launched() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    let _daemon = temp.daemon();

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || recorded_pid(&temp, "web").is_some()),
        "web never started:\n{}",
        temp.daemon_log()
    );
    let list = temp.pm().args(&["list", "-o", "json"]).passes().json();
    assert_eq!(list["programs"][0]["state"], "running");

    if let Some(pid) = recorded_pid(&temp, "web") {
        kill_group(pid);
    }
}

#[test]
fn dead_program_is_restarted() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    let _daemon = temp.daemon();
    assert!(wait_for(SPEC_WAIT_MAX_MS, || recorded_pid(&temp, "web").is_some()));
    let first = recorded_pid(&temp, "web").unwrap();

    kill_group(first);
    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || recorded_pid(&temp, "web")
            .is_some_and(|pid| pid != first)),
        "web was not restarted:\n{}",
        temp.daemon_log()
    );
    assert_eq!(temp.status("web")["num_retries"], 1);

    if let Some(pid) = recorded_pid(&temp, "web") {
        kill_group(pid);
    }
}

#[test]
fn stopped_program_stays_down() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    let _daemon = temp.daemon();
    assert!(wait_for(SPEC_WAIT_MAX_MS, || recorded_pid(&temp, "web").is_some()));

    temp.pm().args(&["stop", "web"]).passes();

    // Two check intervals pass without a restart
    std::thread::sleep(std::time::Duration::from_millis(2500));
    assert_eq!(recorded_pid(&temp, "web"), None);
    assert_eq!(temp.status("web")["disable_restart"], true);
    assert!(temp.status("web")["last_checkup"].is_string());
}
