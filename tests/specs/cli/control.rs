//! `pm stop` / `pm start` specs

use crate::prelude::*;

#[test]
fn stop_disables_restarts() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    temp.pm()
        .args(&["stop", "web"])
        .passes()
        .stdout_eq("Stopped web (restarts disabled)\n");

    assert_eq!(temp.status("web")["disable_restart"], true);
    temp.pm()
        .args(&["list"])
        .passes()
        .stdout_has("disabled");
}

#[test]
fn start_launches_and_reenables() {
    let temp = Project::with_schedule(BASIC_SCHEDULE);
    temp.pm().args(&["stop", "web"]).passes();

    let out = temp.pm().args(&["start", "web", "-o", "json"]).passes().json();
    let pid = out["pid"].as_u64().unwrap();
    assert_eq!(out["disable_restart"], false);

    let status = temp.status("web");
    assert_eq!(status["pid"].as_u64(), Some(pid));
    assert!(status.get("disable_restart").is_none(), "{status}");

    let list = temp.pm().args(&["list", "-o", "json"]).passes().json();
    assert_eq!(list["programs"][0]["state"], "running");
    assert_eq!(list["programs"][0]["health"], "healthy");

    temp.pm().args(&["stop", "web"]).passes();
    assert!(temp.status("web").get("pid").is_none());
    kill_group(pid);
}
