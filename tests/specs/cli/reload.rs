//! `pm reload` specs

use crate::prelude::*;

#[test]
fn reload_runs_configured_command() {
    let temp = Project::empty();
    temp.file(
        "config.toml",
        &format!(
            "reload_command = [\"touch\", \"{}\"]\n",
            temp.path().join("reloaded").display()
        ),
    );
    temp.pm()
        .args(&["reload"])
        .passes()
        .stdout_eq("Reload requested\n");
    assert!(temp.path().join("reloaded").exists());
}

#[test]
fn failing_reload_command_fails() {
    let temp = Project::empty();
    temp.file("config.toml", "reload_command = [\"false\"]\n");
    temp.pm()
        .args(&["reload"])
        .fails()
        .stderr_has("'false' failed");
}

#[test]
fn empty_reload_command_is_an_error() {
    let temp = Project::empty();
    temp.file("config.toml", "reload_command = []\n");
    temp.pm()
        .args(&["reload"])
        .fails()
        .stderr_eq("Error: reload_command is empty\n");
}
