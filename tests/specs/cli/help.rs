//! CLI help specs

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: pm")
        .stdout_has("list")
        .stdout_has("reload");
}

#[test]
fn help_lists_every_command() {
    let out = cli().args(&["--help"]).passes().stdout();
    for command in ["list", "stop", "start", "run", "reload"] {
        assert!(out.contains(command), "missing {command} in help:\n{out}");
    }
}

#[test]
fn version_flag_prints_version() {
    cli().args(&["--version"]).passes().stdout_has("pm ");
}
