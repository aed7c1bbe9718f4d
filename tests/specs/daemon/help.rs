//! pmd help specs

use crate::prelude::*;
use std::process::Command;

#[test]
fn help_flag_prints_usage() {
    let out = Command::new(pmd_binary()).arg("--help").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("USAGE:"), "{stdout}");
    assert!(stdout.contains("pm reload"), "{stdout}");
}

#[test]
fn unexpected_argument_fails() {
    let out = Command::new(pmd_binary()).arg("start").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unexpected argument 'start'"));
}
