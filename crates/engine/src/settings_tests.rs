// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_live_under_state_dir() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from(dir.path(), no_env).unwrap();
    assert_eq!(settings.schedule_file, dir.path().join("schedule.json"));
    assert_eq!(settings.status_dir, dir.path().join("status"));
    assert_eq!(settings.log_dir, dir.path().join("logs"));
    assert_eq!(settings.log_max_bytes, DEFAULT_LOG_MAX_BYTES);
    assert_eq!(settings.stop_grace, Duration::from_secs(10));
    assert_eq!(settings.notify, NotifyKind::None);
    assert_eq!(settings.reload_command, vec!["supervisorctl", "restart", "pmd"]);
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        r#"
schedule_file = "jobs.json"
log_dir = "/var/log/pm"
log_max_bytes = 4096
stop_grace = "30 s"
notify = "command"
notify_command = ["mail-admin"]
reload_command = ["systemctl", "restart", "pmd"]
"#,
    )
    .unwrap();

    let settings = Settings::load_from(dir.path(), no_env).unwrap();
    assert_eq!(settings.schedule_file, dir.path().join("jobs.json"));
    assert_eq!(settings.log_dir, PathBuf::from("/var/log/pm"));
    assert_eq!(settings.log_max_bytes, 4096);
    assert_eq!(settings.stop_grace, Duration::from_secs(30));
    assert_eq!(settings.notify, NotifyKind::Command);
    assert!(matches!(settings.notifier(), Notifier::Command(_)));
    assert_eq!(settings.reload_command[0], "systemctl");
}

#[test]
fn environment_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), "status_dir = \"from-file\"\n").unwrap();

    let settings = Settings::load_from(dir.path(), |key| match key {
        "PM_STATUS_DIR" => Some("/tmp/pm-status".to_string()),
        "PM_SCHEDULE_FILE" => Some("/etc/pm/schedule.json".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(settings.status_dir, PathBuf::from("/tmp/pm-status"));
    assert_eq!(settings.schedule_file, PathBuf::from("/etc/pm/schedule.json"));
}

#[yare::parameterized(
    unknown_key      = { "colour = \"red\"\n" },
    bad_grace        = { "stop_grace = \"soon\"\n" },
    zero_log_cap     = { "log_max_bytes = 0\n" },
    command_no_argv  = { "notify = \"command\"\n" },
    bad_notify_kind  = { "notify = \"pager\"\n" },
)]
fn invalid_config_is_rejected(content: &str) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE), content).unwrap();
    assert!(Settings::load_from(dir.path(), no_env).is_err());
}

#[test]
fn notifier_follows_kind() {
    let mut settings = Settings::with_state_dir("/tmp/pm");
    assert!(matches!(settings.notifier(), Notifier::None(_)));
    settings.notify = NotifyKind::Desktop;
    assert!(matches!(settings.notifier(), Notifier::Desktop(_)));
}
