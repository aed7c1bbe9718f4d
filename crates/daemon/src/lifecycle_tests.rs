// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fs2::FileExt;
use pm_schedule::read_hash;
use std::path::Path;
use tempfile::tempdir;

const SCHEDULE: &str = r#"{
    "schedules": [
        {"type": "program", "name": "web", "handler": "command", "command": "sleep 600"},
        {"type": "program", "name": "nas", "handler": "NasProgram"},
        {"type": "task", "name": "nightly", "entry_point": "true", "start": "23:00"}
    ]
}"#;

fn test_config(dir: &Path) -> Config {
    Config::from_settings(Settings::with_state_dir(dir))
}

#[test]
fn config_paths_live_under_state_dir() {
    let config = test_config(Path::new("/state"));
    assert_eq!(config.lock_path, Path::new("/state/pmd.pid"));
    assert_eq!(config.log_path, Path::new("/state/logs/pmd.log"));
}

#[test]
fn startup_takes_lock_and_writes_schedule_hash() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::write(&config.settings.schedule_file, SCHEDULE).unwrap();

    let mut daemon = startup(&config).unwrap();

    let pid = std::fs::read_to_string(&config.lock_path).unwrap();
    assert_eq!(pid.trim(), std::process::id().to_string());
    assert!(read_hash(&config.settings.schedule_file).is_some());
    assert!(config.settings.status_dir.is_dir());

    // The unknown handler is skipped, the rest load
    assert_eq!(daemon.orchestrator.program_names(), ["web"]);
    assert_eq!(daemon.orchestrator.tasks().len(), 1);

    daemon.shutdown();
    assert!(!config.lock_path.exists());
}

#[test]
fn missing_schedule_fails_and_releases_pid_file() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    let err = startup(&config).err().unwrap();
    assert!(matches!(err, LifecycleError::Schedule(ConfigError::Read { .. })));
    assert!(!config.lock_path.exists());
}

#[test]
fn startup_lock_failed_does_not_remove_pid_file() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::write(&config.settings.schedule_file, SCHEDULE).unwrap();

    // Hold an exclusive lock (simulating the running daemon)
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)
        .unwrap();
    lock_file.lock_exclusive().unwrap();
    std::fs::write(&config.lock_path, b"12345").unwrap();

    let err = startup(&config).err().unwrap();
    assert!(matches!(err, LifecycleError::LockFailed(_)));
    assert_eq!(std::fs::read_to_string(&config.lock_path).unwrap(), "12345");
    assert!(read_hash(&config.settings.schedule_file).is_none());
}
