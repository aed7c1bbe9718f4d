// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pm_adapters::{ProcessControl, SystemProcessControl};
use pm_core::JobStatus;
use pm_engine::Settings;

const SCHEDULE: &str = r#"{
    "schedules": [
        {"type": "program", "name": "web", "handler": "command", "command": "sleep 30",
         "stop_grace": "2 s"},
        {"type": "task", "name": "backup", "entry_point": "true"}
    ]
}"#;

fn context(dir: &tempfile::TempDir) -> Context {
    let settings = Settings::with_state_dir(dir.path());
    std::fs::write(&settings.schedule_file, SCHEDULE).unwrap();
    Context::new(settings)
}

#[tokio::test]
async fn stop_without_process_still_disables_restart() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);

    stop(&ctx, "web", OutputFormat::Text).await.unwrap();

    let status = ctx.store.read("web");
    assert!(status.disable_restart);
    assert_eq!(status.recorded_pid(), None);
}

#[tokio::test]
async fn start_then_stop_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);
    ctx.store
        .write("web", &JobStatus::stopped(2, true))
        .unwrap();

    start(&ctx, "web", OutputFormat::Json).await.unwrap();
    let status = ctx.store.read("web");
    let pid = status.recorded_pid().unwrap();
    assert!(!status.disable_restart);
    assert_eq!(status.num_retries, 0);
    assert!(SystemProcessControl::new().is_alive(pid));

    stop(&ctx, "web", OutputFormat::Text).await.unwrap();
    let status = ctx.store.read("web");
    assert!(status.disable_restart);
    assert_eq!(status.recorded_pid(), None);
}

#[tokio::test]
async fn unknown_program_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);

    let err = stop(&ctx, "ghost", OutputFormat::Text).await.unwrap_err();
    assert_eq!(err.to_string(), "no program named 'ghost' in the schedule");
    assert_eq!(ctx.store.read("ghost"), JobStatus::default());

    let err = start(&ctx, "backup", OutputFormat::Text).await.unwrap_err();
    assert_eq!(err.to_string(), "'backup' is a task, not a program");
}
