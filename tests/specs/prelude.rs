//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the `pm` and `pmd` binaries against an
//! isolated state directory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 3000;

/// Returns the path to the pmd daemon binary.
pub fn pmd_binary() -> PathBuf {
    assert_cmd::cargo::cargo_bin("pmd")
}

/// `pm` with color off and no inherited path overrides
pub fn cli() -> Pm {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("pm"));
    // Parent overrides would point the binary at the wrong files
    for key in ["PM_SCHEDULE_FILE", "PM_STATUS_DIR", "PM_LOG_DIR", "PM_STATE_DIR", "COLOR"] {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    Pm { cmd }
}

pub struct Pm {
    cmd: Command,
}

impl Pm {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    fn state_dir(mut self, dir: &Path) -> Self {
        self.cmd.env("PM_STATE_DIR", dir);
        self
    }

    /// Run and expect exit code 0
    pub fn passes(self) -> RunAssert {
        self.run(true)
    }

    /// Run and expect a non-zero exit code
    pub fn fails(self) -> RunAssert {
        self.run(false)
    }

    fn run(mut self, success: bool) -> RunAssert {
        let output = self.cmd.output().expect("pm should run");
        let out = RunAssert { output };
        assert_eq!(
            out.output.status.success(),
            success,
            "unexpected exit code {:?}\nstdout: {}\nstderr: {}",
            out.code(),
            out.stdout(),
            out.stderr()
        );
        out
    }
}

/// Finished `pm` run
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    /// Exact stdout, diffed on failure.
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    /// Exact stderr, diffed on failure.
    pub fn stderr_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stderr(), expected);
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout lacks {expected:?}\nstdout: {stdout}");
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(unexpected), "stdout has {unexpected:?}\nstdout: {stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr lacks {expected:?}\nstderr: {stderr}");
        self
    }

    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        let stderr = self.stderr();
        assert!(!stderr.contains(unexpected), "stderr has {unexpected:?}\nstderr: {stderr}");
        self
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("stdout should be JSON")
    }
}

// =============================================================================
// Polling
// =============================================================================

/// Poll a condition until it returns true or timeout is reached.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);
    let poll_interval = std::time::Duration::from_millis(SPEC_POLL_INTERVAL_MS);

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll_interval);
    }
    false
}

// =============================================================================
// State directory
// =============================================================================

/// Isolated pm state directory with helper methods.
pub struct Project {
    state_dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty state directory
    pub fn empty() -> Self {
        Self {
            state_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Create a state directory holding `schedule.json`
    pub fn with_schedule(schedule: &str) -> Self {
        let project = Self::empty();
        project.file("schedule.json", schedule);
        project
    }

    pub fn path(&self) -> &Path {
        self.state_dir.path()
    }

    /// Write a file under the state dir (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Run pm against this state dir
    pub fn pm(&self) -> Pm {
        cli().state_dir(self.path())
    }

    /// Parsed status document for `name`, `null` when absent.
    pub fn status(&self, name: &str) -> serde_json::Value {
        let path = self.path().join("status").join(format!("{name}.json"));
        match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap(),
            Err(_) => serde_json::Value::Null,
        }
    }

    /// Daemon log contents (for debugging test failures)
    pub fn daemon_log(&self) -> String {
        std::fs::read_to_string(self.path().join("logs/pmd.log"))
            .unwrap_or_else(|_| "(no daemon log)".to_string())
    }

    /// Launch pmd in the background. Killed when the guard drops.
    pub fn daemon(&self) -> Daemon {
        let child = Command::new(pmd_binary())
            .env("PM_STATE_DIR", self.path())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .expect("pmd should spawn");
        Daemon { child }
    }
}

/// Running pmd process
pub struct Daemon {
    child: Child,
}

impl Daemon {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Send SIGTERM and wait for the daemon to exit.
    pub fn terminate(mut self) -> std::process::ExitStatus {
        let _ = Command::new("kill")
            .args(["-TERM", &self.child.id().to_string()])
            .status();
        self.child.wait().unwrap()
    }

    /// Wait for the daemon to exit on its own.
    pub fn wait(mut self) -> Output {
        let status = self.child.wait().unwrap();
        let mut stderr = Vec::new();
        if let Some(mut pipe) = self.child.stderr.take() {
            use std::io::Read;
            let _ = pipe.read_to_end(&mut stderr);
        }
        Output {
            status,
            stdout: Vec::new(),
            stderr,
        }
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Kill a process group left behind by a supervised program.
pub fn kill_group(pid: u64) {
    let _ = Command::new("kill")
        .args(["-KILL", "--", &format!("-{pid}")])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

/// One long-lived program and a chain of two tasks
pub const BASIC_SCHEDULE: &str = r#"{
    "schedules": [
        {"type": "program", "name": "web", "handler": "command",
         "command": "sleep 60", "keep_alive": true, "check_alive_freq": "1 s",
         "max_retries": 3, "run_on_start": true, "stop_grace": "1 s"},
        {"type": "task", "name": "backup", "entry_point": "echo backed up",
         "start": "02:00", "days": ["Mon", "Wed"], "run_on_complete": ["report"]},
        {"type": "task", "name": "report", "entry_point": "exit 3"}
    ]
}"#;
