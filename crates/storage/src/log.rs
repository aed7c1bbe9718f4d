// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Size-capped append-only log files.
//!
//! Logs are never rotated to numbered files. Once a file grows past its
//! ceiling the oldest bytes are dropped, keeping the newest tail.

use crate::atomic::write_atomic;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Default ceiling for per-job log files (10 MiB)
pub const DEFAULT_LOG_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Drop the head of `path` so at most `max_bytes` remain.
///
/// The kept tail starts after the first newline in the cut region when
/// one exists, so the file does not begin mid-line. Returns whether the
/// file was truncated. A missing file is left alone.
pub fn truncate_head(path: &Path, max_bytes: u64) -> io::Result<bool> {
    let len = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if len <= max_bytes {
        return Ok(false);
    }

    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(len - max_bytes))?;
    let mut tail = Vec::with_capacity(usize::try_from(max_bytes).unwrap_or(0));
    file.read_to_end(&mut tail)?;

    let keep_from = tail
        .iter()
        .position(|b| *b == b'\n')
        .map(|i| i + 1)
        .filter(|i| *i < tail.len())
        .unwrap_or(0);
    write_atomic(path, &tail[keep_from..])?;
    Ok(true)
}

/// Open `path` for appending, first trimming it to `max_bytes`.
///
/// Children inherit the returned handle directly, so the cap is enforced
/// each time a log is opened rather than on every write.
pub fn open_capped_log(path: &Path, max_bytes: u64) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    if let Err(e) = truncate_head(path, max_bytes) {
        tracing::warn!(path = %path.display(), error = %e, "failed to trim log");
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
