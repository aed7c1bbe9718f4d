// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job status documents.
//!
//! Each job owns `<dir>/<name>.json`. Both the daemon and the CLI read and
//! write these files, so writes are atomic replacements and
//! read-modify-write cycles hold an exclusive lock on `<name>.lock`.

use crate::atomic::write_atomic;
use fs2::FileExt;
use pm_core::JobStatus;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("invalid job name '{0}'")]
    InvalidName(String),
    #[error("failed to write status {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to lock status {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode status: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct StatusStore {
    dir: PathBuf,
}

impl StatusStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Status document path for `name`.
    pub fn path(&self, name: &str) -> Result<PathBuf, StatusError> {
        Ok(self.dir.join(format!("{}.json", checked_name(name)?)))
    }

    /// Read the status for `name`.
    ///
    /// Never fails: a missing, unreadable or corrupt document is logged and
    /// read as the default status.
    pub fn read(&self, name: &str) -> JobStatus {
        let path = match self.path(name) {
            Ok(path) => path,
            Err(e) => {
                warn!(job = name, error = %e, "cannot read status");
                return JobStatus::default();
            }
        };
        match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "corrupt status document, treating as empty");
                JobStatus::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => JobStatus::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read status, treating as empty");
                JobStatus::default()
            }
        }
    }

    /// Replace the whole status document for `name`.
    pub fn write(&self, name: &str, status: &JobStatus) -> Result<(), StatusError> {
        let path = self.path(name)?;
        let bytes = serde_json::to_vec_pretty(status)?;
        write_atomic(&path, &bytes).map_err(|source| StatusError::Write { path, source })
    }

    /// Read, modify and write the status for `name` under an exclusive lock,
    /// returning the document that was written.
    pub fn update<F>(&self, name: &str, f: F) -> Result<JobStatus, StatusError>
    where
        F: FnOnce(&mut JobStatus),
    {
        let lock_path = self.dir.join(format!("{}.lock", checked_name(name)?));
        fs::create_dir_all(&self.dir).map_err(|source| StatusError::Lock {
            path: lock_path.clone(),
            source,
        })?;
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|source| StatusError::Lock {
                path: lock_path.clone(),
                source,
            })?;
        lock_file
            .lock_exclusive()
            .map_err(|source| StatusError::Lock {
                path: lock_path.clone(),
                source,
            })?;

        let mut status = self.read(name);
        f(&mut status);
        let result = self.write(name, &status);

        let _ = fs2::FileExt::unlock(&lock_file);
        result.map(|()| status)
    }
}

/// Job names become file names, so reject anything that could escape the
/// status directory.
fn checked_name(name: &str) -> Result<&str, StatusError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        Err(StatusError::InvalidName(name.to_string()))
    } else {
        Ok(name)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
