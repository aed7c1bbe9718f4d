// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical schedule hash and its companion file.
//!
//! The daemon records the hash of the schedule it loaded; the CLI compares
//! it with the document on disk to flag a running config that has drifted.

use crate::error::ConfigError;
use pm_storage::write_atomic;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Compact JSON with object keys sorted at every level.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, val)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(val, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// SHA-256 (lowercase hex) of the canonical `schedules` array.
pub fn schedule_hash(entries: &[Value]) -> String {
    let canonical = canonical_json(&Value::Array(entries.to_vec()));
    format!("{:x}", Sha256::digest(canonical.as_bytes()))
}

/// `<stem>.hash` beside the schedule document.
pub fn hash_file_path(schedule_path: &Path) -> PathBuf {
    schedule_path.with_extension("hash")
}

/// Record `hash` atomically so a concurrent reader never sees a partial one.
pub fn write_hash(schedule_path: &Path, hash: &str) -> Result<(), ConfigError> {
    let path = hash_file_path(schedule_path);
    write_atomic(&path, hash.as_bytes()).map_err(|source| ConfigError::WriteHash { path, source })
}

/// Last hash written by the daemon, if any.
pub fn read_hash(schedule_path: &Path) -> Option<String> {
    std::fs::read_to_string(hash_file_path(schedule_path))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Whether the document on disk still matches the hash the daemon loaded.
///
/// A missing hash file counts as a mismatch.
pub fn hash_matches(schedule_path: &Path) -> Result<bool, ConfigError> {
    let current = crate::document::load_schedule(schedule_path)?.hash;
    Ok(read_hash(schedule_path).is_some_and(|recorded| recorded == current))
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;
