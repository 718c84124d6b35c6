// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Append-only per-session run logs and their opportunistic retention sweep.
//!
//! Every operation here is best-effort: a logging failure must never fail
//! the hook run it is recording.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Verdict;
use crate::event::EventKind;

const RETENTION_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);
const RETENTION_MAX_TOTAL_BYTES: u64 = 500 * 1024 * 1024;
const LOCK_STALE_AFTER: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Serialize)]
pub struct SessionLogEntry {
    pub hook_name: String,
    pub event_kind: EventKind,
    pub verdict: Verdict,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
    pub truncated: bool,
    pub elapsed_ms: u64,
    pub timestamp: DateTime<Utc>,
}

fn sessions_dir(home: &Path) -> PathBuf {
    home.join(".claude").join("logs").join("cc-hooks").join("sessions")
}

fn lock_path(home: &Path) -> PathBuf {
    home.join(".claude")
        .join("logs")
        .join("cc-hooks")
        .join(".cleanup.lock")
}

/// Append one JSON line to the session's log file, creating directories as
/// needed. Swallows every error; a logging failure is never surfaced.
pub fn append(home: &Path, session_id: &str, entry: &SessionLogEntry) {
    let dir = sessions_dir(home);
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let path = dir.join(format!("session-{session_id}.jsonl"));
    let Ok(line) = serde_json::to_string(entry) else {
        return;
    };
    if let Ok(mut file) = std::fs::OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{line}");
    }
}

/// Opportunistically trim old session logs. Acquires `.cleanup.lock` via
/// exclusive create; a missed race or any I/O error is silently skipped.
pub fn run_retention(home: &Path) {
    let dir = sessions_dir(home);
    let lock = lock_path(home);

    if !try_acquire_lock(&lock) {
        return;
    }

    sweep(&dir, RETENTION_MAX_AGE, RETENTION_MAX_TOTAL_BYTES);

    let _ = std::fs::remove_file(&lock);
}

fn try_acquire_lock(lock: &Path) -> bool {
    match std::fs::OpenOptions::new().create_new(true).write(true).open(lock) {
        Ok(_) => true,
        Err(_) => {
            let Ok(metadata) = std::fs::metadata(lock) else {
                return false;
            };
            let Ok(age) = metadata.modified().and_then(|m| {
                SystemTime::now()
                    .duration_since(m)
                    .map_err(|_| std::io::Error::from(std::io::ErrorKind::InvalidData))
            }) else {
                return false;
            };
            if age < LOCK_STALE_AFTER {
                return false;
            }
            if std::fs::remove_file(lock).is_err() {
                return false;
            }
            std::fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(lock)
                .is_ok()
        }
    }
}

fn sweep(dir: &Path, max_age: Duration, max_total_bytes: u64) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    let mut files: Vec<(PathBuf, u64, SystemTime)> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            let metadata = entry.metadata().ok()?;
            if !metadata.is_file() {
                return None;
            }
            let mtime = metadata.modified().ok()?;
            Some((path, metadata.len(), mtime))
        })
        .collect();

    files.sort_by_key(|(_, _, mtime)| *mtime);

    let now = SystemTime::now();
    files.retain(|(path, _, mtime)| {
        let age = now.duration_since(*mtime).unwrap_or(Duration::ZERO);
        if age > max_age {
            let _ = std::fs::remove_file(path);
            false
        } else {
            true
        }
    });

    let mut total: u64 = files.iter().map(|(_, size, _)| size).sum();
    let mut i = 0;
    while total > max_total_bytes && i < files.len() {
        let (path, size, _) = &files[i];
        if std::fs::remove_file(path).is_ok() {
            total = total.saturating_sub(*size);
        }
        i += 1;
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
