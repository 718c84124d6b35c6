// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Centralized environment variable access and the `CLAUDE_PROJECT_DIR`
//! resolution chain handed to every spawned hook.

use std::path::{Path, PathBuf};

/// `HOME` — used to locate `~/.claude/settings.json` and the session logs.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Resolve the directory to expose to hooks as `CLAUDE_PROJECT_DIR`: the
/// host-provided variable if present, else the `git` top-level of `cwd`,
/// else the nearest ancestor containing a `.claude` directory, else `cwd`.
pub fn resolve_project_dir(cwd: &Path) -> PathBuf {
    if let Ok(dir) = std::env::var("CLAUDE_PROJECT_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    if let Some(top) = git_top_level(cwd) {
        return top;
    }
    if let Some(ancestor) = nearest_dot_claude_ancestor(cwd) {
        return ancestor;
    }
    cwd.to_path_buf()
}

fn git_top_level(cwd: &Path) -> Option<PathBuf> {
    let output = std::process::Command::new("git")
        .arg("rev-parse")
        .arg("--show-toplevel")
        .current_dir(cwd)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

fn nearest_dot_claude_ancestor(cwd: &Path) -> Option<PathBuf> {
    let mut current = Some(cwd);
    while let Some(dir) = current {
        if dir.join(".claude").is_dir() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
