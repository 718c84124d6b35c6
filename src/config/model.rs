// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! On-disk configuration schema and the invariants enforced at load time.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::EventKind;

/// Default hook timeout when `timeout_seconds` is absent: 60s, stored as ms.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
/// Default hook priority when absent. Lower runs earlier.
pub const DEFAULT_PRIORITY: i64 = 100;

/// The three-valued flow-control outcome, used both as a per-exit-code mapping
/// target and as the aggregated result of a whole invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Ordered first so `Verdict::min` picks the worst outcome.
    BlockingError,
    NonBlockingError,
    Success,
}

/// Format-specific fields for a hook, discriminated by `output_format`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "output_format", rename_all = "kebab-case")]
pub enum OutputContract {
    Text {
        #[serde(default)]
        exit_code_map: HashMap<String, Verdict>,
        #[serde(default)]
        message: String,
        #[serde(default)]
        fix_instructions: Option<String>,
    },
    Structured,
}

/// A single user-declared hook, as it appears (and is merged) in configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HookDefinition {
    pub name: String,
    pub command: Vec<String>,
    pub events: HashSet<EventKind>,
    #[serde(default)]
    pub matcher: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub contract: OutputContract,
}

impl HookDefinition {
    pub fn priority(&self) -> i64 {
        self.priority.unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_seconds
            .map(|s| s.saturating_mul(1000))
            .unwrap_or(DEFAULT_TIMEOUT_MS)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    #[default]
    Errors,
    Verbose,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub path: Option<String>,
}

/// The raw shape of a single configuration file on disk.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub hooks: Vec<HookDefinition>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{file}: {path}: {reason}")]
    Invalid {
        file: String,
        path: String,
        reason: String,
    },
    #[error("{file}: failed to read: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}: invalid JSON: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Validate the invariants of §3 for a single freshly-parsed file.
///
/// Rejection is all-or-nothing: a single bad hook invalidates the whole file so
/// that no hook from a malformed configuration can ever run.
pub fn validate_file(file_label: &str, config: &ConfigFile) -> Result<(), ConfigError> {
    let invalid = |path: String, reason: String| ConfigError::Invalid {
        file: file_label.to_string(),
        path,
        reason,
    };

    let mut seen_names = HashSet::new();
    for (i, hook) in config.hooks.iter().enumerate() {
        let field = |f: &str| format!("hooks[{i}].{f}");

        if hook.name.is_empty() {
            return Err(invalid(field("name"), "must not be empty".to_string()));
        }
        if !seen_names.insert(hook.name.clone()) {
            return Err(invalid(
                field("name"),
                format!("duplicate hook name '{}'", hook.name),
            ));
        }
        if hook.command.is_empty() {
            return Err(invalid(
                field("command"),
                "must contain at least one element".to_string(),
            ));
        }
        if hook.events.is_empty() {
            return Err(invalid(
                field("events"),
                "must name at least one event kind".to_string(),
            ));
        }
        if let Some(priority) = hook.priority {
            if priority < 0 {
                return Err(invalid(field("priority"), "must be non-negative".to_string()));
            }
        }
        if let Some(timeout) = hook.timeout_seconds {
            if timeout == 0 {
                return Err(invalid(
                    field("timeout_seconds"),
                    "must be positive".to_string(),
                ));
            }
        }
        if let OutputContract::Text { exit_code_map, .. } = &hook.contract {
            for key in exit_code_map.keys() {
                if key != "default" && key.parse::<i64>().is_err() {
                    return Err(invalid(
                        field("exit_code_map"),
                        format!("key '{key}' must be an exit code or the literal \"default\""),
                    ));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
