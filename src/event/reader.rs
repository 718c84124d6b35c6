// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Reads one host event from standard input within a hard deadline.

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncRead};

use super::types::HookEvent;

/// Default deadline for draining stdin before giving up.
pub const DEFAULT_INPUT_DEADLINE_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("timed out after {0}ms waiting for event input")]
    Timeout(u64),

    #[error("failed to read event input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed event JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads a single JSON-encoded [`HookEvent`] from `input`, failing fast if it
/// does not complete within `deadline_ms`.
pub async fn read_event<R: AsyncRead + Unpin>(
    mut input: R,
    deadline_ms: u64,
) -> Result<HookEvent, InputError> {
    let mut buf = Vec::new();
    let read = tokio::time::timeout(
        Duration::from_millis(deadline_ms),
        input.read_to_end(&mut buf),
    )
    .await
    .map_err(|_| InputError::Timeout(deadline_ms))?;
    read?;

    let event: HookEvent = serde_json::from_slice(&buf)?;
    Ok(event)
}

/// Builds an event directly from a named kind and a JSON fixture file, bypassing
/// stdin. Used only by the `--event`/`--mock-data` test-synthesis path.
pub fn synthesize_event(
    kind: super::types::EventKind,
    mock_data: &std::path::Path,
) -> Result<HookEvent, InputError> {
    let content = std::fs::read_to_string(mock_data)?;
    let mut value: serde_json::Value = serde_json::from_str(&content)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert(
            "hook_event_name".to_string(),
            serde_json::to_value(kind).unwrap_or(serde_json::Value::Null),
        );
    }
    let event: HookEvent = serde_json::from_value(value)?;
    Ok(event)
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
