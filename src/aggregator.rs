// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Selects the winning [`MappedResult`] across all hooks run for one event
//! and renders it to the process's standard streams and exit code.

use crate::config::Verdict;
use crate::event::{EventKind, HookEvent};
use crate::mapper::MappedResult;

/// What the process should do once aggregation has picked a winner.
pub struct Emission {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Pick the winning result: worst verdict first, ties broken by ascending
/// priority, then wrap a successful structured payload per the event-specific
/// rules in §6. `results` is assumed non-empty; callers short-circuit earlier
/// via the Loop Guard when there is nothing to aggregate.
pub fn aggregate(mut results: Vec<MappedResult>, event: &HookEvent) -> Option<Emission> {
    if results.is_empty() {
        return None;
    }
    results.sort_by(|a, b| a.verdict.cmp(&b.verdict).then(a.priority.cmp(&b.priority)));
    let winner = results.remove(0);
    Some(emit(winner, event.kind()))
}

fn emit(winner: MappedResult, kind: EventKind) -> Emission {
    match winner.verdict {
        Verdict::BlockingError => {
            let mut stderr = winner.message.unwrap_or_default().into_bytes();
            if let Some(fix) = winner.fix_instructions {
                stderr.extend_from_slice(b"\n");
                stderr.extend_from_slice(fix.as_bytes());
            }
            Emission {
                exit_code: 2,
                stdout: Vec::new(),
                stderr,
            }
        }
        Verdict::NonBlockingError => Emission {
            exit_code: 0,
            stdout: Vec::new(),
            stderr: winner.message.unwrap_or_default().into_bytes(),
        },
        Verdict::Success => {
            let stdout = wrap_success(&winner, kind);
            Emission {
                exit_code: 0,
                stdout,
                stderr: Vec::new(),
            }
        }
    }
}

/// Event-specific wrapping for a successful result: `hookSpecificOutput` for
/// `PreToolUse`'s `permissionDecision`, and an additional-context passthrough
/// for `UserPromptSubmit`/`SessionStart`. Anything else is emitted as-is.
fn wrap_success(winner: &MappedResult, kind: EventKind) -> Vec<u8> {
    let Some(parsed) = &winner.parsed else {
        return winner.raw_stdout.clone();
    };
    let Some(obj) = parsed.as_object() else {
        return winner.raw_stdout.clone();
    };

    match kind {
        EventKind::PreToolUse if obj.contains_key("permissionDecision") => {
            wrap_hook_specific(obj, "PreToolUse", &["permissionDecision", "permissionDecisionReason"])
        }
        EventKind::UserPromptSubmit if obj.contains_key("additionalContext") => {
            wrap_hook_specific(obj, "UserPromptSubmit", &["additionalContext"])
        }
        EventKind::SessionStart if obj.contains_key("additionalContext") => {
            wrap_hook_specific(obj, "SessionStart", &["additionalContext"])
        }
        _ => winner.raw_stdout.clone(),
    }
}

fn wrap_hook_specific(
    obj: &serde_json::Map<String, serde_json::Value>,
    event_name: &str,
    consumed: &[&str],
) -> Vec<u8> {
    let mut inner = serde_json::Map::new();
    inner.insert(
        "hookEventName".to_string(),
        serde_json::Value::String(event_name.to_string()),
    );
    for key in consumed {
        if let Some(value) = obj.get(*key) {
            inner.insert(key.to_string(), value.clone());
        }
    }

    let mut wrapped = serde_json::Map::new();
    wrapped.insert(
        "hookSpecificOutput".to_string(),
        serde_json::Value::Object(inner),
    );
    for (key, value) in obj {
        if consumed.contains(&key.as_str()) || key == "decision" || key == "reason" {
            continue;
        }
        wrapped.insert(key.clone(), value.clone());
    }

    serde_json::to_vec(&serde_json::Value::Object(wrapped)).unwrap_or_default()
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
