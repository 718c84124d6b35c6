// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! The host event envelope and its eight lifecycle kinds.

use serde::{Deserialize, Serialize};

/// The eight lifecycle moments at which the host invokes the orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PreToolUse,
    PostToolUse,
    Stop,
    UserPromptSubmit,
    Notification,
    SubagentStop,
    PreCompact,
    SessionStart,
}

impl EventKind {
    /// The field on [`HookEvent`] that Hook Selector matches against for this kind,
    /// or `None` for kinds that carry no sub-event matcher.
    pub fn match_value<'a>(&self, event: &'a HookEvent) -> Option<&'a str> {
        match self {
            EventKind::PreToolUse | EventKind::PostToolUse => event.tool_name.as_deref(),
            EventKind::PreCompact => event.trigger.as_deref(),
            EventKind::SessionStart => event.source.as_deref(),
            EventKind::Stop
            | EventKind::UserPromptSubmit
            | EventKind::Notification
            | EventKind::SubagentStop => None,
        }
    }
}

/// A single event read from the host, validated enough to route and dispatch.
///
/// Event-conditional fields are all optional here; Hook Selector is responsible
/// for treating a missing field as "no match value" rather than an error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HookEvent {
    pub hook_event_name: EventKind,
    pub session_id: String,
    pub transcript_path: String,
    pub cwd: String,

    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub stop_hook_active: Option<bool>,

    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub tool_input: Option<serde_json::Value>,
    #[serde(default)]
    pub tool_response: Option<serde_json::Value>,
    #[serde(default)]
    pub custom_instructions: Option<String>,
}

impl HookEvent {
    /// The event's kind, for readability at call sites that already hold a `&HookEvent`.
    pub fn kind(&self) -> EventKind {
        self.hook_event_name
    }

    /// Re-serialize the whole event as the JSON object fed to a hook's stdin.
    pub fn to_wire_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
