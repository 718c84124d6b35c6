// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Filters the merged configuration down to the hooks eligible for one event,
//! in the order they should run.

use regex::Regex;

use crate::config::HookDefinition;
use crate::event::{EventKind, HookEvent};

/// Returns the eligible hooks for `event`, ordered by ascending priority with
/// ties broken by their position in `hooks` (stable).
pub fn select<'a>(hooks: &'a [HookDefinition], event: &HookEvent) -> Vec<&'a HookDefinition> {
    let kind = event.kind();
    let match_value = kind.match_value(event);

    let mut eligible: Vec<&HookDefinition> = hooks
        .iter()
        .filter(|hook| hook.events.contains(&kind))
        .filter(|hook| matches(hook.matcher.as_deref(), match_value, kind))
        .collect();

    eligible.sort_by_key(|hook| hook.priority());
    eligible
}

fn matches(matcher: Option<&str>, match_value: Option<&str>, kind: EventKind) -> bool {
    let pattern = match matcher {
        None => return true,
        Some(p) if p.is_empty() || p == "*" => return true,
        Some(p) => p,
    };
    let value = match_value.unwrap_or("");

    match kind {
        EventKind::PreToolUse | EventKind::PostToolUse => regex_matches(pattern, value),
        EventKind::PreCompact | EventKind::SessionStart => pattern == value,
        EventKind::Stop
        | EventKind::UserPromptSubmit
        | EventKind::Notification
        | EventKind::SubagentStop => true,
    }
}

fn regex_matches(pattern: &str, value: &str) -> bool {
    let anchored = if pattern.contains('^') || pattern.contains('$') {
        pattern.to_string()
    } else {
        format!("^{pattern}$")
    };

    match Regex::new(&anchored) {
        Ok(re) => re.is_match(value),
        Err(_) => pattern == value,
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
