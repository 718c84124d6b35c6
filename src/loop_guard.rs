// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Short-circuits that let the orchestrator exit cleanly before spawning
//! anything, rather than letting the empty case fall through the pipeline.

use crate::config::HookDefinition;
use crate::event::{EventKind, HookEvent};

/// `true` when this event must not trigger any hook at all: a stop event
/// that is itself the product of a previous stop hook.
pub fn is_stop_loop(event: &HookEvent) -> bool {
    matches!(event.kind(), EventKind::Stop | EventKind::SubagentStop)
        && event.stop_hook_active == Some(true)
}

/// `true` when there is nothing to do: no configuration, or a configuration
/// with no hooks selected for this event.
pub fn has_nothing_to_run(selected: &[&HookDefinition]) -> bool {
    selected.is_empty()
}

#[cfg(test)]
#[path = "loop_guard_tests.rs"]
mod tests;
