#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use proptest::prelude::*;

use super::*;

fn result(verdict: Verdict, priority: i64, message: Option<&str>) -> MappedResult {
    MappedResult {
        hook_name: "h".to_string(),
        priority,
        verdict,
        message: message.map(str::to_string),
        fix_instructions: None,
        parsed: None,
        diagnostics: None,
        raw_stdout: Vec::new(),
    }
}

fn stop_event() -> HookEvent {
    serde_json::from_value(serde_json::json!({
        "hook_event_name": "Stop",
        "session_id": "s",
        "transcript_path": "t",
        "cwd": "/w",
        "stop_hook_active": false,
    }))
    .unwrap()
}

#[test]
fn empty_results_aggregate_to_nothing() {
    assert!(aggregate(Vec::new(), &stop_event()).is_none());
}

#[test]
fn blocking_error_wins_over_everything_else() {
    let results = vec![
        result(Verdict::Success, 10, None),
        result(Verdict::BlockingError, 50, Some("blocked")),
        result(Verdict::NonBlockingError, 5, Some("warn")),
    ];
    let emission = aggregate(results, &stop_event()).unwrap();
    assert_eq!(emission.exit_code, 2);
    assert_eq!(String::from_utf8(emission.stderr).unwrap(), "blocked");
}

#[test]
fn ties_are_broken_by_ascending_priority() {
    let results = vec![
        result(Verdict::BlockingError, 50, Some("later")),
        result(Verdict::BlockingError, 10, Some("earlier")),
    ];
    let emission = aggregate(results, &stop_event()).unwrap();
    assert_eq!(String::from_utf8(emission.stderr).unwrap(), "earlier");
}

#[test]
fn non_blocking_error_exits_zero_with_stderr_message() {
    let results = vec![result(Verdict::NonBlockingError, 10, Some("warn"))];
    let emission = aggregate(results, &stop_event()).unwrap();
    assert_eq!(emission.exit_code, 0);
    assert_eq!(String::from_utf8(emission.stderr).unwrap(), "warn");
}

#[test]
fn success_emits_raw_stdout_when_there_is_no_wrapper_shape() {
    let mut r = result(Verdict::Success, 10, None);
    r.raw_stdout = b"plain output".to_vec();
    let emission = aggregate(vec![r], &stop_event()).unwrap();
    assert_eq!(emission.exit_code, 0);
    assert_eq!(emission.stdout, b"plain output");
}

fn pre_tool_use_event() -> HookEvent {
    serde_json::from_value(serde_json::json!({
        "hook_event_name": "PreToolUse",
        "session_id": "s",
        "transcript_path": "t",
        "cwd": "/w",
        "tool_name": "Bash",
    }))
    .unwrap()
}

#[test]
fn pre_tool_use_permission_decision_is_wrapped_as_hook_specific_output() {
    let mut r = result(Verdict::Success, 10, None);
    r.parsed = Some(serde_json::json!({"permissionDecision": "allow", "permissionDecisionReason": "ok"}));
    r.raw_stdout = serde_json::to_vec(r.parsed.as_ref().unwrap()).unwrap();

    let emission = aggregate(vec![r], &pre_tool_use_event()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&emission.stdout).unwrap();
    assert_eq!(
        value["hookSpecificOutput"]["hookEventName"],
        "PreToolUse"
    );
    assert_eq!(value["hookSpecificOutput"]["permissionDecision"], "allow");
}

fn user_prompt_submit_event() -> HookEvent {
    serde_json::from_value(serde_json::json!({
        "hook_event_name": "UserPromptSubmit",
        "session_id": "s",
        "transcript_path": "t",
        "cwd": "/w",
        "prompt": "hi",
    }))
    .unwrap()
}

#[test]
fn user_prompt_submit_additional_context_is_wrapped_as_hook_specific_output() {
    let mut r = result(Verdict::Success, 10, None);
    r.parsed = Some(serde_json::json!({"additionalContext": "extra info"}));
    r.raw_stdout = serde_json::to_vec(r.parsed.as_ref().unwrap()).unwrap();

    let emission = aggregate(vec![r], &user_prompt_submit_event()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&emission.stdout).unwrap();
    assert_eq!(value["hookSpecificOutput"]["hookEventName"], "UserPromptSubmit");
    assert_eq!(value["hookSpecificOutput"]["additionalContext"], "extra info");
}

fn session_start_event() -> HookEvent {
    serde_json::from_value(serde_json::json!({
        "hook_event_name": "SessionStart",
        "session_id": "s",
        "transcript_path": "t",
        "cwd": "/w",
        "source": "startup",
    }))
    .unwrap()
}

fn verdict_from_tag(tag: u8) -> Verdict {
    match tag % 3 {
        0 => Verdict::BlockingError,
        1 => Verdict::NonBlockingError,
        _ => Verdict::Success,
    }
}

fn tagged_result(priority: i64, tag: u8) -> MappedResult {
    let verdict = verdict_from_tag(tag);
    let mut r = result(verdict, priority, Some(&priority.to_string()));
    r.raw_stdout = priority.to_string().into_bytes();
    r
}

proptest! {
    // The same multiset of (verdict, priority) pairs must pick the same
    // winner no matter what order the hooks happened to finish in.
    #[test]
    fn aggregation_is_independent_of_input_order(
        tags in proptest::collection::vec(0u8..3, 1..12),
    ) {
        // Priorities are the pair's index, so every (verdict, priority) pair
        // in this run is distinct and the winner is unambiguous.
        let forward: Vec<MappedResult> = tags
            .iter()
            .enumerate()
            .map(|(i, &tag)| tagged_result(i as i64, tag))
            .collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let forward_emission = aggregate(forward, &stop_event()).unwrap();
        let reversed_emission = aggregate(reversed, &stop_event()).unwrap();

        prop_assert_eq!(forward_emission.exit_code, reversed_emission.exit_code);
        prop_assert_eq!(forward_emission.stdout, reversed_emission.stdout);
        prop_assert_eq!(forward_emission.stderr, reversed_emission.stderr);
    }
}

#[test]
fn session_start_additional_context_is_wrapped_as_hook_specific_output() {
    let mut r = result(Verdict::Success, 10, None);
    r.parsed = Some(serde_json::json!({"additionalContext": "extra info"}));
    r.raw_stdout = serde_json::to_vec(r.parsed.as_ref().unwrap()).unwrap();

    let emission = aggregate(vec![r], &session_start_event()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&emission.stdout).unwrap();
    assert_eq!(value["hookSpecificOutput"]["hookEventName"], "SessionStart");
    assert_eq!(value["hookSpecificOutput"]["additionalContext"], "extra info");
}
