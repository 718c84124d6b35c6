#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

fn hook(command: &[&str], timeout_seconds: Option<u64>) -> HookDefinition {
    let mut value = serde_json::json!({
        "name": "test-hook",
        "command": command,
        "events": ["Stop"],
        "output_format": "structured",
    });
    if let Some(t) = timeout_seconds {
        value["timeout_seconds"] = serde_json::json!(t);
    }
    serde_json::from_value(value).unwrap()
}

fn stop_event() -> HookEvent {
    let v = serde_json::json!({
        "hook_event_name": "Stop",
        "session_id": "s",
        "transcript_path": "t",
        "cwd": "/w",
        "stop_hook_active": false,
    });
    serde_json::from_value(v).unwrap()
}

#[tokio::test]
async fn captures_stdout_of_a_successful_hook() {
    let supervisor = Supervisor::new();
    let hook = hook(&["sh", "-c", "echo hello"], None);
    let event = stop_event();
    let cwd = std::env::temp_dir();

    let outcome = run_hook(&supervisor, &hook, &event, &cwd, "/project", DEFAULT_MAX_OUTPUT_BYTES).await;

    match outcome.result {
        RunResult::Completed {
            exit_code, stdout, ..
        } => {
            assert_eq!(exit_code, Some(0));
            assert_eq!(String::from_utf8_lossy(&stdout).trim(), "hello");
        }
        RunResult::Failed { reason } => panic!("unexpected failure: {reason}"),
    }
}

#[tokio::test]
async fn records_nonzero_exit_code() {
    let supervisor = Supervisor::new();
    let hook = hook(&["sh", "-c", "exit 2"], None);
    let event = stop_event();
    let cwd = std::env::temp_dir();

    let outcome = run_hook(&supervisor, &hook, &event, &cwd, "/project", DEFAULT_MAX_OUTPUT_BYTES).await;

    match outcome.result {
        RunResult::Completed { exit_code, .. } => assert_eq!(exit_code, Some(2)),
        RunResult::Failed { reason } => panic!("unexpected failure: {reason}"),
    }
}

#[tokio::test]
async fn a_hook_that_outruns_its_timeout_is_marked_timed_out() {
    let supervisor = Supervisor::new();
    let hook = hook(&["sleep", "10"], Some(1));
    let event = stop_event();
    let cwd = std::env::temp_dir();

    let outcome = run_hook(&supervisor, &hook, &event, &cwd, "/project", DEFAULT_MAX_OUTPUT_BYTES).await;

    assert!(outcome.elapsed < Duration::from_millis(3_500));
    match outcome.result {
        RunResult::Completed { timed_out, .. } => assert!(timed_out),
        RunResult::Failed { reason } => panic!("unexpected failure: {reason}"),
    }
}

#[tokio::test]
async fn output_past_the_cap_is_truncated() {
    let supervisor = Supervisor::new();
    let hook = hook(&["sh", "-c", "head -c 100000 /dev/zero"], None);
    let event = stop_event();
    let cwd = std::env::temp_dir();

    let outcome = run_hook(&supervisor, &hook, &event, &cwd, "/project", 10).await;

    match outcome.result {
        RunResult::Completed {
            stdout,
            stdout_truncated,
            ..
        } => {
            assert_eq!(stdout.len(), 10);
            assert!(stdout_truncated);
        }
        RunResult::Failed { reason } => panic!("unexpected failure: {reason}"),
    }
}

#[tokio::test]
async fn an_unbounded_writer_is_killed_promptly_on_overflow_not_at_the_timeout() {
    let supervisor = Supervisor::new();
    // `yes` never exits on its own; only a 60s default timeout or the
    // overflow kill can end it. If overflow only took effect at timeout
    // time this test would need to wait out the full default timeout.
    let hook = hook(&["yes"], None);
    let event = stop_event();
    let cwd = std::env::temp_dir();

    let outcome = run_hook(&supervisor, &hook, &event, &cwd, "/project", 10).await;

    assert!(outcome.elapsed < Duration::from_secs(5));
    match outcome.result {
        RunResult::Completed {
            stdout_truncated, ..
        } => assert!(stdout_truncated),
        RunResult::Failed { reason } => panic!("unexpected failure: {reason}"),
    }
}

#[tokio::test]
async fn a_missing_program_produces_a_failed_outcome_not_a_panic() {
    let supervisor = Supervisor::new();
    let hook = hook(&["this-binary-does-not-exist-anywhere"], None);
    let event = stop_event();
    let cwd = std::env::temp_dir();

    let outcome = run_hook(&supervisor, &hook, &event, &cwd, "/project", DEFAULT_MAX_OUTPUT_BYTES).await;

    assert!(matches!(outcome.result, RunResult::Failed { .. }));
}

#[tokio::test]
async fn the_event_is_delivered_on_stdin() {
    let supervisor = Supervisor::new();
    let hook = hook(&["sh", "-c", "cat"], None);
    let event = stop_event();
    let cwd = std::env::temp_dir();

    let outcome = run_hook(&supervisor, &hook, &event, &cwd, "/project", DEFAULT_MAX_OUTPUT_BYTES).await;

    match outcome.result {
        RunResult::Completed { stdout, .. } => {
            let echoed: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
            assert_eq!(echoed["session_id"], "s");
        }
        RunResult::Failed { reason } => panic!("unexpected failure: {reason}"),
    }
}
