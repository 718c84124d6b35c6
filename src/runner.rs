// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Runs a single hook to completion: spawn, feed stdin, cap output, enforce
//! the timeout, and hand back an outcome that never propagates as an error.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::sync::Notify;

use crate::config::HookDefinition;
use crate::event::HookEvent;
use crate::stream_limiter::drain_capped;
use crate::supervisor::Supervisor;

/// Default cap on a single stream's captured bytes.
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1024 * 1024;
/// Grace between the timeout's polite signal and its forced kill.
pub const TIMEOUT_GRACE: Duration = Duration::from_secs(2);

/// The observable result of running one hook, whatever happened.
#[derive(Debug)]
pub struct HookRunOutcome {
    pub hook_name: String,
    pub elapsed: Duration,
    pub result: RunResult,
}

#[derive(Debug)]
pub enum RunResult {
    /// The child ran to completion, exited, or was terminated by signal.
    Completed {
        exit_code: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        stdout_truncated: bool,
        stderr_truncated: bool,
        timed_out: bool,
    },
    /// Spawn, stdin, or I/O failure. Always maps to `non-blocking-error`.
    Failed { reason: String },
}

/// Run `hook` against `event`, never returning an error: any failure becomes
/// a `RunResult::Failed` outcome instead.
pub async fn run_hook(
    supervisor: &Supervisor,
    hook: &HookDefinition,
    event: &HookEvent,
    cwd: &std::path::Path,
    project_dir_var: &str,
    max_output_bytes: usize,
) -> HookRunOutcome {
    let started = Instant::now();
    let env = [("CLAUDE_PROJECT_DIR".to_string(), project_dir_var.to_string())];

    let mut child = match supervisor.spawn(&hook.command, cwd, &env) {
        Ok(child) => child,
        Err(err) => {
            return HookRunOutcome {
                hook_name: hook.name.clone(),
                elapsed: started.elapsed(),
                result: RunResult::Failed {
                    reason: format!("failed to spawn hook: {err}"),
                },
            }
        }
    };
    let pid = child.id();

    if let Some(mut stdin) = child.stdin.take() {
        let payload = event.to_wire_json().to_string();
        if let Err(err) = stdin.write_all(payload.as_bytes()).await {
            if err.kind() != std::io::ErrorKind::BrokenPipe {
                tracing::debug!(hook = %hook.name, error = %err, "stdin write error");
            }
        }
        drop(stdin);
    }

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return HookRunOutcome {
            hook_name: hook.name.clone(),
            elapsed: started.elapsed(),
            result: RunResult::Failed {
                reason: "hook's stdout/stderr were not piped".to_string(),
            },
        };
    };

    let overflow = Arc::new(Notify::new());
    let overflow_for_out = overflow.clone();
    let stdout_task = tokio::spawn(async move {
        drain_capped(stdout, max_output_bytes, move || {
            overflow_for_out.notify_one();
        })
        .await
    });
    let overflow_for_err = overflow.clone();
    let stderr_task = tokio::spawn(async move {
        drain_capped(stderr, max_output_bytes, move || {
            overflow_for_err.notify_one();
        })
        .await
    });

    // Output overflow forces an immediate kill with no grace, since capped
    // output implies the child is unbounded; it races the timeout path below
    // rather than waiting for it.
    let timeout = hook.timeout_ms();
    let (timed_out, status) = tokio::select! {
        _ = overflow.notified() => {
            if let Some(pid) = pid {
                supervisor.force_kill(pid);
            }
            (false, child.wait().await)
        }
        wait_result = tokio::time::timeout(Duration::from_millis(timeout), child.wait()) => {
            match wait_result {
                Ok(status) => (false, status),
                Err(_) => {
                    if let Some(pid) = pid {
                        supervisor.terminate(pid);
                    }
                    let forced = tokio::time::timeout(TIMEOUT_GRACE, child.wait()).await;
                    match forced {
                        Ok(status) => (true, status),
                        Err(_) => {
                            if let Some(pid) = pid {
                                supervisor.force_kill(pid);
                            }
                            (true, child.wait().await)
                        }
                    }
                }
            }
        }
    };

    if let Some(pid) = pid {
        supervisor.release(pid);
    }

    let (stdout_bytes, stdout_truncated) = stdout_task.await.unwrap_or((Vec::new(), false));
    let (stderr_bytes, stderr_truncated) = stderr_task.await.unwrap_or((Vec::new(), false));

    let result = match status {
        Ok(status) => RunResult::Completed {
            exit_code: status.code(),
            stdout: stdout_bytes,
            stderr: stderr_bytes,
            stdout_truncated,
            stderr_truncated,
            timed_out,
        },
        Err(err) => RunResult::Failed {
            reason: format!("error waiting on hook process: {err}"),
        },
    };

    HookRunOutcome {
        hook_name: hook.name.clone(),
        elapsed: started.elapsed(),
        result,
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
