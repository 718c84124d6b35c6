// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Maps a single hook's raw run outcome to a [`Verdict`] plus the message
//! and structured payload the Aggregator needs.

use serde::Deserialize;

use crate::config::{HookDefinition, OutputContract, Verdict};
use crate::runner::{HookRunOutcome, RunResult};

#[derive(Clone, Debug, Deserialize)]
pub struct DiagnosticReport {
    pub success: bool,
    pub findings: Vec<Finding>,
    #[serde(rename = "controlFlow", default)]
    pub control_flow: Option<ControlFlow>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Finding {
    pub file: String,
    pub line: i64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ControlFlow {
    #[serde(rename = "continue", default)]
    pub keep_going: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub decision: Option<String>,
}

/// The fully mapped result of one hook, ready for aggregation.
#[derive(Clone, Debug)]
pub struct MappedResult {
    pub hook_name: String,
    pub priority: i64,
    pub verdict: Verdict,
    pub message: Option<String>,
    pub fix_instructions: Option<String>,
    pub parsed: Option<serde_json::Value>,
    pub diagnostics: Option<DiagnosticReport>,
    pub raw_stdout: Vec<u8>,
}

/// Exit-code convention used when neither contract nor `exit_code_map` decides.
fn verdict_from_exit_code(code: Option<i32>) -> Verdict {
    match code {
        Some(0) => Verdict::Success,
        Some(2) => Verdict::BlockingError,
        _ => Verdict::NonBlockingError,
    }
}

pub fn map(hook: &HookDefinition, outcome: &HookRunOutcome) -> MappedResult {
    let base = MappedResult {
        hook_name: hook.name.clone(),
        priority: hook.priority(),
        verdict: Verdict::NonBlockingError,
        message: None,
        fix_instructions: None,
        parsed: None,
        diagnostics: None,
        raw_stdout: Vec::new(),
    };

    let (exit_code, stdout, timed_out, stdout_truncated, stderr_truncated) = match &outcome.result
    {
        RunResult::Completed {
            exit_code,
            stdout,
            timed_out,
            stdout_truncated,
            stderr_truncated,
        } => (*exit_code, stdout, *timed_out, *stdout_truncated, *stderr_truncated),
        RunResult::Failed { reason } => {
            return MappedResult {
                message: Some(reason.clone()),
                ..base
            };
        }
    };

    let mut result = match &hook.contract {
        OutputContract::Text {
            exit_code_map,
            message,
            fix_instructions,
        } => map_text(exit_code, exit_code_map, message, fix_instructions),
        OutputContract::Structured => map_structured(exit_code, stdout),
    };

    result.raw_stdout = stdout.clone();
    result.priority = hook.priority();
    result.hook_name = hook.name.clone();

    if timed_out {
        result.message = Some(append_qualifier(result.message, "hook timed out"));
    }
    if stdout_truncated || stderr_truncated {
        result.message = Some(append_qualifier(result.message, "output was truncated"));
    }

    result
}

fn append_qualifier(message: Option<String>, qualifier: &str) -> String {
    match message {
        Some(m) if !m.is_empty() => format!("{m} ({qualifier})"),
        _ => qualifier.to_string(),
    }
}

fn map_text(
    exit_code: Option<i32>,
    exit_code_map: &std::collections::HashMap<String, Verdict>,
    message: &str,
    fix_instructions: &Option<String>,
) -> MappedResult {
    let key = exit_code.map(|c| c.to_string());
    let verdict = key
        .as_deref()
        .and_then(|k| exit_code_map.get(k))
        .or_else(|| exit_code_map.get("default"))
        .copied()
        .unwrap_or_else(|| verdict_from_exit_code(exit_code));

    MappedResult {
        hook_name: String::new(),
        priority: 0,
        verdict,
        message: Some(message.to_string()),
        fix_instructions: fix_instructions.clone(),
        parsed: None,
        diagnostics: None,
        raw_stdout: Vec::new(),
    }
}

fn map_structured(exit_code: Option<i32>, stdout: &[u8]) -> MappedResult {
    let mut verdict = verdict_from_exit_code(exit_code);
    let mut message = None;
    let mut parsed = None;
    let mut diagnostics = None;

    if !stdout.is_empty() {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(stdout) {
            if let Some(obj) = value.as_object() {
                if let Some(decision) = obj.get("decision").and_then(|v| v.as_str()) {
                    if decision == "block" {
                        verdict = Verdict::BlockingError;
                        message = obj
                            .get("reason")
                            .or_else(|| obj.get("message"))
                            .and_then(|v| v.as_str())
                            .map(str::to_string);
                    } else if decision == "non-blocking-error" {
                        verdict = Verdict::NonBlockingError;
                    }
                }
                if obj.get("continue").and_then(|v| v.as_bool()) == Some(false) {
                    verdict = Verdict::BlockingError;
                    if let Some(reason) = obj.get("stopReason").and_then(|v| v.as_str()) {
                        message = Some(reason.to_string());
                    }
                }
            }

            if let Ok(report) = serde_json::from_value::<DiagnosticReport>(value.clone()) {
                let decision_blocks = report
                    .control_flow
                    .as_ref()
                    .and_then(|cf| cf.decision.as_deref())
                    == Some("block");
                if decision_blocks {
                    verdict = Verdict::BlockingError;
                } else if !report.success {
                    verdict = Verdict::NonBlockingError;
                } else {
                    verdict = Verdict::Success;
                }
                diagnostics = Some(report);
            }

            parsed = Some(value);
        }
    }

    MappedResult {
        hook_name: String::new(),
        priority: 0,
        verdict,
        message,
        fix_instructions: None,
        parsed,
        diagnostics,
        raw_stdout: Vec::new(),
    }
}

#[cfg(test)]
#[path = "mapper_tests.rs"]
mod tests;
