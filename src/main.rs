// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Hook orchestrator binary entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::task::JoinSet;

use cc_hooks::aggregator::aggregate;
use cc_hooks::cli::{Cli, Commands};
use cc_hooks::config::{self, ConfigFile, ResolvedConfig, SettingsPaths};
use cc_hooks::env::{home_dir, resolve_project_dir};
use cc_hooks::error::OrchestratorError;
use cc_hooks::event::{read_event, synthesize_event, EventKind, DEFAULT_INPUT_DEADLINE_MS};
use cc_hooks::logger::{self, SessionLogEntry};
use cc_hooks::loop_guard::{has_nothing_to_run, is_stop_loop};
use cc_hooks::mapper::map;
use cc_hooks::runner::{run_hook, HookRunOutcome, RunResult, DEFAULT_MAX_OUTPUT_BYTES};
use cc_hooks::selector::select;
use cc_hooks::shutdown;
use cc_hooks::supervisor::Supervisor;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let Commands::Run {
        config,
        debug,
        event,
        mock_data,
    } = cli.command;

    init_tracing(debug);

    let exit_code = match run(config, event, mock_data).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "off" };
    let filter = tracing_subscriber::EnvFilter::try_new(level).unwrap_or_default();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(
    config_override: Option<PathBuf>,
    event_kind: Option<String>,
    mock_data: Option<PathBuf>,
) -> Result<i32, OrchestratorError> {
    let event = match (event_kind, mock_data) {
        (Some(kind), Some(fixture)) => {
            let kind: EventKind = serde_json::from_value(serde_json::Value::String(kind))
                .map_err(|e| OrchestratorError::Internal(format!("unknown event kind: {e}")))?;
            synthesize_event(kind, &fixture)?
        }
        _ => read_event(tokio::io::stdin(), DEFAULT_INPUT_DEADLINE_MS).await?,
    };

    if is_stop_loop(&event) {
        return Ok(0);
    }

    let home = home_dir().unwrap_or_else(std::env::temp_dir);
    let cwd = PathBuf::from(&event.cwd);
    let project_dir = resolve_project_dir(&cwd);

    let resolved = load_config(config_override.as_deref(), &home, &project_dir)?;
    let selected = select(&resolved.hooks, &event);
    if has_nothing_to_run(&selected) {
        return Ok(0);
    }

    let supervisor = Arc::new(Supervisor::new());
    shutdown::install(supervisor.clone());
    logger::run_retention(&home);

    let project_dir_str = project_dir.to_string_lossy().to_string();
    let outcomes = run_selected_hooks(&supervisor, &selected, &event, &cwd, &project_dir_str).await;

    let mut mapped = Vec::with_capacity(outcomes.len());
    for (hook, outcome) in outcomes {
        let result = map(hook, &outcome);
        logger::append(&home, &event.session_id, &log_entry(hook, &event, &outcome, &result));
        mapped.push(result);
    }

    supervisor.cleanup().await;

    let emission = aggregate(mapped, &event).ok_or_else(|| {
        OrchestratorError::Internal("selected hooks produced no results".to_string())
    })?;

    use std::io::Write;
    let _ = std::io::stdout().write_all(&emission.stdout);
    let _ = std::io::stderr().write_all(&emission.stderr);

    Ok(emission.exit_code)
}

/// Runs every selected hook concurrently, pairing each outcome back with the
/// hook definition that produced it. A hook whose task itself panics or is
/// cancelled is dropped rather than re-raised — `run_hook` never returns an
/// error, so a `JoinError` here only happens from a runtime-level shutdown
/// race, not anything the hook itself did.
async fn run_selected_hooks<'a>(
    supervisor: &Arc<Supervisor>,
    selected: &[&'a cc_hooks::config::HookDefinition],
    event: &cc_hooks::event::HookEvent,
    cwd: &std::path::Path,
    project_dir_var: &str,
) -> Vec<(&'a cc_hooks::config::HookDefinition, HookRunOutcome)> {
    let mut join_set = JoinSet::new();
    for (idx, hook) in selected.iter().enumerate() {
        let hook = (*hook).clone();
        let supervisor = supervisor.clone();
        let event = event.clone();
        let cwd = cwd.to_path_buf();
        let project_dir_var = project_dir_var.to_string();
        join_set.spawn(async move {
            let outcome = run_hook(&supervisor, &hook, &event, &cwd, &project_dir_var, DEFAULT_MAX_OUTPUT_BYTES).await;
            (idx, outcome)
        });
    }

    let mut slots: Vec<Option<HookRunOutcome>> = (0..selected.len()).map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        if let Ok((idx, outcome)) = joined {
            slots[idx] = Some(outcome);
        }
    }

    selected
        .iter()
        .zip(slots)
        .filter_map(|(hook, slot)| slot.map(|outcome| (*hook, outcome)))
        .collect()
}

fn log_entry(
    hook: &cc_hooks::config::HookDefinition,
    event: &cc_hooks::event::HookEvent,
    outcome: &HookRunOutcome,
    result: &cc_hooks::mapper::MappedResult,
) -> SessionLogEntry {
    let (exit_code, timed_out, truncated) = match &outcome.result {
        RunResult::Completed {
            exit_code,
            timed_out,
            stdout_truncated,
            stderr_truncated,
            ..
        } => (*exit_code, *timed_out, *stdout_truncated || *stderr_truncated),
        RunResult::Failed { .. } => (None, false, false),
    };

    SessionLogEntry {
        hook_name: hook.name.clone(),
        event_kind: event.kind(),
        verdict: result.verdict,
        exit_code,
        timed_out,
        truncated,
        elapsed_ms: outcome.elapsed.as_millis() as u64,
        timestamp: chrono::Utc::now(),
    }
}

fn load_config(
    config_override: Option<&std::path::Path>,
    home: &std::path::Path,
    project_dir: &std::path::Path,
) -> Result<ResolvedConfig, OrchestratorError> {
    match config_override {
        Some(path) => {
            if !path.exists() {
                return Ok(ResolvedConfig::default());
            }
            let raw = std::fs::read_to_string(path).map_err(|source| {
                OrchestratorError::Config(cc_hooks::config::ConfigError::Read {
                    file: path.display().to_string(),
                    source,
                })
            })?;
            let file: ConfigFile = serde_json::from_str(&raw).map_err(|source| {
                OrchestratorError::Config(cc_hooks::config::ConfigError::Json {
                    file: path.display().to_string(),
                    source,
                })
            })?;
            config::model::validate_file(&path.display().to_string(), &file)?;
            Ok(ResolvedConfig {
                logging: file.logging,
                hooks: file.hooks,
            })
        }
        None => {
            let paths = SettingsPaths::resolve(home, project_dir);
            Ok(config::load(&paths)?)
        }
    }
}
