// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Spawns hook children in their own process group and supervises their
//! shutdown: a polite signal first, a forced kill if they outlive the grace
//! period.

use std::process::Stdio;
use std::time::Duration;

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::process::{Child, Command};

/// Grace period between the polite signal and the forced kill during cleanup.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("shutdown in progress, refusing new spawn")]
    ShuttingDown,
    #[error("command must have at least one element")]
    EmptyCommand,
    #[error("failed to spawn child process: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Tracks every child currently running so `cleanup()` can reach them all,
/// and refuses to spawn once shutdown has begun.
pub struct Supervisor {
    active: Mutex<HashSet<u32>>,
    shutting_down: AtomicBool,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(HashSet::new()),
            shutting_down: AtomicBool::new(false),
        }
    }

    /// Spawn `argv[0]` with `argv[1..]` in its own process group, piping all
    /// three standard streams, with `cwd` and the given extra environment
    /// variables applied.
    pub fn spawn(
        &self,
        argv: &[String],
        cwd: &std::path::Path,
        env: &[(String, String)],
    ) -> Result<Child, SupervisorError> {
        if self.shutting_down.load(Ordering::SeqCst) {
            return Err(SupervisorError::ShuttingDown);
        }
        let (program, args) = argv.split_first().ok_or(SupervisorError::EmptyCommand)?;

        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(cwd)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        {
            command.process_group(0);
        }

        let child = command.spawn().map_err(SupervisorError::Spawn)?;
        if let Some(pid) = child.id() {
            self.active.lock().insert(pid);
        }
        Ok(child)
    }

    /// Stop tracking `pid`. Callers invoke this once a child has been waited on.
    pub fn release(&self, pid: u32) {
        self.active.lock().remove(&pid);
    }

    /// Send a polite termination signal to `pid`'s process group.
    pub fn terminate(&self, pid: u32) {
        send_to_group(pid, Signal::Term);
    }

    /// Send a forced kill signal to `pid`'s process group.
    pub fn force_kill(&self, pid: u32) {
        send_to_group(pid, Signal::Kill);
    }

    /// Begin shutdown: refuse further spawns, politely terminate every
    /// tracked child, wait out the grace period, then force-kill survivors.
    pub async fn cleanup(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
        let pids: Vec<u32> = self.active.lock().iter().copied().collect();
        for pid in &pids {
            self.terminate(*pid);
        }
        if !pids.is_empty() {
            tokio::time::sleep(SHUTDOWN_GRACE).await;
        }
        for pid in &pids {
            self.force_kill(*pid);
        }
        self.active.lock().clear();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }
}

enum Signal {
    Term,
    Kill,
}

#[cfg(unix)]
fn send_to_group(pid: u32, signal: Signal) {
    use nix::sys::signal::{kill, Signal as NixSignal};
    use nix::unistd::Pid;

    let sig = match signal {
        Signal::Term => NixSignal::SIGTERM,
        Signal::Kill => NixSignal::SIGKILL,
    };
    // Negative pid targets the whole process group created by `process_group(0)`.
    let _ = kill(Pid::from_raw(-(pid as i32)), sig);
}

#[cfg(not(unix))]
fn send_to_group(pid: u32, signal: Signal) {
    let _ = (pid, signal);
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
