// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Installs the signal and panic handlers that guarantee every spawned
//! child either exits on its own, is polite-killed, or is force-killed
//! before the orchestrator process itself exits.

use std::sync::Arc;

use tracing::error;

use crate::supervisor::Supervisor;

/// Conventional 128+signum exit codes for the two signals we handle.
const SIGINT_EXIT_CODE: i32 = 130;
const SIGTERM_EXIT_CODE: i32 = 143;

/// Installs the panic hook and spawns the background task that waits for a
/// terminate or interrupt signal and runs cleanup before exiting.
pub fn install(supervisor: Arc<Supervisor>) {
    install_panic_hook();
    tokio::spawn(async move {
        let exit_code = wait_for_signal().await;
        supervisor.cleanup().await;
        std::process::exit(exit_code);
    });
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!(%info, "fatal exception");
        default_hook(info);
    }));
}

#[cfg(unix)]
async fn wait_for_signal() -> i32 {
    use tokio::signal::unix::{signal, SignalKind};

    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(mut term), Ok(mut int)) => tokio::select! {
            _ = term.recv() => SIGTERM_EXIT_CODE,
            _ = int.recv() => SIGINT_EXIT_CODE,
        },
        (Ok(mut term), Err(_)) => {
            term.recv().await;
            SIGTERM_EXIT_CODE
        }
        (Err(_), Ok(mut int)) => {
            int.recv().await;
            SIGINT_EXIT_CODE
        }
        (Err(_), Err(_)) => {
            let _ = tokio::signal::ctrl_c().await;
            SIGINT_EXIT_CODE
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> i32 {
    let _ = tokio::signal::ctrl_c().await;
    SIGINT_EXIT_CODE
}

#[cfg(test)]
#[path = "shutdown_tests.rs"]
mod tests;
