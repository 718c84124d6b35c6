// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! The top-level error taxonomy of §7, collapsed into the handful of exit
//! codes `main` actually produces.

use thiserror::Error;

use crate::config::ConfigError;
use crate::event::InputError;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl OrchestratorError {
    /// Exit 1 is reserved for catastrophic internal failures: malformed
    /// input, malformed configuration, or anything unhandled.
    pub fn exit_code(&self) -> i32 {
        match self {
            OrchestratorError::Input(_) | OrchestratorError::Config(_) | OrchestratorError::Internal(_) => 1,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
