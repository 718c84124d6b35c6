// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Layered settings schema, resolution, and validation.

pub mod loader;
pub mod model;
pub mod paths;

pub use loader::{load, ResolvedConfig};
pub use model::{
    ConfigError, ConfigFile, HookDefinition, LogLevel, LoggingConfig, OutputContract, Verdict,
    DEFAULT_PRIORITY, DEFAULT_TIMEOUT_MS,
};
pub use paths::SettingsPaths;
