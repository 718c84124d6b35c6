// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Loads, validates, and merges the three settings layers into one [`ResolvedConfig`].
//!
//! Unlike a settings file that is merely advisory, a malformed hook configuration
//! file is rejected outright: a single invalid hook invalidates the whole file,
//! and a rejected file aborts the whole resolution rather than being skipped.

use std::collections::HashMap;

use super::model::{validate_file, ConfigError, ConfigFile, HookDefinition, LoggingConfig};
use super::paths::SettingsPaths;

/// The fully merged configuration, ready for selection.
#[derive(Clone, Debug, Default)]
pub struct ResolvedConfig {
    pub logging: Option<LoggingConfig>,
    pub hooks: Vec<HookDefinition>,
}

/// Load every existing layer, validating and merging in precedence order.
///
/// Precedence (later overrides earlier by hook `name`): global, then project,
/// then local. A missing file is skipped; an existing-but-invalid file is a
/// fatal [`ConfigError`].
pub fn load(paths: &SettingsPaths) -> Result<ResolvedConfig, ConfigError> {
    let mut merged = ResolvedConfig::default();
    let mut index_of_name: HashMap<String, usize> = HashMap::new();

    for (layer, path) in paths.layers() {
        if !path.exists() {
            continue;
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            file: layer.to_string(),
            source,
        })?;
        let file: ConfigFile = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            file: layer.to_string(),
            source,
        })?;
        validate_file(layer, &file)?;

        if file.logging.is_some() {
            merged.logging = file.logging;
        }
        for hook in file.hooks {
            match index_of_name.get(&hook.name) {
                Some(&i) => merged.hooks[i] = hook,
                None => {
                    index_of_name.insert(hook.name.clone(), merged.hooks.len());
                    merged.hooks.push(hook);
                }
            }
        }
    }

    Ok(merged)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
