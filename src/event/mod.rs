// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Host event envelope: parsing, kinds, and conditional fields.

pub mod reader;
pub mod types;

pub use reader::{read_event, synthesize_event, InputError, DEFAULT_INPUT_DEADLINE_MS};
pub use types::{EventKind, HookEvent};
