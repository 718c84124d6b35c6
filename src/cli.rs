// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! Command-line surface: a single `run` subcommand, plus the top-level
//! `--help`/`--version` clap already provides for free.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "cc-hooks", about = "Runs user-declared hooks at agent lifecycle events")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Read one event from stdin (or synthesize one via --event/--mock-data)
    /// and run the hooks it selects.
    Run {
        /// Replace the usual global/project/local config search with this file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit verbose per-component tracing to stderr.
        #[arg(long)]
        debug: bool,

        /// Synthesize an event of this kind instead of reading stdin.
        #[arg(long, requires = "mock_data")]
        event: Option<String>,

        /// JSON fixture file used with --event to synthesize an event.
        #[arg(long, requires = "event")]
        mock_data: Option<PathBuf>,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
