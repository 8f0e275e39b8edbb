// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod chat;
pub mod clear;
pub mod run;
pub mod visualize;

use anyhow::{Context, Result};
use std::path::Path;

/// Read a program file.
pub(crate) fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Store type shared by every command.
pub type Store = algo_storage::AlgoStore<algo_storage::FileStore, algo_storage::MemoryStore>;
