// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::Store;
use anyhow::{Context, Result};

/// Forget the chat history and the cached flowchart.
pub fn handle(store: &Store) -> Result<()> {
    store.clear_chat().context("failed to clear chat history")?;
    store.clear_flowchart().context("failed to clear the flowchart cache")?;
    println!("Cleared chat history and flowchart cache");
    Ok(())
}
