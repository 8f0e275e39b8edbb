// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed access to the AlgoFlow keys.

use crate::keys;
use crate::{FileStore, KeyValueStore, MemoryStore, StorageError};
use algo_core::{ChatMessage, FlowChart, OutputRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// File name of the durable store inside the state directory.
pub const STORE_FILE: &str = "store.json";

/// The editor's persistent state (durable) and output panel (ephemeral).
pub struct AlgoStore<D, E> {
    durable: D,
    ephemeral: E,
}

impl<D: KeyValueStore, E: KeyValueStore> AlgoStore<D, E> {
    pub fn new(durable: D, ephemeral: E) -> Self {
        Self { durable, ephemeral }
    }

    // ── Source document ─────────────────────────────────────────────────

    pub fn code(&self) -> Option<String> {
        read(&self.durable, keys::CODE)
    }

    pub fn save_code(&self, code: &str) -> Result<(), StorageError> {
        write(&self.durable, keys::CODE, &code)
    }

    // ── Flowchart cache ─────────────────────────────────────────────────

    /// The cached chart, only if it was generated from exactly `code`.
    pub fn cached_flowchart(&self, code: &str) -> Option<FlowChart> {
        let last: String = read(&self.durable, keys::LAST_VISUALIZED_CODE)?;
        if last != code {
            return None;
        }
        read(&self.durable, keys::FLOWCHART)
    }

    pub fn save_flowchart(&self, code: &str, chart: &FlowChart) -> Result<(), StorageError> {
        write(&self.durable, keys::FLOWCHART, chart)?;
        write(&self.durable, keys::LAST_VISUALIZED_CODE, &code)
    }

    pub fn clear_flowchart(&self) -> Result<(), StorageError> {
        self.durable.remove(keys::FLOWCHART)?;
        self.durable.remove(keys::LAST_VISUALIZED_CODE)?;
        Ok(())
    }

    // ── Chat ────────────────────────────────────────────────────────────

    pub fn chat_history(&self) -> Vec<ChatMessage> {
        read(&self.durable, keys::CHAT_HISTORY).unwrap_or_default()
    }

    pub fn append_chat(&self, messages: &[ChatMessage]) -> Result<(), StorageError> {
        let mut history = self.chat_history();
        history.extend_from_slice(messages);
        write(&self.durable, keys::CHAT_HISTORY, &history)
    }

    pub fn clear_chat(&self) -> Result<(), StorageError> {
        self.durable.remove(keys::CHAT_HISTORY).map(|_| ())
    }

    // ── Output panel ────────────────────────────────────────────────────

    pub fn output(&self) -> Vec<OutputRecord> {
        read(&self.ephemeral, keys::OUTPUT).unwrap_or_default()
    }

    pub fn save_output(&self, records: &[OutputRecord]) -> Result<(), StorageError> {
        write(&self.ephemeral, keys::OUTPUT, &records)
    }
}

impl AlgoStore<FileStore, MemoryStore> {
    /// Durable state in `state_dir`, output kept in memory.
    pub fn open(state_dir: &Path) -> Result<Self, StorageError> {
        Ok(Self::new(FileStore::open(state_dir.join(STORE_FILE))?, MemoryStore::new()))
    }
}

/// Decode `key`, treating a value of the wrong shape as absent.
fn read<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let value = store.get(key)?;
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored value");
            None
        }
    }
}

fn write<T: Serialize + ?Sized>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let value = serde_json::to_value(value)
        .map_err(|source| StorageError::Encode { key: key.to_string(), source })?;
    store.set(key, value)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
