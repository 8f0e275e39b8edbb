// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! algo-storage: key/value persistence for AlgoFlow.
//!
//! A durable [`FileStore`] keeps the editor document, flowchart cache and
//! chat history across sessions; an ephemeral [`MemoryStore`] holds the
//! output panel for the life of the process. [`AlgoStore`] gives both a
//! typed interface.

mod error;
mod file;
pub mod keys;
mod memory;
mod store;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{AlgoStore, STORE_FILE};

use serde_json::Value;

/// A string-keyed store of JSON values.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Remove `key`, returning whether it was present.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;

    /// Stored keys, sorted.
    fn keys(&self) -> Vec<String>;
}
