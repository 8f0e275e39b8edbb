// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable store: one JSON document on disk.

use crate::{KeyValueStore, StorageError};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of `.bak` generations kept when an unreadable file is replaced.
const MAX_BACKUPS: usize = 3;

/// Key/value pairs persisted as a single JSON object.
///
/// Every `set`/`remove` rewrites the file through a temporary sibling and a
/// rename, so a crash leaves either the old or the new document. The
/// in-memory copy changes only once the write has succeeded.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<Map<String, Value>>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories.
    ///
    /// A missing file is an empty store. A file that is not a JSON object
    /// is moved aside to `<path>.bak` (older backups shift to `.bak.2`,
    /// `.bak.3`) and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let values = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    tracing::warn!(path = %path.display(), "store file unreadable, moving it aside");
                    rotate_backups(&path)?;
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(StorageError::io(&path, e)),
        };

        Ok(Self { path, values: Mutex::new(values) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &Map<String, Value>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(values).map_err(|source| StorageError::Encode {
            key: self.path.display().to_string(),
            source,
        })?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::io(&self.path, e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut values = self.values.lock();
        let mut next = values.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut values = self.values.lock();
        if !values.contains_key(key) {
            return Ok(false);
        }
        let mut next = values.clone();
        next.remove(key);
        self.persist(&next)?;
        *values = next;
        Ok(true)
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.lock().keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// `.bak.2 → .bak.3`, `.bak → .bak.2`, `path → .bak`; the oldest is dropped.
fn rotate_backups(path: &Path) -> Result<(), StorageError> {
    let backup = |n: usize| match n {
        1 => path.with_extension("bak"),
        n => path.with_extension(format!("bak.{n}")),
    };
    for n in (1..MAX_BACKUPS).rev() {
        let from = backup(n);
        if from.exists() {
            let to = backup(n + 1);
            fs::rename(&from, &to).map_err(|e| StorageError::io(&to, e))?;
        }
    }
    let to = backup(1);
    fs::rename(path, &to).map_err(|e| StorageError::io(&to, e))
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
