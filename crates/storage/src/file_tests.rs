// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn missing_file_opens_empty() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path().join("nested/store.json")).unwrap();
    assert!(store.keys().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn values_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    {
        let store = FileStore::open(&path).unwrap();
        store.set("algoflow_code", json!("print(1)")).unwrap();
        store.set("other", json!({ "n": 2 })).unwrap();
    }
    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get("algoflow_code"), Some(json!("print(1)")));
    assert_eq!(store.get("other"), Some(json!({ "n": 2 })));
    assert_eq!(store.keys(), vec!["algoflow_code", "other"]);
}

#[test]
fn failed_write_leaves_values_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    let store = FileStore::open(&path).unwrap();
    store.set("k", json!("old")).unwrap();

    // A directory in the temp file's place makes every write fail.
    std::fs::create_dir(path.with_extension("tmp")).unwrap();

    assert!(store.set("k", json!("new")).is_err());
    assert!(store.set("added", json!(1)).is_err());
    assert!(store.remove("k").is_err());
    assert_eq!(store.get("k"), Some(json!("old")));
    assert_eq!(store.keys(), vec!["k"]);
    assert_eq!(FileStore::open(&path).unwrap().get("k"), Some(json!("old")));
}

#[test]
fn remove_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    let store = FileStore::open(&path).unwrap();
    store.set("k", json!(1)).unwrap();
    assert!(store.remove("k").unwrap());
    assert!(!store.remove("k").unwrap());
    assert_eq!(FileStore::open(&path).unwrap().get("k"), None);
}

#[test]
fn no_temporary_file_is_left_behind() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path().join("store.json")).unwrap();
    store.set("k", json!(true)).unwrap();
    assert!(!dir.path().join("store.tmp").exists());
}

#[yare::parameterized(
    garbage = { b"not json at all" as &[u8] },
    array = { b"[1, 2, 3]" },
    truncated = { b"{\"algoflow_code\": \"pri" },
)]
fn unreadable_file_is_moved_aside(contents: &[u8]) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    fs::write(&path, contents).unwrap();

    let store = FileStore::open(&path).unwrap();
    assert!(store.keys().is_empty());
    assert_eq!(fs::read(path.with_extension("bak")).unwrap(), contents);
}

#[test]
fn backups_rotate_and_keep_three() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    for round in 1..=4u8 {
        fs::write(&path, vec![round; 4]).unwrap();
        FileStore::open(&path).unwrap();
    }
    assert_eq!(fs::read(path.with_extension("bak")).unwrap(), vec![4u8; 4]);
    assert_eq!(fs::read(path.with_extension("bak.2")).unwrap(), vec![3u8; 4]);
    assert_eq!(fs::read(path.with_extension("bak.3")).unwrap(), vec![2u8; 4]);
    assert!(!path.with_extension("bak.4").exists());
}
