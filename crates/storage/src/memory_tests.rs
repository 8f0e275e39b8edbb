// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn set_get_remove() {
    let store = MemoryStore::new();
    store.set("b", json!(2)).unwrap();
    store.set("a", json!([1])).unwrap();
    assert_eq!(store.get("a"), Some(json!([1])));
    assert_eq!(store.keys(), vec!["a", "b"]);
    assert!(store.remove("a").unwrap());
    assert!(!store.remove("a").unwrap());
    assert_eq!(store.get("a"), None);
}

#[test]
fn set_replaces() {
    let store = MemoryStore::new();
    store.set("k", json!(1)).unwrap();
    store.set("k", json!(2)).unwrap();
    assert_eq!(store.get("k"), Some(json!(2)));
}
