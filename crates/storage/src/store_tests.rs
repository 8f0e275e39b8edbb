// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{FileStore, MemoryStore};
use algo_core::test_support::parity_chart;
use serde_json::json;
use tempfile::tempdir;

fn memory() -> AlgoStore<MemoryStore, MemoryStore> {
    AlgoStore::new(MemoryStore::new(), MemoryStore::new())
}

#[test]
fn code_round_trips() {
    let store = memory();
    assert_eq!(store.code(), None);
    store.save_code("print('hi')").unwrap();
    assert_eq!(store.code().as_deref(), Some("print('hi')"));
}

#[test]
fn flowchart_cache_hits_only_for_same_code() {
    let store = memory();
    let chart = parity_chart();
    store.save_flowchart("n = 1", &chart).unwrap();

    assert_eq!(store.cached_flowchart("n = 1"), Some(chart));
    assert_eq!(store.cached_flowchart("n = 2"), None);
    assert_eq!(store.cached_flowchart("n = 1 "), None);
}

#[test]
fn clear_flowchart_drops_the_cache() {
    let store = memory();
    store.save_flowchart("x", &parity_chart()).unwrap();
    store.clear_flowchart().unwrap();
    assert_eq!(store.cached_flowchart("x"), None);
}

#[test]
fn chat_history_appends_in_order() {
    let store = memory();
    store.append_chat(&[ChatMessage::user("a"), ChatMessage::assistant("b")]).unwrap();
    store.append_chat(&[ChatMessage::user("c")]).unwrap();
    let texts: Vec<String> = store.chat_history().into_iter().map(|m| m.text).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);

    store.clear_chat().unwrap();
    assert!(store.chat_history().is_empty());
}

#[test]
fn malformed_history_reads_as_empty() {
    let durable = MemoryStore::new();
    durable.set(keys::CHAT_HISTORY, json!("not a list")).unwrap();
    let store = AlgoStore::new(durable, MemoryStore::new());
    assert!(store.chat_history().is_empty());
}

#[test]
fn output_lives_in_the_ephemeral_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    let store = AlgoStore::new(FileStore::open(&path).unwrap(), MemoryStore::new());
    store.save_output(&[OutputRecord::stdout("hi\n")]).unwrap();
    store.save_code("print('hi')").unwrap();
    assert_eq!(store.output(), vec![OutputRecord::stdout("hi\n")]);

    let reopened = AlgoStore::new(FileStore::open(&path).unwrap(), MemoryStore::new());
    assert!(reopened.output().is_empty());
    assert_eq!(reopened.code().as_deref(), Some("print('hi')"));
}

#[test]
fn stored_output_uses_panel_shape() {
    let ephemeral = MemoryStore::new();
    let store = AlgoStore::new(MemoryStore::new(), ephemeral);
    store.save_output(&[OutputRecord::failure("boom")]).unwrap();
    assert_eq!(
        store.ephemeral.get(keys::OUTPUT),
        Some(json!([{ "type": "failure", "content": "boom" }]))
    );
}

#[test]
fn open_creates_the_state_directory() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("nested").join("state");
    let store = AlgoStore::open(&state).unwrap();
    store.save_code("x = 1").unwrap();
    assert!(state.join(STORE_FILE).exists());
    assert_eq!(AlgoStore::open(&state).unwrap().code().as_deref(), Some("x = 1"));
}
