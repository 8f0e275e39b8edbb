// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn interpreter_is_a_ready_engine() {
    let engine = Interpreter::new();
    assert!(ScriptEngine::is_ready(&engine));
    ScriptEngine::set_global(&engine, "greeting", Value::str("hi"));
    ScriptEngine::run(&engine, "x = greeting + '!'").await.unwrap();
    assert_eq!(engine.get_global("x").and_then(|v| v.as_str().map(String::from)), Some("hi!".into()));
}

#[test]
fn interpreter_transforms_input_calls() {
    let engine = Interpreter::new();
    assert_eq!(engine.transform_input_calls("a = input()").unwrap(), "a = await input()");
    assert!(engine.transform_input_calls("a = (").is_err());
}

#[test]
fn shared_source_hands_out_the_same_engine() {
    let source = EngineSource::shared(Interpreter::new());
    assert!(Arc::ptr_eq(&source.acquire(), &source.acquire()));
}

#[test]
fn per_run_source_builds_each_time() {
    let source = EngineSource::per_run(Interpreter::new);
    assert!(!Arc::ptr_eq(&source.acquire(), &source.acquire()));
}
