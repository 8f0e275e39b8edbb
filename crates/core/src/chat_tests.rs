// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn transcript_lines_use_capitalized_roles() {
    assert_eq!(ChatMessage::user("hi").transcript_line(), "User: hi");
    assert_eq!(ChatMessage::assistant("hello").transcript_line(), "Assistant: hello");
}

#[test]
fn role_serializes_lowercase() {
    let json = serde_json::to_value(ChatMessage::assistant("x")).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "assistant", "text": "x" }));
}

#[yare::parameterized(
    fewer_than_limit = { 2, 3, 2 },
    exactly_limit = { 3, 3, 3 },
    more_than_limit = { 5, 3, 3 },
    empty = { 0, 3, 0 },
)]
fn recent_takes_tail(len: usize, n: usize, expected: usize) {
    let history: Vec<_> = (0..len).map(|i| ChatMessage::user(i.to_string())).collect();
    let tail = recent(&history, n);
    assert_eq!(tail.len(), expected);
    if let Some(last) = tail.last() {
        assert_eq!(last.text, (len - 1).to_string());
    }
}
