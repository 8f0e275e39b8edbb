// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;

#[test]
fn run_id_has_prefix_and_fits_inline() {
    let id = RunId::new();
    assert!(id.as_str().starts_with("run-"));
    assert_eq!(id.as_str().len(), 23);
    assert_eq!(id.suffix().len(), 19);
}

#[test]
fn run_ids_are_unique() {
    let ids: HashSet<RunId> = (0..100).map(|_| RunId::new()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn run_id_short_uses_suffix() {
    let id = RunId::from("run-abcdefghij");
    assert_eq!(id.short(4), "abcd");
    assert_eq!(id.to_string(), "run-abcdefghij");
    assert_eq!(id, "run-abcdefghij");
}

#[test]
fn suffix_without_prefix_is_whole_id() {
    assert_eq!(RunId::from("other").suffix(), "other");
}

#[test]
fn run_id_serializes_as_plain_string() {
    let id = RunId::from("run-xyz");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"run-xyz\"");
}

#[yare::parameterized(
    truncates = { "abcdefgh", 3, "abc" },
    shorter = { "ab", 8, "ab" },
    exact = { "abcd", 4, "abcd" },
    multibyte = { "héllo", 2, "hé" },
)]
fn short_truncates_by_chars(input: &str, n: usize, expected: &str) {
    assert_eq!(short(input, n), expected);
}
