// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    stdout = { StreamKind::Stdout, "stdout" },
    stderr = { StreamKind::Stderr, "stderr" },
    info = { StreamKind::Info, "info" },
    success = { StreamKind::Success, "success" },
    failure = { StreamKind::Failure, "failure" },
    input = { StreamKind::Input, "input" },
)]
fn stream_kind_names(kind: StreamKind, name: &str) {
    assert_eq!(kind.to_string(), name);
    assert_eq!(serde_json::to_value(kind).unwrap(), serde_json::json!(name));
}

#[test]
fn only_input_is_unmergeable() {
    let unmergeable: Vec<_> = StreamKind::ALL.into_iter().filter(|k| !k.is_mergeable()).collect();
    assert_eq!(unmergeable, vec![StreamKind::Input]);
}

#[test]
fn record_serializes_with_type_field() {
    let record = OutputRecord::stdout("hi\n");
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "stdout", "content": "hi\n" }));
}

#[test]
fn error_is_accepted_as_failure() {
    let record: OutputRecord =
        serde_json::from_str(r#"{"type":"error","content":"boom"}"#).unwrap();
    assert_eq!(record, OutputRecord::failure("boom"));
}
