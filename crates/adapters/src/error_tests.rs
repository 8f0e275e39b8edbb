// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn rejected_requests_have_no_details() {
    let err = ServiceError::Flowchart(AiError::EmptyCode);
    assert_eq!(err.to_json(), json!({ "error": "No code provided" }));

    let err = ServiceError::Chat(AiError::EmptyMessage);
    assert_eq!(err.to_json(), json!({ "error": "No message provided" }));
}

#[test]
fn service_failures_carry_details() {
    let err = ServiceError::Flowchart(AiError::Api { status: 503, body: "overloaded".into() });
    assert_eq!(
        err.to_json(),
        json!({ "error": "Failed to generate flowchart", "details": "model returned 503: overloaded" })
    );

    let err = ServiceError::Chat(AiError::Memory(MemoryError::Api {
        status: 401,
        body: "bad token".into(),
    }));
    assert_eq!(
        err.to_json(),
        json!({
            "error": "Failed to process chat",
            "details": "memory service returned 401: bad token",
        })
    );
}

#[test]
fn display_names_the_operation() {
    let err = ServiceError::Chat(AiError::EmptyResponse);
    assert_eq!(err.to_string(), "Failed to process chat: model returned no text");
}
