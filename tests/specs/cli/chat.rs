// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `algoflow chat` specs

use crate::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer};

#[test]
fn empty_message_is_rejected() {
    let run = cli()
        .env("GEMINI_API_KEY", "test-key")
        .env("ALGOFLOW_GEMINI_URL", "http://127.0.0.1:1")
        .args(&["chat", "", "--json"])
        .exits(3);
    assert_eq!(run.json(), json!({ "error": "No message provided" }));
}

#[tokio::test]
async fn replies_and_replays_history_next_time() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(r"User: How do I dedupe?\n\nAssistant:"))
        .respond_with(gemini_reply("Use a set."))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains(r"User: And sorting?\n\nAssistant:"))
        .and(body_string_contains(r"Recent conversation:\nUser: How do I dedupe?\nAssistant: Use a set.\n"))
        .respond_with(gemini_reply("Try sorted()."))
        .expect(1)
        .mount(&server)
        .await;

    let project = Project::empty();
    project.algoflow().gemini(&server).args(&["chat", "How do I dedupe?"]).passes().stdout_eq("Use a set.\n");
    let value = project.algoflow().gemini(&server).args(&["chat", "And sorting?", "--json"]).passes().json();
    assert_eq!(value, json!({ "response": "Try sorted()." }));
}

#[tokio::test]
async fn file_code_is_sent_with_the_question() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains(r"Current code in editor:\n```python\nxs = [3, 1, 2]\n"))
        .respond_with(gemini_reply("It is a list."))
        .expect(1)
        .mount(&server)
        .await;

    let project = Project::empty();
    let file = project.file("xs.py", "xs = [3, 1, 2]\n");
    project
        .algoflow()
        .gemini(&server)
        .args(&["chat", "What is xs?", "--file", file])
        .passes()
        .stdout_has("It is a list.");
}

#[tokio::test]
async fn last_run_code_is_the_default_context() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("print('from run')"))
        .respond_with(gemini_reply("It prints."))
        .expect(1)
        .mount(&server)
        .await;

    let project = Project::empty();
    let file = project.file("r.py", "print('from run')\n");
    project.algoflow().args(&["run", file]).passes();
    project.algoflow().gemini(&server).args(&["chat", "What does it do?"]).passes().stdout_has("It prints.");
}
