// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `algoflow clear` specs

use crate::prelude::*;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer};

#[test]
fn clear_on_fresh_state_succeeds() {
    cli().args(&["clear"]).passes().stdout_has("Cleared chat history and flowchart cache");
}

#[tokio::test]
async fn clear_drops_the_flowchart_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(gemini_reply(&parity_chart_json()))
        .expect(2)
        .mount(&server)
        .await;

    let project = Project::empty();
    let file = project.file("p.py", PARITY_PROGRAM);
    project.algoflow().gemini(&server).args(&["visualize", file]).passes();
    project.algoflow().args(&["clear"]).passes();
    project.algoflow().gemini(&server).args(&["visualize", file]).passes().stdout_lacks("(cached)");
}

#[test]
fn clear_keeps_the_editor_document() {
    let project = Project::empty();
    let file = project.file("r.py", "print('kept')\n");
    project.algoflow().args(&["run", file]).passes();
    project.algoflow().args(&["clear"]).passes();

    let store = std::fs::read_to_string(project.state_dir().join("store.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&store).unwrap();
    assert_eq!(value["algoflow_code"], serde_json::json!("print('kept')\n"));
    assert!(value.get("algoflow_chat_history").is_none());
}
