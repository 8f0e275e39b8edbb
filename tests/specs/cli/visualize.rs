// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `algoflow visualize` specs

use crate::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn model_with_chart(expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash-lite:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({ "generationConfig": { "responseMimeType": "application/json" } })))
        .respond_with(gemini_reply(&parity_chart_json()))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

#[test]
fn requires_an_api_key() {
    let project = Project::empty();
    let file = project.file("p.py", PARITY_PROGRAM);
    project.algoflow().args(&["visualize", file]).exits(1).stderr_has("GEMINI_API_KEY is not set");
}

#[test]
fn empty_code_is_rejected_before_calling_the_model() {
    let project = Project::empty();
    let file = project.file("empty.py", "");
    let run = project
        .algoflow()
        .env("GEMINI_API_KEY", "test-key")
        .env("ALGOFLOW_GEMINI_URL", "http://127.0.0.1:1")
        .args(&["visualize", file, "--json"])
        .exits(3);
    assert_eq!(run.json(), json!({ "error": "No code provided" }));
}

#[tokio::test]
async fn prints_layout_then_serves_unchanged_code_from_cache() {
    let server = model_with_chart(1).await;
    let project = Project::empty();
    let file = project.file("p.py", PARITY_PROGRAM);

    project
        .algoflow()
        .gemini(&server)
        .args(&["visualize", file])
        .passes()
        .stdout_has("Flowchart: 4 nodes, 3 edges\n")
        .stdout_has("2 -> 3  [True]")
        .stdout_has("(100, 380)")
        .stdout_lacks("(cached)");

    project
        .algoflow()
        .gemini(&server)
        .args(&["visualize", file])
        .passes()
        .stdout_has("Flowchart: 4 nodes, 3 edges (cached)");
}

#[tokio::test]
async fn changed_code_asks_again() {
    let server = model_with_chart(2).await;
    let project = Project::empty();
    let file = project.file("p.py", PARITY_PROGRAM);
    project.algoflow().gemini(&server).args(&["visualize", file]).passes();

    project.file("p.py", "n = 5\nprint(n % 2 == 0)\n");
    project.algoflow().gemini(&server).args(&["visualize", file]).passes().stdout_lacks("(cached)");
}

#[tokio::test]
async fn force_bypasses_the_cache() {
    let server = model_with_chart(2).await;
    let project = Project::empty();
    let file = project.file("p.py", PARITY_PROGRAM);
    project.algoflow().gemini(&server).args(&["visualize", file]).passes();
    project
        .algoflow()
        .gemini(&server)
        .args(&["visualize", file, "--force"])
        .passes()
        .stdout_lacks("(cached)");
}

#[tokio::test]
async fn json_output_carries_positions() {
    let server = model_with_chart(1).await;
    let project = Project::empty();
    let file = project.file("p.py", PARITY_PROGRAM);

    let value = project.algoflow().gemini(&server).args(&["visualize", file, "--json"]).passes().json();
    assert_eq!(value["cached"], json!(false));
    assert_eq!(value["nodes"][0]["position"], json!({ "x": 400, "y": 80 }));
    assert_eq!(value["nodes"][2]["position"], json!({ "x": 700, "y": 530 }));
    assert_eq!(value["nodes"][3]["position"], json!({ "x": 100, "y": 380 }));
    assert_eq!(value["meta"]["explanation"], json!("Prints whether n is even."));
}

#[tokio::test]
async fn model_failure_reports_error_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;
    let project = Project::empty();
    let file = project.file("p.py", PARITY_PROGRAM);

    let value = project.algoflow().gemini(&server).args(&["visualize", file, "--json"]).exits(3).json();
    assert_eq!(value["error"], json!("Failed to generate flowchart"));
    assert_eq!(value["details"], json!("model returned 500: internal"));
}

#[tokio::test]
async fn unparseable_chart_is_a_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(gemini_reply("not json")).mount(&server).await;
    let project = Project::empty();
    let file = project.file("p.py", PARITY_PROGRAM);

    project
        .algoflow()
        .gemini(&server)
        .args(&["visualize", file])
        .exits(3)
        .stderr_has("Failed to generate flowchart");
}
