// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(GeminiConfig::new("test-key").with_base_url(server.uri())).unwrap()
}

fn reply(parts: Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(json!({ "candidates": [{ "content": { "role": "model", "parts": parts } }] }))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn text_prompt_posts_one_user_turn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash-lite:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({ "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }] })))
        .respond_with(reply(json!([{ "text": "hi there" }])))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server).generate(&Prompt::text("hello")).await.unwrap();
    assert_eq!(text, "hi there");
}

#[tokio::test]
async fn json_prompt_requests_json_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "system" }, { "text": "code" }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        })))
        .respond_with(reply(json!([{ "text": "{\"nodes\": []}" }])))
        .expect(1)
        .mount(&server)
        .await;

    let prompt = Prompt::json(vec!["system".into(), "code".into()]);
    let text = client(&server).generate(&prompt).await.unwrap();
    assert_eq!(text, "{\"nodes\": []}");
}

#[tokio::test]
async fn configured_model_selects_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(reply(json!([{ "text": "ok" }])))
        .expect(1)
        .mount(&server)
        .await;

    let config = GeminiConfig::new("k").with_model("gemini-pro").with_base_url(format!("{}/", server.uri()));
    let client = GeminiClient::new(config).unwrap();
    assert_eq!(client.model(), "gemini-pro");
    assert_eq!(client.generate(&Prompt::text("x")).await.unwrap(), "ok");
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn parts_are_concatenated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply(json!([{ "text": "one " }, { "text": "two" }])))
        .mount(&server)
        .await;

    assert_eq!(client(&server).generate(&Prompt::text("x")).await.unwrap(), "one two");
}

#[tokio::test]
async fn no_candidates_is_an_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = client(&server).generate(&Prompt::text("x")).await.unwrap_err();
    assert!(matches!(err, AiError::EmptyResponse), "got {err:?}");
}

#[tokio::test]
async fn error_status_keeps_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let err = client(&server).generate(&Prompt::text("x")).await.unwrap_err();
    match err {
        AiError::Api { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    let config = GeminiConfig::new("k").with_base_url("http://127.0.0.1:1");
    let client = GeminiClient::new(config).unwrap();
    let err = client.generate(&Prompt::text("x")).await.unwrap_err();
    assert!(matches!(err, AiError::Http(_)), "got {err:?}");
}
