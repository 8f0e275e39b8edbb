// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Mem0Client {
    Mem0Client::new(Mem0Config::new("m0-key").with_base_url(server.uri())).unwrap()
}

async fn assert_search_parses(payload: serde_json::Value) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/memories/search/"))
        .and(header("Authorization", "Token m0-key"))
        .and(body_json(json!({ "query": "sorting", "user_id": "ada", "limit": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .expect(1)
        .mount(&server)
        .await;

    let hits = client(&server).search("sorting", "ada", 3).await.unwrap();
    assert_eq!(
        hits,
        vec![
            MemoryHit { memory: "likes recursion".into(), score: Some(0.9) },
            MemoryHit::new("uses python"),
        ]
    );
}

#[tokio::test]
async fn search_accepts_bare_list() {
    assert_search_parses(json!([{ "memory": "likes recursion", "score": 0.9 }, { "memory": "uses python" }]))
        .await;
}

#[tokio::test]
async fn search_accepts_wrapped_results() {
    assert_search_parses(json!({
        "results": [{ "memory": "likes recursion", "score": 0.9 }, { "memory": "uses python" }]
    }))
    .await;
}

#[tokio::test]
async fn search_truncates_to_limit() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/memories/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "memory": "a" }, { "memory": "b" }, { "memory": "c" }
        ])))
        .mount(&server)
        .await;

    let hits = client(&server).search("q", "u", 2).await.unwrap();
    assert_eq!(hits, vec![MemoryHit::new("a"), MemoryHit::new("b")]);
}

#[tokio::test]
async fn add_posts_messages_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/memories/"))
        .and(header("Authorization", "Token m0-key"))
        .and(body_json(json!({
            "messages": [
                { "role": "user", "content": "why?" },
                { "role": "assistant", "content": "because" },
            ],
            "user_id": "default_user",
            "metadata": {
                "has_code": true,
                "timestamp": "2026-01-02T03:04:05.000Z",
                "topic": "why?",
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let messages = [
        MemoryMessage::new(ChatRole::User, "why?"),
        MemoryMessage::new(ChatRole::Assistant, "because"),
    ];
    let metadata = MemoryMetadata {
        has_code: true,
        timestamp: "2026-01-02T03:04:05.000Z".into(),
        topic: "why?".into(),
    };
    client(&server).add(&messages, "default_user", &metadata).await.unwrap();
}

#[tokio::test]
async fn rejected_token_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;

    let err = client(&server).search("q", "u", 3).await.unwrap_err();
    assert_eq!(err.to_string(), "memory service returned 401: invalid token");
}

#[tokio::test]
async fn no_memory_remembers_nothing() {
    let metadata = MemoryMetadata { has_code: false, timestamp: String::new(), topic: String::new() };
    NoMemory.add(&[MemoryMessage::new(ChatRole::User, "hi")], "u", &metadata).await.unwrap();
    assert!(NoMemory.search("hi", "u", 3).await.unwrap().is_empty());
}
