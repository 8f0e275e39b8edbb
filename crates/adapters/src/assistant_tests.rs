// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{FakeMemory, FakeModel, MemoryError, SearchCall};
use algo_core::test_support::parity_chart;
use algo_core::FakeClock;
use chrono::{TimeZone, Utc};

fn assistant(model: FakeModel, memory: FakeMemory) -> Assistant<FakeModel, FakeMemory, FakeClock> {
    let clock = FakeClock::at(Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap());
    Assistant::new(model, memory).with_clock(clock)
}

// ---------------------------------------------------------------------------
// Flowcharts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn flowchart_rejects_empty_code() {
    let model = FakeModel::new();
    let err = assistant(model.clone(), FakeMemory::new()).generate_flowchart("").await.unwrap_err();
    assert!(matches!(err, AiError::EmptyCode));
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn flowchart_sends_system_prompt_then_code_as_json_request() {
    let chart = parity_chart();
    let model = FakeModel::new().reply(serde_json::to_string(&chart).unwrap());
    let got = assistant(model.clone(), FakeMemory::new()).generate_flowchart("n = 4").await.unwrap();
    assert_eq!(got, chart);

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].json);
    assert_eq!(
        prompts[0].parts,
        vec![FLOWCHART_SYSTEM_PROMPT.to_string(), "Analyze this code:\nn = 4".to_string()]
    );
}

#[tokio::test]
async fn flowchart_rejects_non_json_reply() {
    let model = FakeModel::new().reply("here is your chart: ...");
    let err = assistant(model, FakeMemory::new()).generate_flowchart("x = 1").await.unwrap_err();
    assert!(matches!(err, AiError::InvalidFlowchart(_)), "got {err:?}");
}

#[tokio::test]
async fn flowchart_surfaces_model_errors() {
    let model = FakeModel::new().fail(500, "boom");
    let err = assistant(model, FakeMemory::new()).generate_flowchart("x = 1").await.unwrap_err();
    assert_eq!(err.to_string(), "model returned 500: boom");
}

// ---------------------------------------------------------------------------
// Chat prompt
// ---------------------------------------------------------------------------

#[test]
fn bare_prompt_is_persona_then_message() {
    let prompt = chat_prompt(&ChatRequest::new("hi"), &[]);
    assert_eq!(prompt, format!("{CHAT_SYSTEM_PROMPT}\n\nUser: hi\n\nAssistant:"));
}

#[test]
fn full_prompt_sections_in_order() {
    let request = ChatRequest::new("why slow?").with_code("for i in x:\n    pass").with_history(vec![
        ChatMessage::user("one"),
        ChatMessage::assistant("two"),
        ChatMessage::user("three"),
        ChatMessage::assistant("four"),
    ]);
    let memories = [MemoryHit::new("prefers loops"), MemoryHit::new("learning sorting")];

    let expected = format!(
        "{CHAT_SYSTEM_PROMPT}\
         \n\nCurrent code in editor:\n```python\nfor i in x:\n    pass\n```\n\n\
         \n\nRelevant context from previous conversations:\n1. prefers loops\n2. learning sorting\n\n\
         Recent conversation:\nAssistant: two\nUser: three\nAssistant: four\n\
         \n\nUser: why slow?\n\nAssistant:"
    );
    assert_eq!(chat_prompt(&request, &memories), expected);
}

#[yare::parameterized(
    empty = { "" },
    spaces = { "   " },
    newlines = { "\n\n" },
)]
fn blank_code_is_left_out(code: &str) {
    let prompt = chat_prompt(&ChatRequest::new("q").with_code(code), &[]);
    assert!(!prompt.contains("Current code in editor"));
}

#[test]
fn request_deserializes_with_defaults() {
    let request: ChatRequest = serde_json::from_str(r#"{ "message": "hey" }"#).unwrap();
    assert_eq!(request, ChatRequest::new("hey"));
    assert_eq!(request.user_id, "default_user");

    let request: ChatRequest = serde_json::from_str(
        r#"{ "message": "m", "code": "x", "userId": "ada",
             "conversationHistory": [{ "role": "user", "text": "earlier" }] }"#,
    )
    .unwrap();
    assert_eq!(request.user_id, "ada");
    assert_eq!(request.conversation_history, vec![ChatMessage::user("earlier")]);
}

// ---------------------------------------------------------------------------
// Chat exchange
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_rejects_empty_message() {
    let memory = FakeMemory::new();
    let err = assistant(FakeModel::new(), memory.clone()).chat(&ChatRequest::new("")).await.unwrap_err();
    assert!(matches!(err, AiError::EmptyMessage));
    assert!(memory.searches().is_empty());
}

#[tokio::test]
async fn chat_searches_generates_and_remembers() {
    let model = FakeModel::new().reply("Use a set.");
    let memory = FakeMemory::new().with_hits(vec![MemoryHit::new("asked about lists")]);
    let request = ChatRequest::new("How do I dedupe?").with_code("xs = [1, 1]").with_user("ada");

    let reply = assistant(model.clone(), memory.clone()).chat(&request).await.unwrap();
    assert_eq!(reply, ChatReply { response: "Use a set.".into() });

    assert_eq!(
        memory.searches(),
        vec![SearchCall { query: "How do I dedupe?".into(), user_id: "ada".into(), limit: 3 }]
    );

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(!prompts[0].json);
    assert!(prompts[0].parts[0].contains("1. asked about lists\n"));

    let added = memory.added();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].user_id, "ada");
    assert_eq!(
        added[0].messages,
        vec![
            MemoryMessage::new(ChatRole::User, "How do I dedupe?"),
            MemoryMessage::new(ChatRole::Assistant, "Use a set."),
        ]
    );
    assert_eq!(
        added[0].metadata,
        MemoryMetadata {
            has_code: true,
            timestamp: "2026-03-14T15:09:26.000Z".into(),
            topic: "How do I dedupe?".into(),
        }
    );
}

#[tokio::test]
async fn topic_is_first_fifty_characters() {
    let message = "é".repeat(60);
    let memory = FakeMemory::new();
    assistant(FakeModel::new().reply("ok"), memory.clone())
        .chat(&ChatRequest::new(message.clone()))
        .await
        .unwrap();

    let metadata = &memory.added()[0].metadata;
    assert_eq!(metadata.topic, "é".repeat(50));
    assert!(!metadata.has_code);
}

#[tokio::test]
async fn memory_failure_fails_the_chat() {
    let model = FakeModel::new().reply("unused");
    let memory = FakeMemory::new().failing(503, "down");
    let err = assistant(model.clone(), memory).chat(&ChatRequest::new("hi")).await.unwrap_err();
    assert!(matches!(err, AiError::Memory(MemoryError::Api { status: 503, .. })), "got {err:?}");
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn model_failure_stores_nothing() {
    let memory = FakeMemory::new();
    let err = assistant(FakeModel::new().fail(429, "quota"), memory.clone())
        .chat(&ChatRequest::new("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Api { status: 429, .. }));
    assert!(memory.added().is_empty());
}
