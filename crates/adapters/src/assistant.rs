// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flowchart generation and memory-backed chat.

use crate::memory::{MemoryAdapter, MemoryHit, MemoryMessage, MemoryMetadata};
use crate::model::{Prompt, TextModel};
use crate::prompts::{CHAT_SYSTEM_PROMPT, FLOWCHART_SYSTEM_PROMPT};
use crate::AiError;
use algo_core::chat::recent;
use algo_core::{ChatMessage, ChatRole, Clock, FlowChart, SystemClock};
use async_trait::async_trait;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_ID: &str = "default_user";
/// Memories pulled into each chat prompt.
pub const MEMORY_LIMIT: usize = 3;
/// Trailing history messages replayed into each chat prompt.
pub const HISTORY_WINDOW: usize = 3;
const TOPIC_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: String::new(),
            message: message.into(),
            conversation_history: Vec::new(),
            user_id: default_user_id(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.conversation_history = history;
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// AI-backed editor features.
#[async_trait]
pub trait AiAdapter: Send + Sync {
    async fn generate_flowchart(&self, code: &str) -> Result<FlowChart, AiError>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, AiError>;
}

/// [`AiAdapter`] over a text model and a memory service.
pub struct Assistant<G, M, C = SystemClock> {
    model: G,
    memory: M,
    clock: C,
}

impl<G, M> Assistant<G, M> {
    pub fn new(model: G, memory: M) -> Self {
        Self { model, memory, clock: SystemClock }
    }
}

impl<G, M, C> Assistant<G, M, C> {
    pub fn with_clock<K: Clock>(self, clock: K) -> Assistant<G, M, K> {
        Assistant { model: self.model, memory: self.memory, clock }
    }

    pub fn model(&self) -> &G {
        &self.model
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }
}

#[async_trait]
impl<G, M, C> AiAdapter for Assistant<G, M, C>
where
    G: TextModel,
    M: MemoryAdapter,
    C: Clock,
{
    async fn generate_flowchart(&self, code: &str) -> Result<FlowChart, AiError> {
        if code.is_empty() {
            return Err(AiError::EmptyCode);
        }
        let start = self.clock.now();
        let prompt = Prompt::json(vec![
            FLOWCHART_SYSTEM_PROMPT.to_string(),
            format!("Analyze this code:\n{code}"),
        ]);
        let text = self.model.generate(&prompt).await?;
        let chart = FlowChart::from_json(&text)?;
        tracing::info!(
            nodes = chart.nodes.len(),
            edges = chart.edges.len(),
            elapsed_ms = self.clock.now().duration_since(start).as_millis() as u64,
            "flowchart generated"
        );
        Ok(chart)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, AiError> {
        if request.message.is_empty() {
            return Err(AiError::EmptyMessage);
        }
        let start = self.clock.now();
        let memories = self.memory.search(&request.message, &request.user_id, MEMORY_LIMIT).await?;
        tracing::debug!(user_id = %request.user_id, found = memories.len(), "relevant memories");

        let prompt = chat_prompt(request, &memories);
        let response = self.model.generate(&Prompt::text(prompt)).await?;

        let exchange = [
            MemoryMessage::new(ChatRole::User, request.message.clone()),
            MemoryMessage::new(ChatRole::Assistant, response.clone()),
        ];
        let metadata = MemoryMetadata {
            has_code: request.has_code(),
            timestamp: self.clock.utc_now().to_rfc3339_opts(SecondsFormat::Millis, true),
            topic: request.message.chars().take(TOPIC_CHARS).collect(),
        };
        self.memory.add(&exchange, &request.user_id, &metadata).await?;

        tracing::info!(
            user_id = %request.user_id,
            elapsed_ms = self.clock.now().duration_since(start).as_millis() as u64,
            "chat response generated"
        );
        Ok(ChatReply { response })
    }
}

/// The full chat prompt: persona, editor code, recalled memories, recent
/// history, then the new message.
pub fn chat_prompt(request: &ChatRequest, memories: &[MemoryHit]) -> String {
    let mut prompt = CHAT_SYSTEM_PROMPT.to_string();

    if request.has_code() {
        prompt.push_str(&format!("\n\nCurrent code in editor:\n```python\n{}\n```\n\n", request.code));
    }

    if !memories.is_empty() {
        prompt.push_str("\n\nRelevant context from previous conversations:\n");
        for (i, hit) in memories.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, hit.memory));
        }
        prompt.push('\n');
    }

    if !request.conversation_history.is_empty() {
        prompt.push_str("Recent conversation:\n");
        for message in recent(&request.conversation_history, HISTORY_WINDOW) {
            prompt.push_str(&message.transcript_line());
            prompt.push('\n');
        }
    }

    prompt.push_str(&format!("\n\nUser: {}\n\nAssistant:", request.message));
    prompt
}

#[cfg(test)]
#[path = "assistant_tests.rs"]
mod tests;
