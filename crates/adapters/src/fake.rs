// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted model and memory for tests.

use crate::memory::{MemoryAdapter, MemoryHit, MemoryMessage, MemoryMetadata};
use crate::model::{Prompt, TextModel};
use crate::{AiError, MemoryError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Status(u16, String),
}

#[derive(Default)]
struct FakeModelState {
    replies: VecDeque<Reply>,
    prompts: Vec<Prompt>,
}

/// Answers prompts from a queue; an empty queue is an empty response.
#[derive(Clone, Default)]
pub struct FakeModel {
    inner: Arc<Mutex<FakeModelState>>,
}

impl FakeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.inner.lock().replies.push_back(Reply::Text(text.into()));
        self
    }

    pub fn fail(self, status: u16, body: impl Into<String>) -> Self {
        self.inner.lock().replies.push_back(Reply::Status(status, body.into()));
        self
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.inner.lock().prompts.clone()
    }
}

#[async_trait]
impl TextModel for FakeModel {
    async fn generate(&self, prompt: &Prompt) -> Result<String, AiError> {
        let mut inner = self.inner.lock();
        inner.prompts.push(prompt.clone());
        match inner.replies.pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Status(status, body)) => Err(AiError::Api { status, body }),
            None => Err(AiError::EmptyResponse),
        }
    }
}

/// Recorded [`MemoryAdapter::add`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct AddCall {
    pub messages: Vec<MemoryMessage>,
    pub user_id: String,
    pub metadata: MemoryMetadata,
}

/// Recorded [`MemoryAdapter::search`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub query: String,
    pub user_id: String,
    pub limit: usize,
}

#[derive(Default)]
struct FakeMemoryState {
    hits: Vec<MemoryHit>,
    failure: Option<(u16, String)>,
    searches: Vec<SearchCall>,
    added: Vec<AddCall>,
}

#[derive(Clone, Default)]
pub struct FakeMemory {
    inner: Arc<Mutex<FakeMemoryState>>,
}

impl FakeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(self, hits: Vec<MemoryHit>) -> Self {
        self.inner.lock().hits = hits;
        self
    }

    /// Make every call fail with `status`.
    pub fn failing(self, status: u16, body: impl Into<String>) -> Self {
        self.inner.lock().failure = Some((status, body.into()));
        self
    }

    pub fn searches(&self) -> Vec<SearchCall> {
        self.inner.lock().searches.clone()
    }

    pub fn added(&self) -> Vec<AddCall> {
        self.inner.lock().added.clone()
    }
}

#[async_trait]
impl MemoryAdapter for FakeMemory {
    async fn search(
        &self,
        query: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryHit>, MemoryError> {
        let mut inner = self.inner.lock();
        if let Some((status, body)) = inner.failure.clone() {
            return Err(MemoryError::Api { status, body });
        }
        inner.searches.push(SearchCall {
            query: query.to_string(),
            user_id: user_id.to_string(),
            limit,
        });
        Ok(inner.hits.iter().take(limit).cloned().collect())
    }

    async fn add(
        &self,
        messages: &[MemoryMessage],
        user_id: &str,
        metadata: &MemoryMetadata,
    ) -> Result<(), MemoryError> {
        let mut inner = self.inner.lock();
        if let Some((status, body)) = inner.failure.clone() {
            return Err(MemoryError::Api { status, body });
        }
        inner.added.push(AddCall {
            messages: messages.to_vec(),
            user_id: user_id.to_string(),
            metadata: metadata.clone(),
        });
        Ok(())
    }
}
