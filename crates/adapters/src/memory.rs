// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Long-term conversation memory over the Mem0 REST API.

use crate::MemoryError;
use algo_core::ChatRole;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

pub const MEM0_BASE_URL: &str = "https://api.mem0.ai";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A stored memory returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryHit {
    pub memory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl MemoryHit {
    pub fn new(memory: impl Into<String>) -> Self {
        Self { memory: memory.into(), score: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryMessage {
    pub role: ChatRole,
    pub content: String,
}

impl MemoryMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// Metadata attached to each stored exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryMetadata {
    pub has_code: bool,
    /// RFC 3339, millisecond precision, UTC.
    pub timestamp: String,
    pub topic: String,
}

/// Adapter for a per-user memory service.
#[async_trait]
pub trait MemoryAdapter: Send + Sync {
    /// Memories relevant to `query`, most relevant first, at most `limit`.
    async fn search(
        &self,
        query: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryHit>, MemoryError>;

    async fn add(
        &self,
        messages: &[MemoryMessage],
        user_id: &str,
        metadata: &MemoryMetadata,
    ) -> Result<(), MemoryError>;
}

/// Remembers nothing. Used when no memory service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMemory;

#[async_trait]
impl MemoryAdapter for NoMemory {
    async fn search(&self, _: &str, _: &str, _: usize) -> Result<Vec<MemoryHit>, MemoryError> {
        Ok(Vec::new())
    }

    async fn add(&self, _: &[MemoryMessage], _: &str, _: &MemoryMetadata) -> Result<(), MemoryError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Mem0Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Mem0Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: MEM0_BASE_URL.to_string(), timeout: DEFAULT_TIMEOUT }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct Mem0Client {
    config: Mem0Config,
    http: reqwest::Client,
}

impl Mem0Client {
    pub fn new(config: Mem0Config) -> Result<Self, MemoryError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("algoflow/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<reqwest::Response, MemoryError> {
        let response = self
            .http
            .post(self.url(path))
            .header("Authorization", format!("Token {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MemoryError::Api { status: status.as_u16(), body });
        }
        Ok(response)
    }
}

/// Search results come back either bare or wrapped, depending on API version.
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Hits(Vec<MemoryHit>),
    Wrapped { results: Vec<MemoryHit> },
}

#[async_trait]
impl MemoryAdapter for Mem0Client {
    async fn search(
        &self,
        query: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryHit>, MemoryError> {
        let body = json!({ "query": query, "user_id": user_id, "limit": limit });
        let response = self.post("/v1/memories/search/", body).await?;
        let mut hits = match response.json::<SearchResponse>().await? {
            SearchResponse::Hits(hits) | SearchResponse::Wrapped { results: hits } => hits,
        };
        hits.truncate(limit);
        tracing::debug!(user_id, found = hits.len(), "memory search");
        Ok(hits)
    }

    async fn add(
        &self,
        messages: &[MemoryMessage],
        user_id: &str,
        metadata: &MemoryMetadata,
    ) -> Result<(), MemoryError> {
        let body = json!({ "messages": messages, "user_id": user_id, "metadata": metadata });
        self.post("/v1/memories/", body).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
