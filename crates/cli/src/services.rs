// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the AI assistant from the environment.

use crate::env;
use crate::exit_error::{codes, ExitError};
use crate::output::OutputFormat;
use algo_adapters::memory::{MemoryMessage, MemoryMetadata};
use algo_adapters::{
    Assistant, GeminiClient, GeminiConfig, Mem0Client, Mem0Config, MemoryAdapter, MemoryError,
    MemoryHit, NoMemory, ServiceError,
};
use anyhow::Context;
use async_trait::async_trait;

/// Mem0 when `MEM0_API_KEY` is set, otherwise no memory.
pub enum Memory {
    Mem0(Mem0Client),
    Disabled(NoMemory),
}

#[async_trait]
impl MemoryAdapter for Memory {
    async fn search(
        &self,
        query: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryHit>, MemoryError> {
        match self {
            Memory::Mem0(client) => client.search(query, user_id, limit).await,
            Memory::Disabled(none) => none.search(query, user_id, limit).await,
        }
    }

    async fn add(
        &self,
        messages: &[MemoryMessage],
        user_id: &str,
        metadata: &MemoryMetadata,
    ) -> Result<(), MemoryError> {
        match self {
            Memory::Mem0(client) => client.add(messages, user_id, metadata).await,
            Memory::Disabled(none) => none.add(messages, user_id, metadata).await,
        }
    }
}

pub type CliAssistant = Assistant<GeminiClient, Memory>;

pub fn assistant() -> anyhow::Result<CliAssistant> {
    let key = env::gemini_api_key().context("GEMINI_API_KEY is not set")?;
    let mut config = GeminiConfig::new(key).with_model(env::model());
    if let Some(url) = env::gemini_url() {
        config = config.with_base_url(url);
    }
    if let Some(timeout) = env::http_timeout() {
        config = config.with_timeout(timeout);
    }
    let model = GeminiClient::new(config).context("failed to build the model client")?;

    let memory = match env::mem0_api_key() {
        Some(key) => {
            let mut config = Mem0Config::new(key);
            if let Some(url) = env::mem0_url() {
                config = config.with_base_url(url);
            }
            if let Some(timeout) = env::http_timeout() {
                config = config.with_timeout(timeout);
            }
            Memory::Mem0(Mem0Client::new(config).context("failed to build the memory client")?)
        }
        None => {
            tracing::info!("MEM0_API_KEY not set, chatting without memory");
            Memory::Disabled(NoMemory)
        }
    };

    Ok(Assistant::new(model, memory))
}

/// Report a failed service call in the requested format.
pub fn report(err: ServiceError, format: OutputFormat) -> anyhow::Error {
    tracing::warn!(error = %err, "service request failed");
    match format {
        OutputFormat::Json => {
            println!("{}", err.to_json());
            ExitError::silent(codes::SERVICE).into()
        }
        OutputFormat::Text => ExitError::new(codes::SERVICE, err.to_string()).into(),
    }
}
