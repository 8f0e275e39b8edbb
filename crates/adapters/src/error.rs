// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::{json, Value};
use thiserror::Error;

/// Errors from the memory service.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("memory request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("memory service returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Errors from flowchart generation and chat.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("No code provided")]
    EmptyCode,
    #[error("No message provided")]
    EmptyMessage,
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("model returned no text")]
    EmptyResponse,
    #[error("model returned invalid flowchart JSON: {0}")]
    InvalidFlowchart(#[from] serde_json::Error),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

impl AiError {
    /// Whether the caller sent an unusable request, as opposed to a
    /// failure talking to a service.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, AiError::EmptyCode | AiError::EmptyMessage)
    }
}

/// An [`AiError`] attributed to the operation that produced it.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to generate flowchart: {0}")]
    Flowchart(#[source] AiError),
    #[error("Failed to process chat: {0}")]
    Chat(#[source] AiError),
}

impl ServiceError {
    pub fn cause(&self) -> &AiError {
        match self {
            ServiceError::Flowchart(e) | ServiceError::Chat(e) => e,
        }
    }

    /// `{ "error": ... }` for rejected requests, `{ "error", "details" }`
    /// for service failures.
    pub fn to_json(&self) -> Value {
        let cause = self.cause();
        if cause.is_bad_request() {
            return json!({ "error": cause.to_string() });
        }
        let error = match self {
            ServiceError::Flowchart(_) => "Failed to generate flowchart",
            ServiceError::Chat(_) => "Failed to process chat",
        };
        json!({ "error": error, "details": cause.to_string() })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
