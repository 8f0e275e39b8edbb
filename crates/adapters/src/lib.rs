// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! algo-adapters: external services behind traits.
//!
//! [`GeminiClient`] generates text, [`Mem0Client`] stores conversation
//! memory, and [`Assistant`] combines the two into flowchart generation
//! and chat ([`AiAdapter`]).

mod assistant;
mod error;
pub mod memory;
pub mod model;
pub mod prompts;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake;

pub use assistant::{
    chat_prompt, AiAdapter, Assistant, ChatReply, ChatRequest, DEFAULT_USER_ID, HISTORY_WINDOW,
    MEMORY_LIMIT,
};
pub use error::{AiError, MemoryError, ServiceError};
pub use memory::{Mem0Client, Mem0Config, MemoryAdapter, MemoryHit, NoMemory};
pub use model::{GeminiClient, GeminiConfig, Prompt, TextModel, DEFAULT_MODEL};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{AddCall, FakeMemory, FakeModel, SearchCall};
