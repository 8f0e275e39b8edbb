// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use algo_adapters::{DEFAULT_MODEL, DEFAULT_USER_ID};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("cannot locate a state directory: set ALGOFLOW_STATE_DIR or HOME")]
    NoStateDir,
}

/// Resolve state directory: ALGOFLOW_STATE_DIR > XDG_STATE_HOME/algoflow > ~/.local/state/algoflow
pub fn state_dir() -> Result<PathBuf, EnvError> {
    if let Some(dir) = non_empty("ALGOFLOW_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("algoflow"));
    }
    let home = non_empty("HOME").ok_or(EnvError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/algoflow"))
}

/// Log filter directive: ALGOFLOW_LOG > RUST_LOG > `warn`
pub fn log_filter() -> String {
    non_empty("ALGOFLOW_LOG").or_else(|| non_empty("RUST_LOG")).unwrap_or_else(|| "warn".to_string())
}

pub fn gemini_api_key() -> Option<String> {
    non_empty("GEMINI_API_KEY")
}

pub fn mem0_api_key() -> Option<String> {
    non_empty("MEM0_API_KEY")
}

pub fn model() -> String {
    non_empty("ALGOFLOW_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// Base URL override for the generative model API.
pub fn gemini_url() -> Option<String> {
    non_empty("ALGOFLOW_GEMINI_URL")
}

/// Base URL override for the memory API.
pub fn mem0_url() -> Option<String> {
    non_empty("ALGOFLOW_MEM0_URL")
}

/// Memory namespace for chat.
pub fn user_id() -> String {
    non_empty("ALGOFLOW_USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

/// How long a program may wait at an input prompt. Unset waits forever.
pub fn input_timeout() -> Option<Duration> {
    millis("ALGOFLOW_INPUT_TIMEOUT_MS")
}

pub fn http_timeout() -> Option<Duration> {
    millis("ALGOFLOW_HTTP_TIMEOUT_MS")
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn millis(name: &str) -> Option<Duration> {
    std::env::var(name).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
