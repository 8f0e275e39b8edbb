// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `algoflow chat` — ask the assistant about the current code.

use super::{read_source, Store};
use crate::env;
use crate::output::OutputFormat;
use crate::services;
use algo_adapters::{AiAdapter, ChatRequest, ServiceError};
use algo_core::ChatMessage;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ChatArgs {
    /// Question for the assistant
    pub message: String,

    /// Code to discuss (default: the last file run or visualized)
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Print `{ "response": ... }` JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(args: ChatArgs, store: &Store) -> Result<()> {
    let format = OutputFormat::from_json_flag(args.json);
    let code = match &args.file {
        Some(path) => read_source(path)?,
        None => store.code().unwrap_or_default(),
    };

    let assistant = services::assistant()?;
    let request = ChatRequest::new(args.message.clone())
        .with_code(code)
        .with_history(store.chat_history())
        .with_user(env::user_id());
    let reply = assistant
        .chat(&request)
        .await
        .map_err(|e| services::report(ServiceError::Chat(e), format))?;

    store
        .append_chat(&[ChatMessage::user(args.message), ChatMessage::assistant(reply.response.clone())])
        .context("failed to save chat history")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reply)?),
        OutputFormat::Text => println!("{}", reply.response),
    }
    Ok(())
}
