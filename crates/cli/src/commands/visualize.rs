// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `algoflow visualize` — flowchart a program with the AI model.

use super::{read_source, Store};
use crate::output::{flowchart_json, write_flowchart, OutputFormat};
use crate::services;
use algo_adapters::{AiAdapter, ServiceError};
use algo_core::layout;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct VisualizeArgs {
    /// Program to visualize
    pub file: PathBuf,

    /// Print the chart and node positions as JSON
    #[arg(long)]
    pub json: bool,

    /// Ask the model again even if the code has not changed
    #[arg(long)]
    pub force: bool,
}

pub async fn handle(args: VisualizeArgs, store: &Store) -> Result<()> {
    let format = OutputFormat::from_json_flag(args.json);
    let code = read_source(&args.file)?;
    store.save_code(&code).context("failed to save the editor document")?;

    let cached = if args.force { None } else { store.cached_flowchart(&code) };
    let (chart, from_cache) = match cached {
        Some(chart) => {
            tracing::debug!("flowchart cache hit");
            (chart, true)
        }
        None => {
            let assistant = services::assistant()?;
            let chart = assistant
                .generate_flowchart(&code)
                .await
                .map_err(|e| services::report(ServiceError::Flowchart(e), format))?;
            store.save_flowchart(&code, &chart).context("failed to cache the flowchart")?;
            (chart, false)
        }
    };

    let positions = layout(&chart);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&flowchart_json(&chart, &positions, from_cache))?);
        }
        OutputFormat::Text => {
            write_flowchart(&mut std::io::stdout().lock(), &chart, &positions, from_cache)?;
        }
    }
    Ok(())
}
