// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `algoflow run` — execute a program interactively.

use super::{read_source, Store};
use crate::env;
use crate::exit_error::{codes, ExitError};
use crate::output::Printer;
use algo_engine::{BrokerConfig, EngineSource, OutputCursor, RunOutcome, RunSupervisor};
use algo_script::Interpreter;
use anyhow::{Context, Result};
use clap::Args;
use std::io::IsTerminal;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args)]
pub struct RunArgs {
    /// Program to run; its `input()` prompts are answered from stdin
    pub file: PathBuf,
}

pub async fn handle(args: RunArgs, store: &Store) -> Result<()> {
    let source = read_source(&args.file)?;
    store.save_code(&source).context("failed to save the editor document")?;

    let supervisor = RunSupervisor::with_config(
        EngineSource::shared(Interpreter::new()),
        BrokerConfig { timeout: env::input_timeout() },
    );
    let broker = supervisor.broker().clone();
    let mut revisions = supervisor.output().subscribe();
    let mut cursor = OutputCursor::new();
    let mut printer = Printer::terminal(!std::io::stdin().is_terminal());
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    let run = supervisor.run(&source);
    tokio::pin!(run);

    // `next_line` is cancel-safe, so the read can sit in the select while
    // the run keeps being polled and its input timeout can fire.
    let mut stdin_open = true;
    let outcome = loop {
        tokio::select! {
            biased;
            outcome = &mut run => break outcome,
            () = broker.focus_requested() => {
                printer.print(&cursor.advance(supervisor.output()))?;
                if !stdin_open {
                    broker.cancel();
                }
            }
            line = stdin.next_line(), if stdin_open && broker.is_pending() => match line {
                Ok(Some(line)) => {
                    if !broker.submit(&line) {
                        tracing::debug!("stdin line arrived after the input request ended");
                    }
                }
                Ok(None) => {
                    stdin_open = false;
                    broker.cancel();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read stdin");
                    stdin_open = false;
                    broker.cancel();
                }
            },
            changed = revisions.changed() => {
                if changed.is_ok() {
                    printer.print(&cursor.advance(supervisor.output()))?;
                }
            }
        }
    };
    printer.print(&cursor.advance(supervisor.output()))?;

    if let Err(e) = store.save_output(&supervisor.output().records()) {
        tracing::warn!(error = %e, "failed to keep run output");
    }

    match outcome {
        RunOutcome::Completed => Ok(()),
        RunOutcome::Failed(_) => Err(ExitError::silent(codes::FAILED).into()),
        RunOutcome::Rejected(reason) => {
            tracing::info!(%reason, "run rejected");
            Err(ExitError::silent(codes::REJECTED).into())
        }
    }
}
