// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! algoflow: run, visualize and discuss small Python-style programs.

mod color;
mod commands;
mod env;
mod exit_error;
mod logging;
mod output;
mod services;

use algo_script::RUNTIME_STACK_SIZE;
use algo_storage::AlgoStore;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use commands::{chat, clear, run, visualize};
use exit_error::{codes, ExitError};

#[derive(Parser)]
#[command(
    name = "algoflow",
    version,
    disable_help_subcommand = true,
    styles = color::styles(),
    about = "Run programs interactively, chart their control flow, and chat about them"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program, answering its input prompts from stdin
    Run(run::RunArgs),
    /// Generate a flowchart for a program
    Visualize(visualize::VisualizeArgs),
    /// Ask the coding assistant a question
    Chat(chat::ChatArgs),
    /// Clear chat history and the flowchart cache
    Clear,
}

fn main() {
    let cli = Cli::parse();
    let spawned = std::thread::Builder::new()
        .name("algoflow-runtime".to_string())
        .stack_size(RUNTIME_STACK_SIZE)
        .spawn(move || block_on(cli));
    let code = match spawned {
        Ok(handle) => handle.join().unwrap_or(codes::FAILED),
        Err(e) => {
            eprintln!("error: cannot start the runtime thread: {e}");
            codes::FAILED
        }
    };
    std::process::exit(code);
}

fn block_on(cli: Cli) -> i32 {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: cannot start the async runtime: {e}");
            return codes::FAILED;
        }
    };
    match runtime.block_on(dispatch(cli)) {
        Ok(()) => 0,
        Err(err) => report(&err),
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let state_dir = env::state_dir()?;
    std::fs::create_dir_all(&state_dir)
        .with_context(|| format!("cannot create {}", state_dir.display()))?;
    let _log = logging::init(&state_dir);
    let store = AlgoStore::open(&state_dir).context("failed to open the state store")?;

    match command {
        Commands::Run(args) => run::handle(args, &store).await,
        Commands::Visualize(args) => visualize::handle(args, &store).await,
        Commands::Chat(args) => chat::handle(args, &store).await,
        Commands::Clear => clear::handle(&store),
    }
}

fn report(err: &anyhow::Error) -> i32 {
    if let Some(exit) = err.downcast_ref::<ExitError>() {
        if !exit.message.is_empty() {
            eprintln!("error: {}", exit.message);
        }
        return exit.code;
    }
    eprintln!("error: {err:#}");
    codes::FAILED
}
