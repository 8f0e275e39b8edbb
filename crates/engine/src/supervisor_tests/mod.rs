// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use algo_core::OutputRecord;
use algo_script::Interpreter;

mod engines;
mod lifecycle;
mod scenarios;

fn supervisor() -> RunSupervisor<Interpreter> {
    RunSupervisor::new(EngineSource::shared(Interpreter::new()))
}

/// Run `source`, answering each input request from `answers` in order.
/// Unused answers are ignored.
async fn run_answering<E: ScriptEngine>(
    supervisor: &RunSupervisor<E>,
    source: &str,
    answers: &[&str],
) -> RunOutcome {
    let broker = supervisor.broker();
    let feed = async {
        for answer in answers {
            while !broker.submit(answer) {
                broker.focus_requested().await;
            }
        }
        std::future::pending::<RunOutcome>().await
    };
    tokio::select! {
        outcome = supervisor.run(source) => outcome,
        outcome = feed => outcome,
    }
}

fn stdout_text<E: ScriptEngine>(supervisor: &RunSupervisor<E>) -> String {
    supervisor
        .output()
        .records()
        .into_iter()
        .filter(|r| r.kind == StreamKind::Stdout)
        .map(|r| r.content)
        .collect()
}
