// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine readiness and lifetime.

use super::*;
use crate::test_support::FakeEngine;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

const COUNTER: &str = "seen.append(1)\nprint(len(seen))";

fn seeded_interpreter() -> Interpreter {
    let interpreter = Interpreter::new();
    interpreter.set_global("seen", Value::list(Vec::new()));
    interpreter
}

#[tokio::test]
async fn loading_engine_refuses_to_run() {
    let engine = Arc::new(FakeEngine::loading());
    let sup = RunSupervisor::new(EngineSource::Shared(Arc::clone(&engine)));
    sup.output().write(StreamKind::Stdout, "stale");

    let outcome = sup.run("print('hi')").await;
    assert_eq!(outcome, RunOutcome::Rejected(RejectReason::NotReady));
    assert_eq!(sup.output().records(), vec![OutputRecord::failure(NOT_READY_MESSAGE)]);
    assert!(engine.runs().is_empty());

    engine.finish_loading();
    assert_eq!(sup.run("print('hi')").await, RunOutcome::Completed);
    assert_eq!(stdout_text(&sup), "hi\n");
}

#[tokio::test]
async fn engine_runs_wrapped_transformed_source() {
    let engine = Arc::new(FakeEngine::new());
    let sup = RunSupervisor::new(EngineSource::Shared(Arc::clone(&engine)));
    run_answering(&sup, "x = input('q')", &["v"]).await;

    assert_eq!(engine.runs(), vec!["async def __main__():\n    x = await input('q')\nawait __main__()\n"]);
}

#[tokio::test]
async fn hooks_are_installed_as_globals() {
    let engine = Arc::new(FakeEngine::new());
    let sup = RunSupervisor::new(EngineSource::Shared(Arc::clone(&engine)));
    sup.run("pass").await;

    let names = engine.interpreter().global_names();
    for name in ["__main__", "__stderr__", "__stdout__", "input"] {
        assert!(names.iter().any(|n| n == name), "missing {name} in {names:?}");
    }
}

#[tokio::test]
async fn shared_engine_keeps_globals_between_runs() {
    let sup = RunSupervisor::new(EngineSource::shared(seeded_interpreter()));
    sup.run(COUNTER).await;
    sup.run(COUNTER).await;
    assert_eq!(stdout_text(&sup), "2\n");
}

#[tokio::test]
async fn per_run_engine_starts_fresh() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let sup = RunSupervisor::new(EngineSource::per_run(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        seeded_interpreter()
    }));

    sup.run(COUNTER).await;
    sup.run(COUNTER).await;
    assert_eq!(stdout_text(&sup), "1\n");
    assert_eq!(built.load(Ordering::SeqCst), 2);
}
