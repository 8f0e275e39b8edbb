// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Busy rejection, cancellation and cleanup.

use super::*;
use algo_core::RunState;
use std::time::Duration;

#[tokio::test]
async fn second_run_is_rejected_while_first_waits() {
    let sup = supervisor();
    let first = sup.run("x = input('?')\nprint(x.strip())");
    let second = async {
        sup.broker().focus_requested().await;
        let outcome = sup.run("print('intruder')").await;
        sup.broker().submit("done");
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(second, RunOutcome::Rejected(RejectReason::Busy));
    assert_eq!(first, RunOutcome::Completed);
    assert_eq!(
        sup.output().records(),
        vec![
            OutputRecord::stdout("?"),
            OutputRecord::new(StreamKind::Input, "done"),
            OutputRecord::stdout("done\n"),
        ]
    );
}

#[tokio::test]
async fn phase_follows_the_run() {
    let sup = supervisor();
    assert_eq!(sup.phase(), RunPhase::Idle);
    let run = sup.run("input()");
    let observe = async {
        sup.broker().focus_requested().await;
        let waiting = sup.phase();
        sup.broker().submit("");
        waiting
    };
    let (outcome, waiting) = tokio::join!(run, observe);

    assert_eq!(waiting, RunPhase::WaitingForInput);
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(sup.phase(), RunPhase::Completed);
    assert_eq!(sup.state().get(), RunState::default());
}

#[tokio::test]
async fn cancelled_input_surfaces_as_eof() {
    let sup = supervisor();
    let run = sup.run("name = input('Name: ')\nprint(name)");
    let cancel = async {
        sup.broker().focus_requested().await;
        assert!(sup.broker().cancel());
    };
    let (outcome, ()) = tokio::join!(run, cancel);

    assert_eq!(outcome, RunOutcome::Failed("EOFError: EOF when reading a line".to_string()));
    assert_eq!(sup.output().last(), Some(OutputRecord::failure("EOFError: EOF when reading a line")));
    assert_eq!(sup.state().get(), RunState::default());
}

#[tokio::test]
async fn program_can_catch_cancelled_input() {
    let sup = supervisor();
    let source = "try:\n    input()\nexcept EOFError:\n    print('no input')";
    let run = sup.run(source);
    let cancel = async {
        sup.broker().focus_requested().await;
        sup.broker().cancel();
    };
    let (outcome, ()) = tokio::join!(run, cancel);
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(stdout_text(&sup), "no input\n");
}

#[tokio::test(start_paused = true)]
async fn input_timeout_raises_eof() {
    let config = BrokerConfig { timeout: Some(Duration::from_secs(30)) };
    let sup = RunSupervisor::with_config(EngineSource::shared(Interpreter::new()), config);
    let source = "try:\n    x = input('q')\nexcept EOFError as e:\n    print('gave up:', e)";

    assert_eq!(sup.run(source).await, RunOutcome::Completed);
    assert_eq!(sup.output().records(), vec![OutputRecord::stdout("qgave up: input timed out\n")]);
    assert!(!sup.broker().is_pending());
}

#[tokio::test]
async fn dropping_a_run_cleans_up() {
    let sup = supervisor();
    tokio::select! {
        outcome = sup.run("input('stuck? ')") => panic!("run finished: {outcome:?}"),
        () = sup.broker().focus_requested() => {}
    }

    assert!(!sup.broker().is_pending());
    assert_eq!(sup.state().get(), RunState::default());
    assert_eq!(sup.phase(), RunPhase::Failed);
    assert_eq!(sup.run("print('again')").await, RunOutcome::Completed);
}

#[tokio::test]
async fn too_many_input_arguments() {
    let sup = supervisor();
    let outcome = sup.run("input('a', 'b')").await;
    assert_eq!(
        outcome,
        RunOutcome::Failed("TypeError: input expected at most 1 argument, got 2".to_string())
    );
}

#[tokio::test]
async fn run_state_is_published() {
    let sup = supervisor();
    let mut rx = sup.state().subscribe();
    let run = sup.run("input()");
    let watch = async {
        rx.changed().await.unwrap();
        let started = *rx.borrow_and_update();
        sup.broker().focus_requested().await;
        sup.broker().submit("");
        started
    };
    let (_, started) = tokio::join!(run, watch);
    assert!(started.is_running);
}

#[yare::parameterized(
    busy = { RejectReason::Busy, "a run is already in progress" },
    not_ready = { RejectReason::NotReady, "engine not ready" },
    empty = { RejectReason::EmptySource, "no code to run" },
)]
fn reject_reason_display(reason: RejectReason, text: &str) {
    assert_eq!(reason.to_string(), text);
}
