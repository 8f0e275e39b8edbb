// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use algo_core::{OutputRecord, RunState};

fn setup(config: BrokerConfig) -> (InputBroker, OutputChannel, RunStateHandle) {
    let output = OutputChannel::new();
    let state = RunStateHandle::new();
    let broker = InputBroker::new(output.clone(), state.clone(), config);
    (broker, output, state)
}

#[test]
fn submit_without_pending_request_is_a_no_op() {
    let (broker, output, state) = setup(BrokerConfig::default());
    assert!(!broker.submit("ignored"));
    assert!(output.is_empty());
    assert_eq!(state.get(), RunState::default());
}

#[tokio::test]
async fn request_then_submit() {
    let (broker, output, state) = setup(BrokerConfig::default());
    let request = broker.request_input("Name: ");

    assert_eq!(output.last(), Some(OutputRecord::stdout("Name: ")));
    assert!(state.get().is_waiting_for_input);
    assert_eq!(broker.pending_prompt().as_deref(), Some("Name: "));

    assert!(broker.submit("Ada"));
    assert_eq!(request.await, Ok("Ada\n".to_string()));
    assert_eq!(output.last(), Some(OutputRecord::new(StreamKind::Input, "Ada")));
    assert!(!state.get().is_waiting_for_input);
    assert!(!broker.is_pending());
}

#[tokio::test]
async fn empty_prompt_writes_nothing() {
    let (broker, output, _) = setup(BrokerConfig::default());
    let _request = broker.request_input("");
    assert!(output.is_empty());
    assert!(broker.is_pending());
}

#[tokio::test]
async fn second_request_fails_and_keeps_the_first() {
    let (broker, output, _) = setup(BrokerConfig::default());
    let first = broker.request_input("a? ");
    let second = broker.request_input("b? ");

    assert_eq!(second.await, Err(InputError::AlreadyPending));
    assert_eq!(broker.pending_prompt().as_deref(), Some("a? "));
    assert_eq!(output.records(), vec![OutputRecord::stdout("a? ")]);

    broker.submit("x");
    assert_eq!(first.await, Ok("x\n".to_string()));
}

#[tokio::test]
async fn cancel_resolves_with_eof() {
    let (broker, _, state) = setup(BrokerConfig::default());
    let request = broker.request_input("q");
    assert!(broker.cancel());
    assert_eq!(request.await, Err(InputError::Cancelled));
    assert!(!state.get().is_waiting_for_input);
    assert!(!broker.cancel());
}

#[tokio::test(start_paused = true)]
async fn timeout_cancels_the_request() {
    let config = BrokerConfig { timeout: Some(Duration::from_millis(500)) };
    let (broker, _, state) = setup(config);
    let request = broker.request_input("q");

    let err = request.await.unwrap_err();
    assert_eq!(err, InputError::TimedOut(Duration::from_millis(500)));
    assert_eq!(err.to_string(), "input timed out after 500ms");
    assert!(!broker.is_pending());
    assert!(!state.get().is_waiting_for_input);
    assert!(!broker.submit("late"));
}

#[tokio::test(start_paused = true)]
async fn submit_before_timeout_wins() {
    let config = BrokerConfig { timeout: Some(Duration::from_secs(5)) };
    let (broker, _, _) = setup(config);
    let request = broker.request_input("");
    broker.submit("quick");
    assert_eq!(request.await, Ok("quick\n".to_string()));
}

#[tokio::test]
async fn focus_is_remembered_until_awaited() {
    let (broker, _, _) = setup(BrokerConfig::default());
    let _request = broker.request_input("");
    tokio::time::timeout(Duration::from_secs(1), broker.focus_requested()).await.unwrap();
}

#[tokio::test]
async fn dropped_request_does_not_block_submit() {
    let (broker, output, _) = setup(BrokerConfig::default());
    drop(broker.request_input(""));
    assert!(broker.submit("late"));
    assert_eq!(output.last(), Some(OutputRecord::new(StreamKind::Input, "late")));
}

#[tokio::test]
async fn waiting_flag_is_published() {
    let (broker, _, state) = setup(BrokerConfig::default());
    let mut rx = state.subscribe();
    let _request = broker.request_input("");
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_waiting_for_input);
}
