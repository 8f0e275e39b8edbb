// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared, observable run state.

use algo_core::RunState;
use std::sync::Arc;
use tokio::sync::watch;

/// The one live [`RunState`] of a supervisor, shared with its broker.
///
/// Every change is published to subscribers, so a front end can re-render
/// its spinner and input box without polling.
#[derive(Clone)]
pub struct RunStateHandle {
    tx: Arc<watch::Sender<RunState>>,
}

impl Default for RunStateHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStateHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(RunState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> RunState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.tx.subscribe()
    }

    pub(crate) fn set_running(&self, is_running: bool) {
        self.tx.send_if_modified(|state| {
            let changed = state.is_running != is_running;
            state.is_running = is_running;
            changed
        });
    }

    pub(crate) fn set_waiting(&self, is_waiting_for_input: bool) {
        self.tx.send_if_modified(|state| {
            let changed = state.is_waiting_for_input != is_waiting_for_input;
            state.is_waiting_for_input = is_waiting_for_input;
            changed
        });
    }

    pub(crate) fn reset(&self) {
        self.tx.send_if_modified(|state| {
            let changed = *state != RunState::default();
            *state = RunState::default();
            changed
        });
    }
}
