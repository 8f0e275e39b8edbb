// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input Broker: suspends a program on `input()` until the user submits.

use crate::channel::OutputChannel;
use crate::state::RunStateHandle;
use algo_core::StreamKind;
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{oneshot, Notify};

/// Why an input request ended without a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("an input request is already pending")]
    AlreadyPending,
    #[error("EOF when reading a line")]
    Cancelled,
    #[error("input timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),
}

#[derive(Debug, Clone, Default)]
pub struct BrokerConfig {
    /// Cancel a pending request after this long. `None` waits forever.
    pub timeout: Option<Duration>,
}

struct PendingInputRequest {
    id: u64,
    prompt: String,
    resolver: oneshot::Sender<String>,
}

#[derive(Default)]
struct Slot {
    pending: Option<PendingInputRequest>,
    next_id: u64,
}

/// Holds at most one pending input request and resolves it on submit.
#[derive(Clone)]
pub struct InputBroker {
    output: OutputChannel,
    state: RunStateHandle,
    slot: Arc<Mutex<Slot>>,
    focus: Arc<Notify>,
    config: BrokerConfig,
}

/// Resolves to the submitted line (with a trailing newline).
pub struct InputRequest {
    inner: Pin<Box<dyn Future<Output = Result<String, InputError>> + Send>>,
}

impl Future for InputRequest {
    type Output = Result<String, InputError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl InputBroker {
    pub fn new(output: OutputChannel, state: RunStateHandle, config: BrokerConfig) -> Self {
        Self {
            output,
            state,
            slot: Arc::new(Mutex::new(Slot::default())),
            focus: Arc::new(Notify::new()),
            config,
        }
    }

    /// Start waiting for a line of input.
    ///
    /// A non-empty prompt is echoed to stdout, the run is marked as waiting
    /// and the front end is asked to focus its input box. If a request is
    /// already pending it is left alone and this one fails immediately.
    pub fn request_input(&self, prompt: &str) -> InputRequest {
        let (resolver, rx) = oneshot::channel();
        let id = {
            let mut slot = self.slot.lock();
            if slot.pending.is_some() {
                tracing::warn!("input requested while another request is pending");
                return InputRequest { inner: Box::pin(async { Err(InputError::AlreadyPending) }) };
            }
            slot.next_id += 1;
            let id = slot.next_id;
            slot.pending = Some(PendingInputRequest { id, prompt: prompt.to_string(), resolver });
            id
        };

        if !prompt.is_empty() {
            self.output.write(StreamKind::Stdout, prompt);
        }
        self.state.set_waiting(true);
        self.focus.notify_one();
        tracing::debug!(request = id, prompt, "waiting for input");

        let broker = self.clone();
        let timeout = self.config.timeout;
        InputRequest {
            inner: Box::pin(async move {
                let Some(limit) = timeout else {
                    return rx.await.map_err(|_| InputError::Cancelled);
                };
                match tokio::time::timeout(limit, rx).await {
                    Ok(result) => result.map_err(|_| InputError::Cancelled),
                    Err(_) => {
                        broker.expire(id);
                        Err(InputError::TimedOut(limit))
                    }
                }
            }),
        }
    }

    /// Resolve the pending request with `text`.
    ///
    /// Echoes `text` as an input record, hands `text + "\n"` to the waiting
    /// program and clears the waiting flag. Returns `false` and does nothing
    /// when no request is pending.
    pub fn submit(&self, text: &str) -> bool {
        let Some(pending) = self.slot.lock().pending.take() else {
            tracing::debug!("submit with no pending input request");
            return false;
        };
        self.output.write(StreamKind::Input, text);
        if pending.resolver.send(format!("{text}\n")).is_err() {
            tracing::debug!(request = pending.id, "input request was dropped before submit");
        }
        self.state.set_waiting(false);
        true
    }

    /// Drop the pending request; the waiting program sees end of input.
    pub fn cancel(&self) -> bool {
        let Some(pending) = self.slot.lock().pending.take() else {
            return false;
        };
        tracing::debug!(request = pending.id, "input request cancelled");
        drop(pending);
        self.state.set_waiting(false);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.slot.lock().pending.is_some()
    }

    /// Prompt of the pending request, if any.
    pub fn pending_prompt(&self) -> Option<String> {
        self.slot.lock().pending.as_ref().map(|p| p.prompt.clone())
    }

    /// Completes when a request starts waiting. A request made while no
    /// one is listening is remembered for the next call.
    pub async fn focus_requested(&self) {
        self.focus.notified().await
    }

    fn expire(&self, id: u64) {
        let mut slot = self.slot.lock();
        if slot.pending.as_ref().is_some_and(|p| p.id == id) {
            slot.pending = None;
            drop(slot);
            tracing::info!(request = id, "input request timed out");
            self.state.set_waiting(false);
        }
    }
}

#[cfg(test)]
#[path = "broker_tests.rs"]
mod tests;
