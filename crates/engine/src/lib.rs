// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! algo-engine: the interactive execution bridge.
//!
//! A [`RunSupervisor`] drives one program run on a [`ScriptEngine`]:
//! output streams into an [`OutputChannel`], each `input()` call suspends
//! on the [`InputBroker`] until the front end submits a line, and the
//! [`transform`] pass makes every `input()` call site awaitable.

mod broker;
mod channel;
mod engine;
mod state;
mod supervisor;
mod transform;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use broker::{BrokerConfig, InputBroker, InputError, InputRequest};
pub use channel::{OutputChannel, OutputCursor};
pub use engine::{EngineSource, ScriptEngine};
pub use state::RunStateHandle;
pub use supervisor::{
    RejectReason, RunOutcome, RunSupervisor, EMPTY_SOURCE_MESSAGE, NOT_READY_MESSAGE,
    NO_OUTPUT_MESSAGE,
};
pub use transform::{transform, try_transform, wrap_entry_point, ENTRY_POINT};
