// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! algo-core: data model shared by the AlgoFlow crates

pub mod macros;

pub mod chat;
pub mod clock;
pub mod flowchart;
pub mod id;
pub mod layout;
pub mod output;
pub mod run;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use chat::{ChatMessage, ChatRole};
pub use clock::{Clock, FakeClock, SystemClock};
pub use flowchart::{FlowChart, FlowEdge, FlowMeta, FlowNode, NodeData, NodeType};
pub use id::{short, RunId};
pub use layout::{layout, NodePosition};
pub use output::{OutputRecord, StreamKind};
pub use run::{RunPhase, RunState};
