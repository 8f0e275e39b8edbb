// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{FlowChart, FlowEdge, FlowMeta, FlowNode, NodeType};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::StreamKind;
    use proptest::prelude::*;

    pub fn arb_stream_kind() -> impl Strategy<Value = StreamKind> {
        prop::sample::select(StreamKind::ALL.to_vec())
    }

    /// A sequence of `(kind, text)` writes as a program would emit them.
    pub fn arb_writes(max: usize) -> impl Strategy<Value = Vec<(StreamKind, String)>> {
        prop::collection::vec((arb_stream_kind(), "[a-z \\n]{0,6}"), 0..max)
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

/// `Start → check → (True: even | False: odd)`.
pub fn parity_chart() -> FlowChart {
    FlowChart {
        nodes: vec![
            FlowNode::new("1", NodeType::Input, "Start"),
            FlowNode::new("2", NodeType::Decision, "n % 2 == 0?"),
            FlowNode::new("3", NodeType::Output, "print('even')"),
            FlowNode::new("4", NodeType::Output, "print('odd')"),
        ],
        edges: vec![
            FlowEdge::new("1", "2"),
            FlowEdge::new("2", "3").labeled("True"),
            FlowEdge::new("2", "4").labeled("False"),
        ],
        meta: FlowMeta {
            time_complexity: "O(1)".to_string(),
            space_complexity: "O(1)".to_string(),
            explanation: "Prints whether n is even.".to_string(),
        },
    }
}
