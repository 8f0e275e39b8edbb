// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Breadth-first flowchart layout.
//!
//! Starting from the first node, every visited node takes the next row.
//! Children of a decision node with two or more outgoing edges fan out:
//! the first child (after moving `True` edges last) goes left, the rest go
//! right. Other children stay in the parent's column. Nodes the walk never
//! reaches sit at the center column on row zero.

use crate::flowchart::{FlowChart, FlowEdge, NodeType};
use std::collections::{HashMap, HashSet, VecDeque};

pub const CENTER_X: i32 = 400;
pub const START_Y: i32 = 80;
pub const BRANCH_OFFSET: i32 = 300;
pub const VERTICAL_SPACING: i32 = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePosition {
    pub id: String,
    pub x: i32,
    pub y: i32,
    /// Distance from the start node along the first path found.
    pub depth: usize,
}

/// Positions for every node, in the chart's node order.
pub fn layout(chart: &FlowChart) -> Vec<NodePosition> {
    let Some(first) = chart.nodes.first() else {
        return Vec::new();
    };

    let mut children: HashMap<&str, Vec<&FlowEdge>> = HashMap::new();
    for edge in &chart.edges {
        children.entry(edge.source.as_str()).or_default().push(edge);
    }

    let mut placed: HashMap<&str, (i32, i32, usize)> = HashMap::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([(first.id.as_str(), CENTER_X, 0usize)]);
    let mut y = START_Y;

    while let Some((id, x, depth)) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        placed.insert(id, (x, y, depth));
        y += VERTICAL_SPACING;

        let mut edges = children.get(id).cloned().unwrap_or_default();
        let is_decision = chart.node(id).is_some_and(|n| n.node_type == NodeType::Decision);

        if is_decision && edges.len() >= 2 {
            // stable: False (or unlabeled) branches keep their order ahead of True
            edges.sort_by_key(|e| e.is_true_branch());
            for (index, edge) in edges.into_iter().enumerate() {
                let offset = if index == 0 { -BRANCH_OFFSET } else { BRANCH_OFFSET };
                queue.push_back((edge.target.as_str(), x + offset, depth + 1));
            }
        } else {
            for edge in edges {
                queue.push_back((edge.target.as_str(), x, depth + 1));
            }
        }
    }

    chart
        .nodes
        .iter()
        .map(|node| {
            let (x, y, depth) = placed.get(node.id.as_str()).copied().unwrap_or((CENTER_X, 0, 0));
            NodePosition { id: node.id.clone(), x, y, depth }
        })
        .collect()
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
