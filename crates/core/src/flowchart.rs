// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flowchart returned by the AI visualizer.
//!
//! The JSON shape is the one the visualizer prompt asks the model for:
//! `{ nodes, edges, meta: { timeComplexity, spaceComplexity, explanation } }`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowChart {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
    #[serde(default)]
    pub meta: FlowMeta,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// The start node.
    Input,
    /// Branch or loop condition; two outgoing edges labeled `True`/`False`.
    Decision,
    Output,
    /// Plain process step; also any type the model invents.
    #[default]
    #[serde(other)]
    Default,
}

crate::simple_display! {
    NodeType {
        Input => "input",
        Default => "default",
        Decision => "decision",
        Output => "output",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub data: NodeData,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, node_type: NodeType, label: impl Into<String>) -> Self {
        let label = label.into();
        Self { id: id.into(), node_type, data: NodeData { label: label.clone() }, label }
    }

    /// The text to draw: `data.label`, falling back to `label`.
    pub fn display_label(&self) -> &str {
        if self.data.label.is_empty() {
            &self.label
        } else {
            &self.data.label
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FlowEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let (source, target) = (source.into(), target.into());
        Self { id: format!("e{source}-{target}"), source, target, label: None }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// `True`/`true` edges lead into a branch or loop body.
    pub fn is_true_branch(&self) -> bool {
        matches!(self.label.as_deref(), Some("True" | "true"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowMeta {
    #[serde(default)]
    pub time_complexity: String,
    #[serde(default)]
    pub space_complexity: String,
    #[serde(default)]
    pub explanation: String,
}

impl FlowChart {
    /// Parse the model's raw JSON reply.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges leaving `id`, in declaration order.
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a FlowEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[path = "flowchart_tests.rs"]
mod tests;
