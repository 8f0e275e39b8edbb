// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const PARITY: &str = r#"{
  "nodes": [
    { "id": "1", "type": "input", "label": "Start", "data": { "label": "Start" } },
    { "id": "2", "type": "default", "label": "a = int(input())", "data": { "label": "a = int(input())" } },
    { "id": "3", "type": "decision", "label": "a % 2 == 0?", "data": { "label": "a % 2 == 0?" } },
    { "id": "4", "type": "output", "label": "Return True", "data": { "label": "Return True" } },
    { "id": "5", "type": "output", "label": "Return False", "data": { "label": "Return False" } }
  ],
  "edges": [
    { "id": "e1-2", "source": "1", "target": "2" },
    { "id": "e2-3", "source": "2", "target": "3" },
    { "id": "e3-4", "source": "3", "target": "4", "label": "True" },
    { "id": "e3-5", "source": "3", "target": "5", "label": "False" }
  ],
  "meta": {
    "timeComplexity": "O(1)",
    "spaceComplexity": "O(1)",
    "explanation": "Checks parity."
  }
}"#;

#[test]
fn parses_model_reply() {
    let chart = FlowChart::from_json(PARITY).unwrap();
    assert_eq!(chart.nodes.len(), 5);
    assert_eq!(chart.edges.len(), 4);
    assert_eq!(chart.node("3").map(|n| n.node_type), Some(NodeType::Decision));
    assert_eq!(chart.meta.time_complexity, "O(1)");
    assert_eq!(chart.meta.explanation, "Checks parity.");
}

#[test]
fn outgoing_keeps_declaration_order() {
    let chart = FlowChart::from_json(PARITY).unwrap();
    let targets: Vec<&str> = chart.outgoing("3").map(|e| e.target.as_str()).collect();
    assert_eq!(targets, vec!["4", "5"]);
}

#[test]
fn missing_fields_default() {
    let chart =
        FlowChart::from_json(r#"{"nodes":[{"id":"1","type":"loop","label":"x"}]}"#).unwrap();
    let node = &chart.nodes[0];
    assert_eq!(node.node_type, NodeType::Default);
    assert_eq!(node.display_label(), "x");
    assert!(chart.edges.is_empty());
    assert_eq!(chart.meta, FlowMeta::default());
}

#[yare::parameterized(
    loop_type = { "loop" },
    process_type = { "process" },
    capitalized = { "Decision" },
)]
fn unknown_node_type_is_default(kind: &str) {
    let json = format!(r#"{{"id":"n","type":"{kind}","label":"step"}}"#);
    let node: FlowNode = serde_json::from_str(&json).unwrap();
    assert_eq!(node.node_type, NodeType::Default);
}

#[yare::parameterized(
    input = { "input", NodeType::Input },
    default = { "default", NodeType::Default },
    decision = { "decision", NodeType::Decision },
    output = { "output", NodeType::Output },
)]
fn known_node_types_parse(kind: &str, expected: NodeType) {
    let json = format!(r#"{{"id":"n","type":"{kind}"}}"#);
    let node: FlowNode = serde_json::from_str(&json).unwrap();
    assert_eq!(node.node_type, expected);
    assert_eq!(node.node_type.to_string(), kind);
}

#[test]
fn rejects_non_object_reply() {
    assert!(FlowChart::from_json("not json").is_err());
    assert!(FlowChart::from_json("[]").is_err());
}

#[test]
fn serializes_back_to_camel_case_meta() {
    let chart = FlowChart {
        nodes: vec![FlowNode::new("1", NodeType::Input, "Start")],
        edges: vec![FlowEdge::new("1", "2").labeled("True")],
        meta: FlowMeta { time_complexity: "O(n)".into(), ..FlowMeta::default() },
    };
    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["meta"]["timeComplexity"], "O(n)");
    assert_eq!(json["nodes"][0]["type"], "input");
    assert_eq!(json["nodes"][0]["data"]["label"], "Start");
    assert_eq!(json["edges"][0]["id"], "e1-2");
    assert_eq!(json["edges"][0]["label"], "True");
}

#[test]
fn unlabeled_edge_omits_label() {
    let json = serde_json::to_value(FlowEdge::new("a", "b")).unwrap();
    assert!(json.get("label").is_none());
}

#[yare::parameterized(
    capital = { Some("True"), true },
    lower = { Some("true"), true },
    false_label = { Some("False"), false },
    other = { Some("yes"), false },
    none = { None, false },
)]
fn true_branch_labels(label: Option<&str>, expected: bool) {
    let edge = FlowEdge { label: label.map(String::from), ..FlowEdge::new("a", "b") };
    assert_eq!(edge.is_true_branch(), expected);
}
