// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::flowchart::{FlowEdge, FlowNode};

fn chart(nodes: &[(&str, NodeType)], edges: Vec<FlowEdge>) -> FlowChart {
    FlowChart {
        nodes: nodes.iter().map(|(id, t)| FlowNode::new(*id, *t, *id)).collect(),
        edges,
        ..FlowChart::default()
    }
}

fn position(positions: &[NodePosition], id: &str) -> (i32, i32) {
    let p = positions.iter().find(|p| p.id == id).unwrap();
    (p.x, p.y)
}

#[test]
fn empty_chart_has_no_positions() {
    assert!(layout(&FlowChart::default()).is_empty());
}

#[test]
fn sequential_flow_stays_centered() {
    let chart = chart(
        &[("1", NodeType::Input), ("2", NodeType::Default), ("3", NodeType::Output)],
        vec![FlowEdge::new("1", "2"), FlowEdge::new("2", "3")],
    );
    let positions = layout(&chart);
    assert_eq!(position(&positions, "1"), (400, 80));
    assert_eq!(position(&positions, "2"), (400, 230));
    assert_eq!(position(&positions, "3"), (400, 380));
    assert_eq!(positions[2].depth, 2);
}

#[test]
fn decision_puts_false_left_and_true_right() {
    let chart = chart(
        &[("1", NodeType::Decision), ("yes", NodeType::Output), ("no", NodeType::Output)],
        vec![FlowEdge::new("1", "yes").labeled("True"), FlowEdge::new("1", "no").labeled("False")],
    );
    let positions = layout(&chart);
    assert_eq!(position(&positions, "no"), (100, 230));
    assert_eq!(position(&positions, "yes"), (700, 380));
}

#[test]
fn non_decision_with_two_children_does_not_branch() {
    let chart = chart(
        &[("1", NodeType::Default), ("a", NodeType::Default), ("b", NodeType::Default)],
        vec![FlowEdge::new("1", "a").labeled("True"), FlowEdge::new("1", "b")],
    );
    let positions = layout(&chart);
    assert_eq!(position(&positions, "a").0, 400);
    assert_eq!(position(&positions, "b").0, 400);
}

#[test]
fn loop_back_edge_is_visited_once() {
    let chart = chart(
        &[("c", NodeType::Decision), ("body", NodeType::Default), ("end", NodeType::Output)],
        vec![
            FlowEdge::new("c", "body").labeled("True"),
            FlowEdge::new("body", "c"),
            FlowEdge::new("c", "end").labeled("False"),
        ],
    );
    let positions = layout(&chart);
    assert_eq!(position(&positions, "c"), (400, 80));
    assert_eq!(position(&positions, "end"), (100, 230));
    assert_eq!(position(&positions, "body"), (700, 380));
}

#[test]
fn unreachable_node_sits_at_origin_row() {
    let chart = chart(&[("1", NodeType::Input), ("orphan", NodeType::Default)], Vec::new());
    assert_eq!(position(&layout(&chart), "orphan"), (CENTER_X, 0));
}

#[test]
fn positions_follow_node_order() {
    let chart = chart(
        &[("b", NodeType::Default), ("a", NodeType::Default)],
        vec![FlowEdge::new("b", "a")],
    );
    let ids: Vec<String> = layout(&chart).into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["b", "a"]);
}
