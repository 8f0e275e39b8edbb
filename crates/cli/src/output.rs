// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::color::{self, codes};
use algo_core::{FlowChart, NodePosition, OutputRecord, StreamKind};
use serde_json::{json, Value};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

// ── Run output ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Stderr,
    Hidden,
}

/// Program output goes to stdout; status lines go to stderr. Submitted
/// input is echoed only when the terminal did not already show it.
pub fn destination(kind: StreamKind, echo_input: bool) -> Destination {
    match kind {
        StreamKind::Stdout => Destination::Stdout,
        StreamKind::Input if echo_input => Destination::Stdout,
        StreamKind::Input => Destination::Hidden,
        StreamKind::Stderr | StreamKind::Info | StreamKind::Success | StreamKind::Failure => {
            Destination::Stderr
        }
    }
}

/// Terminal text for a record or a delta of one.
pub fn render(record: &OutputRecord) -> String {
    match record.kind {
        StreamKind::Stdout | StreamKind::Stderr => record.content.clone(),
        StreamKind::Input => format!("{}\n", record.content),
        StreamKind::Info => format!("{}\n", color::muted(&record.content)),
        StreamKind::Success => format!("{}\n", color::paint(codes::SUCCESS, &record.content)),
        StreamKind::Failure => format!("{}\n", color::paint(codes::FAILURE, &record.content)),
    }
}

/// Writes streamed records to a pair of terminal streams.
pub struct Printer<O, E> {
    out: O,
    err: E,
    echo_input: bool,
}

impl Printer<io::Stdout, io::Stderr> {
    pub fn terminal(echo_input: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), echo_input)
    }
}

impl<O: Write, E: Write> Printer<O, E> {
    pub fn new(out: O, err: E, echo_input: bool) -> Self {
        Self { out, err, echo_input }
    }

    pub fn print(&mut self, records: &[OutputRecord]) -> io::Result<()> {
        for record in records {
            match destination(record.kind, self.echo_input) {
                Destination::Stdout => self.out.write_all(render(record).as_bytes())?,
                Destination::Stderr => self.err.write_all(render(record).as_bytes())?,
                Destination::Hidden => {}
            }
        }
        self.out.flush()?;
        self.err.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

// ── Flowcharts ──────────────────────────────────────────────────────────

/// Chart JSON with each node's `position` merged in.
pub fn flowchart_json(chart: &FlowChart, positions: &[NodePosition], cached: bool) -> Value {
    let nodes: Vec<Value> = chart
        .nodes
        .iter()
        .zip(positions)
        .map(|(node, pos)| {
            let mut value = json!(node);
            value["position"] = json!({ "x": pos.x, "y": pos.y });
            value
        })
        .collect();
    json!({ "nodes": nodes, "edges": chart.edges, "meta": chart.meta, "cached": cached })
}

pub fn write_flowchart(
    w: &mut impl Write,
    chart: &FlowChart,
    positions: &[NodePosition],
    cached: bool,
) -> io::Result<()> {
    let suffix = if cached { " (cached)" } else { "" };
    writeln!(
        w,
        "{}{}",
        color::header(&format!("Flowchart: {} nodes, {} edges", chart.nodes.len(), chart.edges.len())),
        color::muted(suffix)
    )?;

    let label_w = chart.nodes.iter().map(|n| n.display_label().chars().count()).max().unwrap_or(0);
    for (node, pos) in chart.nodes.iter().zip(positions) {
        writeln!(
            w,
            "  {:>4}  {:<8}  {:<label_w$}  {}",
            node.id,
            node.node_type.to_string(),
            node.display_label(),
            color::context(&format!("({}, {})", pos.x, pos.y)),
        )?;
    }

    if !chart.edges.is_empty() {
        writeln!(w, "{}", color::header("Edges:"))?;
        for edge in &chart.edges {
            match &edge.label {
                Some(label) => writeln!(w, "  {} -> {}  [{}]", edge.source, edge.target, label)?,
                None => writeln!(w, "  {} -> {}", edge.source, edge.target)?,
            }
        }
    }

    let meta = &chart.meta;
    if !meta.time_complexity.is_empty() || !meta.space_complexity.is_empty() {
        writeln!(
            w,
            "{} {}  {} {}",
            color::literal("Time:"),
            meta.time_complexity,
            color::literal("Space:"),
            meta.space_complexity
        )?;
    }
    if !meta.explanation.is_empty() {
        writeln!(w, "{}", meta.explanation)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
