// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use algo_core::layout;
use algo_core::test_support::parity_chart;
use serial_test::serial;

fn plain() {
    std::env::set_var("NO_COLOR", "1");
}

#[yare::parameterized(
    stdout = { StreamKind::Stdout, true, Destination::Stdout },
    stderr = { StreamKind::Stderr, true, Destination::Stderr },
    info = { StreamKind::Info, false, Destination::Stderr },
    success = { StreamKind::Success, false, Destination::Stderr },
    failure = { StreamKind::Failure, false, Destination::Stderr },
    piped_input = { StreamKind::Input, true, Destination::Stdout },
    typed_input = { StreamKind::Input, false, Destination::Hidden },
)]
fn destinations(kind: StreamKind, echo_input: bool, expected: Destination) {
    assert_eq!(destination(kind, echo_input), expected);
}

#[test]
#[serial]
fn printer_splits_streams() {
    plain();
    let mut printer = Printer::new(Vec::new(), Vec::new(), true);
    printer
        .print(&[
            OutputRecord::stdout("Name: "),
            OutputRecord::new(StreamKind::Input, "Bob"),
            OutputRecord::stdout("Hi Bob\n"),
            OutputRecord::new(StreamKind::Stderr, "warn\n"),
            OutputRecord::failure("ValueError: bad"),
        ])
        .unwrap();

    let (out, err) = printer.into_inner();
    assert_eq!(String::from_utf8(out).unwrap(), "Name: Bob\nHi Bob\n");
    assert_eq!(String::from_utf8(err).unwrap(), "warn\nValueError: bad\n");
}

#[test]
#[serial]
fn printer_hides_typed_input() {
    plain();
    let mut printer = Printer::new(Vec::new(), Vec::new(), false);
    printer.print(&[OutputRecord::new(StreamKind::Input, "Bob")]).unwrap();
    let (out, err) = printer.into_inner();
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn format_from_flag() {
    assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
    assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Text);
}

// ---------------------------------------------------------------------------
// Flowcharts
// ---------------------------------------------------------------------------

#[test]
fn flowchart_json_merges_positions() {
    let chart = parity_chart();
    let value = flowchart_json(&chart, &layout(&chart), true);

    assert_eq!(value["cached"], json!(true));
    assert_eq!(value["nodes"][0]["id"], json!("1"));
    assert_eq!(value["nodes"][0]["position"], json!({ "x": 400, "y": 80 }));
    assert_eq!(value["nodes"][2]["position"], json!({ "x": 700, "y": 530 }));
    assert_eq!(value["nodes"][3]["position"], json!({ "x": 100, "y": 380 }));
    assert_eq!(value["edges"][1]["label"], json!("True"));
    assert_eq!(value["meta"]["timeComplexity"], json!("O(1)"));
}

#[test]
#[serial]
fn flowchart_text_lists_nodes_edges_and_meta() {
    plain();
    let chart = parity_chart();
    let mut out = Vec::new();
    write_flowchart(&mut out, &chart, &layout(&chart), false).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("Flowchart: 4 nodes, 3 edges\n"), "{text}");
    assert!(text.contains("decision"));
    assert!(text.contains("(100, 380)"));
    assert!(text.contains("  2 -> 3  [True]\n"));
    assert!(text.contains("  1 -> 2\n"));
    assert!(text.contains("Time: O(1)  Space: O(1)\n"));
    assert!(text.ends_with("Prints whether n is even.\n"));
}

#[test]
#[serial]
fn cached_flowchart_is_marked() {
    plain();
    let chart = parity_chart();
    let mut out = Vec::new();
    write_flowchart(&mut out, &chart, &layout(&chart), true).unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("Flowchart: 4 nodes, 3 edges (cached)\n"));
}
