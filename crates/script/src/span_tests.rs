// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn merge_covers_both_spans() {
    let merged = Span::new(4, 8).merge(Span::new(1, 5));
    assert_eq!(merged, Span::new(1, 8));
}

#[test]
fn shifted_moves_both_ends() {
    assert_eq!(Span::new(2, 5).shifted(10), Span::new(12, 15));
}

#[test]
fn slice_out_of_bounds_is_empty() {
    assert_eq!(Span::new(3, 40).slice("abc"), "");
    assert_eq!(Span::new(0, 3).slice("abcdef"), "abc");
}

#[yare::parameterized(
    first_line = { "x = 1\ny = 2", 0, (1, 0) },
    second_line = { "x = 1\ny = 2", 6, (2, 0) },
    mid_line = { "x = 1\ny = 2", 10, (2, 4) },
    past_end = { "ab", 10, (1, 2) },
)]
fn locate_span_reports_line_and_column(source: &str, start: usize, expected: (usize, usize)) {
    let (line, col, _) = locate_span(source, Span::empty(start));
    assert_eq!((line, col), expected);
}

#[test]
fn diagnostic_points_at_column() {
    let source = "x = 1\nprint(x))";
    let rendered = diagnostic_context(source, Span::new(14, 15), "unexpected token ')'");
    assert!(rendered.starts_with("error: unexpected token ')'"));
    assert!(rendered.contains("--> line 2, column 9"));
    assert!(rendered.contains("  2 | print(x))"));
    assert!(rendered.ends_with("        ^"));
}
