// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parse_runs_validation() {
    let err = parse("def f():\n    pass\nreturn 1").unwrap_err();
    assert!(matches!(err, ParseError::Validation(ValidationError::ReturnOutsideFunction { .. })));
    assert_eq!(err.to_string(), "'return' outside function");
}

#[test]
fn parse_reports_first_validation_error() {
    let err = parse("break\ncontinue").unwrap_err();
    assert_eq!(err.to_string(), "'break' not properly in loop");
}

#[test]
fn parse_allows_top_level_await() {
    let module = parse("x = await f()").unwrap();
    assert_eq!(module.body.len(), 1);
}

#[test]
fn parse_error_diagnostic_points_at_line() {
    let source = "x = 1\nwhile True\n    pass";
    let err = parse(source).unwrap_err();
    let diagnostic = err.diagnostic(source).unwrap();
    assert!(diagnostic.contains("line 2"), "{diagnostic}");
}
