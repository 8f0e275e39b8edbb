// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::ast::*;
use crate::parser::Parser;
use crate::ParseError;

fn parts(source: &str) -> Vec<FStringPart> {
    match Parser::parse_expression(source).unwrap().kind {
        ExprKind::FString(parts) => parts,
        other => panic!("expected f-string, got {other:?}"),
    }
}

fn literal(text: &str) -> FStringPart {
    FStringPart::Literal(text.to_string())
}

#[test]
fn literal_and_fields() {
    let parts = parts("f'a {x} b'");
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], literal("a "));
    assert!(matches!(&parts[1], FStringPart::Field { conversion: None, format_spec: None, .. }));
    assert_eq!(parts[2], literal(" b"));
}

#[test]
fn doubled_braces_are_literal() {
    assert_eq!(parts("f'{{x}}'"), vec![literal("{x}")]);
}

#[test]
fn conversion_and_format_spec() {
    let parts = parts("f'{value!r:>10}'");
    let [FStringPart::Field { conversion, format_spec, .. }] = parts.as_slice() else {
        panic!("expected one field");
    };
    assert_eq!(*conversion, Some('r'));
    assert_eq!(format_spec.as_deref(), Some(">10"));
}

#[test]
fn not_equal_is_not_a_conversion() {
    let parts = parts("f'{a != b}'");
    let [FStringPart::Field { value, conversion: None, .. }] = parts.as_slice() else {
        panic!("expected one field");
    };
    assert!(matches!(value.kind, ExprKind::Compare { .. }));
}

#[test]
fn nested_brackets_and_strings_in_field() {
    let parts = parts("f\"{d['}'][0]:^5}\"");
    let [FStringPart::Field { value, format_spec, .. }] = parts.as_slice() else {
        panic!("expected one field");
    };
    assert!(matches!(value.kind, ExprKind::Subscript { .. }));
    assert_eq!(format_spec.as_deref(), Some("^5"));
}

#[test]
fn debug_field_emits_source_text() {
    let parts = parts("f'{n=}'");
    assert_eq!(parts[0], literal("n="));
    assert!(matches!(&parts[1], FStringPart::Field { conversion: Some('r'), .. }));
}

#[test]
fn plain_string_joined_with_fstring() {
    let parts = parts("'x=' f'{x}'");
    assert_eq!(parts[0], literal("x="));
    assert_eq!(parts.len(), 2);
}

#[test]
fn field_spans_point_at_the_string() {
    let expr = Parser::parse_expression("f'{a + b}'").unwrap();
    let ExprKind::FString(parts) = &expr.kind else {
        panic!("expected f-string");
    };
    let [FStringPart::Field { value, .. }] = parts.as_slice() else {
        panic!("expected one field");
    };
    assert_eq!(value.span, expr.span);
}

#[yare::parameterized(
    single_close = { "f'a } b'" },
    unclosed_field = { "f'{x'" },
    empty_field = { "f'{}'" },
    bad_conversion = { "f'{x!z}'" },
)]
fn malformed(source: &str) {
    let err = Parser::parse_expression(source).unwrap_err();
    assert!(matches!(err, ParseError::InvalidSyntax { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("f-string: "), "{err}");
}

#[test]
fn nested_spec_fields_are_unsupported() {
    let err = Parser::parse_expression("f'{x:{width}}'").unwrap_err();
    assert!(matches!(err, ParseError::Unsupported { .. }), "got {err:?}");
}
