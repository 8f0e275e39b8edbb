// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::ast::*;
use crate::parser::Parser;

fn expr(source: &str) -> ExprKind {
    Parser::parse_expression(source).unwrap().kind
}

fn name(id: &str) -> ExprKind {
    ExprKind::Name(id.to_string())
}

fn int(n: i64) -> ExprKind {
    ExprKind::Constant(Constant::Int(n))
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let ExprKind::BinOp { left, op: BinOp::Add, right } = expr("1 + 2 * 3") else {
        panic!("expected addition at the root");
    };
    assert_eq!(left.kind, int(1));
    assert!(matches!(right.kind, ExprKind::BinOp { op: BinOp::Mul, .. }));
}

#[test]
fn subtraction_is_left_associative() {
    let ExprKind::BinOp { left, op: BinOp::Sub, right } = expr("a - b - c") else {
        panic!("expected subtraction");
    };
    assert!(matches!(left.kind, ExprKind::BinOp { op: BinOp::Sub, .. }));
    assert_eq!(right.kind, name("c"));
}

#[test]
fn power_is_right_associative_and_binds_above_unary() {
    let ExprKind::UnaryOp { op: UnaryOp::Neg, operand } = expr("-a ** b ** c") else {
        panic!("expected negation at the root");
    };
    let ExprKind::BinOp { op: BinOp::Pow, right, .. } = &operand.kind else {
        panic!("expected power");
    };
    assert!(matches!(right.kind, ExprKind::BinOp { op: BinOp::Pow, .. }));
}

#[test]
fn not_binds_looser_than_comparison() {
    let ExprKind::UnaryOp { op: UnaryOp::Not, operand } = expr("not a == b") else {
        panic!("expected not");
    };
    assert!(matches!(operand.kind, ExprKind::Compare { .. }));
}

#[test]
fn boolean_chains_flatten() {
    let ExprKind::BoolOp { op: BoolOp::Or, values } = expr("a or b or c and d") else {
        panic!("expected or");
    };
    assert_eq!(values.len(), 3);
    assert!(matches!(values[2].kind, ExprKind::BoolOp { op: BoolOp::And, .. }));
}

#[test]
fn chained_comparison() {
    let ExprKind::Compare { ops, comparators, .. } = expr("a < b is not c not in d") else {
        panic!("expected comparison");
    };
    assert_eq!(ops, vec![CmpOp::Lt, CmpOp::IsNot, CmpOp::NotIn]);
    assert_eq!(comparators.len(), 3);
}

#[test]
fn conditional_expression() {
    let ExprKind::IfExp { test, body, orelse } = expr("x if y else z") else {
        panic!("expected conditional");
    };
    assert_eq!(test.kind, name("y"));
    assert_eq!(body.kind, name("x"));
    assert_eq!(orelse.kind, name("z"));
}

#[test]
fn await_binds_to_primary() {
    let ExprKind::BinOp { left, op: BinOp::Add, .. } = expr("await f(x) + 1") else {
        panic!("expected addition");
    };
    let ExprKind::Await(inner) = &left.kind else {
        panic!("expected await");
    };
    assert!(matches!(inner.kind, ExprKind::Call { .. }));
}

#[test]
fn call_with_keywords() {
    let ExprKind::Call { func, args, keywords } = expr("print(a, b, sep='-', end='')") else {
        panic!("expected call");
    };
    assert_eq!(func.kind, name("print"));
    assert_eq!(args.len(), 2);
    let names: Vec<&str> = keywords.iter().map(|k| k.arg.as_str()).collect();
    assert_eq!(names, vec!["sep", "end"]);
}

#[test]
fn generator_as_sole_argument() {
    let ExprKind::Call { args, .. } = expr("sum(x * x for x in xs)") else {
        panic!("expected call");
    };
    assert!(matches!(args[0].kind, ExprKind::GeneratorExp { .. }));
}

#[test]
fn trailers_chain_left_to_right() {
    let ExprKind::Call { func, .. } = expr("a.b[0].c()") else {
        panic!("expected call");
    };
    let ExprKind::Attribute { value, attr } = &func.kind else {
        panic!("expected attribute");
    };
    assert_eq!(attr, "c");
    assert!(matches!(value.kind, ExprKind::Subscript { .. }));
}

#[yare::parameterized(
    full = { "s[1:2:3]", true, true, true },
    open_start = { "s[:2]", false, true, false },
    open_end = { "s[1:]", true, false, false },
    step_only = { "s[::2]", false, false, true },
    everything = { "s[:]", false, false, false },
)]
fn slices(source: &str, has_lower: bool, has_upper: bool, has_step: bool) {
    let ExprKind::Subscript { index, .. } = expr(source) else {
        panic!("expected subscript");
    };
    let ExprKind::Slice { lower, upper, step } = &index.kind else {
        panic!("expected slice");
    };
    assert_eq!(lower.is_some(), has_lower);
    assert_eq!(upper.is_some(), has_upper);
    assert_eq!(step.is_some(), has_step);
}

#[yare::parameterized(
    empty_tuple = { "()", 0 },
    single_tuple = { "(1,)", 1 },
    bare_tuple = { "1, 2, 3", 3 },
    trailing_comma = { "1, 2,", 2 },
)]
fn tuples(source: &str, len: usize) {
    let ExprKind::Tuple(items) = expr(source) else {
        panic!("expected tuple for {source:?}");
    };
    assert_eq!(items.len(), len);
}

#[test]
fn parenthesized_expression_is_not_a_tuple() {
    assert_eq!(expr("(x)"), name("x"));
}

#[test]
fn displays() {
    assert!(matches!(expr("[]"), ExprKind::List(items) if items.is_empty()));
    assert!(matches!(expr("{}"), ExprKind::Dict(pairs) if pairs.is_empty()));
    assert!(matches!(expr("{1, 2}"), ExprKind::Set(items) if items.len() == 2));
    assert!(matches!(expr("{'a': 1, 'b': 2,}"), ExprKind::Dict(pairs) if pairs.len() == 2));
}

#[test]
fn comprehensions() {
    let ExprKind::ListComp { generators, .. } = expr("[x for row in m for x in row if x if x > 1]") else {
        panic!("expected list comprehension");
    };
    assert_eq!(generators.len(), 2);
    assert_eq!(generators[1].ifs.len(), 2);
    assert!(matches!(expr("{k: v for k, v in d}"), ExprKind::DictComp { .. }));
    assert!(matches!(expr("{x for x in s}"), ExprKind::SetComp { .. }));
    assert!(matches!(expr("(x for x in s)"), ExprKind::GeneratorExp { .. }));
}

#[test]
fn lambda_with_default() {
    let ExprKind::Lambda { params, body } = expr("lambda a, b=1: a + b") else {
        panic!("expected lambda");
    };
    assert_eq!(params.len(), 2);
    assert!(params[1].default.is_some());
    assert!(matches!(body.kind, ExprKind::BinOp { .. }));
}

#[test]
fn adjacent_strings_concatenate() {
    assert_eq!(expr("'a' \"b\" 'c'"), ExprKind::Constant(Constant::Str("abc".into())));
}

#[test]
fn keyword_constants() {
    assert_eq!(expr("None"), ExprKind::Constant(Constant::None));
    assert_eq!(expr("True"), ExprKind::Constant(Constant::Bool(true)));
    assert_eq!(expr("2.5"), ExprKind::Constant(Constant::Float(2.5)));
}
