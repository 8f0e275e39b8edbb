// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::exec::{repr, Range};

fn render(result: Result<Value, ExecError>) -> String {
    match result {
        Ok(value) => repr(&value),
        Err(err) => err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Integer division
// ---------------------------------------------------------------------------

#[yare::parameterized(
    positive = { 7, 2, 3, 1 },
    negative_dividend = { -7, 2, -4, 1 },
    negative_divisor = { 7, -2, -4, -1 },
    both_negative = { -7, -2, 3, -1 },
    exact = { -6, 3, -2, 0 },
)]
fn floor_division_rounds_toward_negative_infinity(a: i64, b: i64, quotient: i64, remainder: i64) {
    assert_eq!(floor_div(a, b), Some(quotient));
    assert_eq!(floor_mod(a, b), Some(remainder));
}

#[test]
fn floor_division_overflow_is_none() {
    assert_eq!(floor_div(i64::MIN, -1), None);
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

#[yare::parameterized(
    int_add = { BinOp::Add, Value::Int(2), Value::Int(3), "5" },
    bool_is_int = { BinOp::Add, Value::Bool(true), Value::Int(1), "2" },
    float_promotion = { BinOp::Mul, Value::Int(2), Value::Float(1.5), "3.0" },
    true_division = { BinOp::Div, Value::Int(7), Value::Int(2), "3.5" },
    float_floor_division = { BinOp::FloorDiv, Value::Float(7.5), Value::Int(2), "3.0" },
    float_modulo_sign = { BinOp::Mod, Value::Float(-1.0), Value::Int(3), "2.0" },
    negative_power = { BinOp::Pow, Value::Int(2), Value::Int(-1), "0.5" },
    string_repeat = { BinOp::Mul, Value::str("ab"), Value::Int(2), "'abab'" },
    repeat_negative = { BinOp::Mul, Value::Int(-1), Value::str("ab"), "''" },
    empty_list_huge_repeat = { BinOp::Mul, Value::list(vec![]), Value::Int(i64::MAX), "[]" },
    empty_string_huge_repeat = { BinOp::Mul, Value::str(""), Value::Int(i64::MAX), "''" },
    list_repeat_past_cap = {
        BinOp::Mul,
        Value::list(vec![Value::Int(1)]),
        Value::Int(1 << 25),
        "MemoryError"
    },
    string_repeat_unaddressable = {
        BinOp::Mul,
        Value::str("ab"),
        Value::Int(i64::MAX),
        "OverflowError: repeated string is too long"
    },
    tuple_concat = {
        BinOp::Add,
        Value::tuple(vec![Value::Int(1)]),
        Value::tuple(vec![Value::Int(2)]),
        "(1, 2)"
    },
    int_overflow = { BinOp::Mul, Value::Int(i64::MAX), Value::Int(2), "OverflowError: integer overflow" },
    power_overflow = { BinOp::Pow, Value::Int(10), Value::Int(40), "OverflowError: integer overflow" },
    zero_negative_power = {
        BinOp::Pow,
        Value::Int(0),
        Value::Int(-1),
        "ZeroDivisionError: 0.0 cannot be raised to a negative power"
    },
    int_floor_division_by_zero = {
        BinOp::FloorDiv,
        Value::Int(1),
        Value::Int(0),
        "ZeroDivisionError: integer division or modulo by zero"
    },
    list_plus_int = {
        BinOp::Add,
        Value::list(Vec::new()),
        Value::Int(1),
        "TypeError: can only concatenate list (not \"int\") to list"
    },
    none_times_none = {
        BinOp::Mul,
        Value::None,
        Value::None,
        "TypeError: unsupported operand type(s) for *: 'NoneType' and 'NoneType'"
    },
)]
fn binary_operations(op: BinOp, left: Value, right: Value, expected: &str) {
    assert_eq!(render(binary(op, &left, &right)), expected);
}

#[test]
fn string_modulo_formats() {
    let out = binary(BinOp::Mod, &Value::str("%s!"), &Value::str("hi")).unwrap();
    assert_eq!(out.as_str(), Some("hi!"));
}

#[yare::parameterized(
    negate = { UnaryOp::Neg, Value::Int(3), "-3" },
    negate_bool = { UnaryOp::Neg, Value::Bool(true), "-1" },
    not_empty_list = { UnaryOp::Not, Value::list(Vec::new()), "True" },
    negate_min = { UnaryOp::Neg, Value::Int(i64::MIN), "OverflowError: integer overflow" },
    negate_string = { UnaryOp::Neg, Value::str("a"), "TypeError: bad operand type for unary -: 'str'" },
)]
fn unary_operations(op: UnaryOp, operand: Value, expected: &str) {
    assert_eq!(render(unary(op, &operand)), expected);
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[test]
fn numeric_equality_crosses_types() {
    assert!(equals(&Value::Int(1), &Value::Float(1.0)));
    assert!(equals(&Value::Bool(true), &Value::Int(1)));
    assert!(!equals(&Value::Int(1), &Value::str("1")));
    assert!(!equals(&Value::Float(f64::NAN), &Value::Float(f64::NAN)));
}

#[test]
fn container_equality_is_structural() {
    let a = Value::list(vec![Value::Int(1), Value::tuple(vec![Value::str("x")])]);
    let b = Value::list(vec![Value::Int(1), Value::tuple(vec![Value::str("x")])]);
    assert!(equals(&a, &b));
    assert!(!identical(&a, &b));
    assert!(identical(&a, &a.clone()));
}

#[test]
fn sequences_order_lexicographically() {
    let short = Value::list(vec![Value::Int(1), Value::Int(2)]);
    let long = Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(0)]);
    assert!(compare(CmpOp::Lt, &short, &long).unwrap());
    assert!(compare(CmpOp::Gt, &Value::str("b"), &Value::str("abc")).unwrap());
}

#[test]
fn mixed_ordering_is_a_type_error() {
    let err = compare(CmpOp::LtE, &Value::str("a"), &Value::Int(1)).unwrap_err();
    assert_eq!(err.to_string(), "TypeError: '<=' not supported between instances of 'str' and 'int'");
}

#[yare::parameterized(
    start = { 0, true },
    on_step = { 9, true },
    between_steps = { 4, false },
    stop_excluded = { 12, false },
    before_start = { -3, false },
)]
fn range_membership(n: i64, expected: bool) {
    let range = Value::Range(Range { start: 0, stop: 12, step: 3 });
    assert_eq!(contains(&range, &Value::Int(n)).unwrap(), expected);
}

#[test]
fn descending_range_membership() {
    let range = Value::Range(Range { start: 10, stop: 0, step: -2 });
    assert!(contains(&range, &Value::Int(10)).unwrap());
    assert!(contains(&range, &Value::Int(2)).unwrap());
    assert!(!contains(&range, &Value::Int(0)).unwrap());
    assert!(!contains(&range, &Value::Int(5)).unwrap());
}

#[test]
fn substring_membership_requires_string() {
    assert!(contains(&Value::str("hello"), &Value::str("ell")).unwrap());
    let err = contains(&Value::str("hello"), &Value::Int(1)).unwrap_err();
    assert_eq!(err.to_string(), "TypeError: 'in <string>' requires string as left operand, not int");
}
