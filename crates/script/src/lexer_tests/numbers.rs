// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Numeric literal lexing.

use crate::lexer::{Lexer, LexerError};
use crate::token::TokenKind;

fn single(input: &str) -> TokenKind {
    let tokens = Lexer::tokenize(input).unwrap();
    tokens[0].kind.clone()
}

#[yare::parameterized(
    zero = { "0", 0 },
    plain = { "42", 42 },
    underscores = { "1_000_000", 1_000_000 },
    hex = { "0xff", 255 },
    octal = { "0o17", 15 },
    binary = { "0b1010", 10 },
)]
fn integer_literals(input: &str, expected: i64) {
    assert_eq!(single(input), TokenKind::Int(expected));
}

#[yare::parameterized(
    decimal = { "3.14", 3.14 },
    leading_dot = { ".5", 0.5 },
    trailing_dot = { "2.", 2.0 },
    exponent = { "1e3", 1000.0 },
    signed_exponent = { "2.5e-1", 0.25 },
)]
fn float_literals(input: &str, expected: f64) {
    assert_eq!(single(input), TokenKind::Float(expected));
}

#[test]
fn name_after_e_is_not_an_exponent() {
    let result = Lexer::tokenize("1else");
    assert!(matches!(result, Err(LexerError::InvalidNumber { .. })), "{result:?}");
}

#[test]
fn method_call_on_parenthesized_int() {
    let kinds: Vec<_> = Lexer::tokenize("(1).x").unwrap().into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds[1], TokenKind::Int(1));
    assert_eq!(kinds[3], TokenKind::Dot);
}
