// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lexer error scenarios.

use crate::lexer::{Lexer, LexerError};
use crate::token::Span;

lex_error_tests! {
    unterminated_single: "'abc" => LexerError::UnterminatedString { .. },
    unterminated_at_newline: "x = 'abc\ny = 1" => LexerError::UnterminatedString { .. },
    unterminated_triple: "'''abc" => LexerError::UnterminatedString { .. },
    invalid_character: "x = $" => LexerError::UnexpectedChar { ch: '$', .. },
    lone_bang: "!x" => LexerError::UnexpectedChar { ch: '!', .. },
    stray_closer: "x)" => LexerError::UnmatchedBracket { ch: ')', .. },
    mismatched_closer: "(x]" => LexerError::UnmatchedBracket { ch: ']', .. },
    inconsistent_dedent: "if a:\n    b\n  c\n" => LexerError::InconsistentDedent { .. },
    int_overflow: "99999999999999999999" => LexerError::InvalidNumber { .. },
    trailing_underscore: "1_" => LexerError::InvalidNumber { .. },
    bad_hex: "0xzz" => LexerError::InvalidNumber { .. },
}

#[test]
fn unterminated_string_span_starts_at_quote() {
    let err = Lexer::tokenize("x = 'abc\n").unwrap_err();
    assert_eq!(err.span(), Span::new(4, 8));
}

#[test]
fn unexpected_char_message() {
    let err = Lexer::tokenize("a ? b").unwrap_err();
    assert_eq!(err.to_string(), "invalid character '?' at position 2");
}

#[test]
fn unclosed_bracket_is_left_for_the_parser() {
    assert!(Lexer::tokenize("print(1,").is_ok());
}
