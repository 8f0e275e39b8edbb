// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parser error scenarios.

use crate::parse_error::ParseError;
use crate::parser::Parser;
use crate::LexerError;

parse_error_tests! {
    unclosed_call: "f(" => ParseError::UnexpectedToken { .. } | ParseError::UnexpectedEof { .. },
    missing_colon: "if x\n    y" => ParseError::UnexpectedToken { .. },
    missing_indent: "if x:\npass" => ParseError::ExpectedIndent { .. },
    leading_indent: "  x = 1" => ParseError::UnexpectedIndent { .. },
    literal_target: "1 = x" => ParseError::InvalidTarget { .. },
    call_target: "f() = 1" => ParseError::InvalidTarget { .. },
    augmented_tuple_target: "a, b += 1" => ParseError::InvalidTarget { .. },
    positional_after_keyword: "f(a=1, 2)" => ParseError::InvalidSyntax { .. },
    class_definition: "class A: pass" => ParseError::Unsupported { .. },
    variadic_params: "def f(*args): pass" => ParseError::Unsupported { .. },
    argument_unpacking: "f(*xs)" => ParseError::Unsupported { .. },
    dict_unpacking: "{**d}" => ParseError::Unsupported { .. },
    bare_async: "async x" => ParseError::Unsupported { .. },
    lexer_failure: "x = 'abc" => ParseError::Lexer(LexerError::UnterminatedString { .. }),
}

#[test]
fn invalid_target_names_the_form() {
    let err = Parser::parse("f() = 1").unwrap_err();
    let ParseError::InvalidTarget { what, .. } = err else {
        panic!("expected InvalidTarget, got {err:?}");
    };
    assert_eq!(what, "function call");
}

#[test]
fn trailing_tokens_after_expression() {
    let err = Parser::parse_expression("a b").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }), "got {err:?}");
}
