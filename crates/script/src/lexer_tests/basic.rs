// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Basic lexer tests: names, keywords, operators, comments, line joining.

use crate::lexer::Lexer;
use crate::token::{AugOp, Keyword, TokenKind};

fn name(s: &str) -> TokenKind {
    TokenKind::Name(s.into())
}

lex_tests! {
    empty_input: "" => [],
    whitespace_only: "   \t  " => [],
    comment_only: "# nothing here" => [],
    blank_lines_only: "\n\n\n" => [],
}

lex_tests! {
    single_name: "x" => [name("x"), TokenKind::Newline],
    assignment: "total = 0" => [
        name("total"),
        TokenKind::Assign,
        TokenKind::Int(0),
        TokenKind::Newline,
    ],
    keyword_await: "await input()" => [
        TokenKind::Keyword(Keyword::Await),
        name("input"),
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::Newline,
    ],
    unicode_name: "größe = 1" => [
        name("größe"),
        TokenKind::Assign,
        TokenKind::Int(1),
        TokenKind::Newline,
    ],
    trailing_comment: "x = 1  # set x" => [
        name("x"),
        TokenKind::Assign,
        TokenKind::Int(1),
        TokenKind::Newline,
    ],
}

lex_tests! {
    comparison_operators: "a == b != c <= d >= e < f > g" => [
        name("a"), TokenKind::EqEq,
        name("b"), TokenKind::NotEq,
        name("c"), TokenKind::LtE,
        name("d"), TokenKind::GtE,
        name("e"), TokenKind::Lt,
        name("f"), TokenKind::Gt,
        name("g"),
        TokenKind::Newline,
    ],
    arithmetic_operators: "a + b - c * d / e // f % g ** h" => [
        name("a"), TokenKind::Plus,
        name("b"), TokenKind::Minus,
        name("c"), TokenKind::Star,
        name("d"), TokenKind::Slash,
        name("e"), TokenKind::DoubleSlash,
        name("f"), TokenKind::Percent,
        name("g"), TokenKind::DoubleStar,
        name("h"),
        TokenKind::Newline,
    ],
    augmented_assignments: "a += 1; b //= 2; c **= 3" => [
        name("a"), TokenKind::AugAssign(AugOp::Add), TokenKind::Int(1), TokenKind::Semi,
        name("b"), TokenKind::AugAssign(AugOp::FloorDiv), TokenKind::Int(2), TokenKind::Semi,
        name("c"), TokenKind::AugAssign(AugOp::Pow), TokenKind::Int(3),
        TokenKind::Newline,
    ],
    arrow_annotation: "def f() -> int: pass" => [
        TokenKind::Keyword(Keyword::Def),
        name("f"),
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::Arrow,
        name("int"),
        TokenKind::Colon,
        TokenKind::Keyword(Keyword::Pass),
        TokenKind::Newline,
    ],
    attribute_access: "sys.stdout" => [
        name("sys"),
        TokenKind::Dot,
        name("stdout"),
        TokenKind::Newline,
    ],
}

lex_tests! {
    newlines_inside_brackets_are_ignored: "xs = [\n    1,\n    2,\n]\n" => [
        name("xs"),
        TokenKind::Assign,
        TokenKind::LBracket,
        TokenKind::Int(1),
        TokenKind::Comma,
        TokenKind::Int(2),
        TokenKind::Comma,
        TokenKind::RBracket,
        TokenKind::Newline,
    ],
    backslash_continuation: "x = 1 + \\\n    2\n" => [
        name("x"),
        TokenKind::Assign,
        TokenKind::Int(1),
        TokenKind::Plus,
        TokenKind::Int(2),
        TokenKind::Newline,
    ],
    crlf_line_endings: "a\r\nb\r\n" => [
        name("a"),
        TokenKind::Newline,
        name("b"),
        TokenKind::Newline,
    ],
}

span_tests! {
    names_and_final_newline_span: "ab cd" => [(0, 2), (3, 5), (5, 5)],
    operator_spans: "a//=b" => [(0, 1), (1, 4), (4, 5), (5, 5)],
    newline_span: "a\nb" => [(0, 1), (1, 2), (2, 3), (3, 3)],
}
