// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String literal lexing: quotes, prefixes, escapes and triple quotes.

use crate::lexer::Lexer;
use crate::token::TokenKind;

fn plain(s: &str) -> TokenKind {
    TokenKind::Str { value: s.into(), fstring: false }
}

fn fstr(s: &str) -> TokenKind {
    TokenKind::Str { value: s.into(), fstring: true }
}

lex_tests! {
    single_quoted: "'hello'" => [plain("hello"), TokenKind::Newline],
    double_quoted: "\"hello\"" => [plain("hello"), TokenKind::Newline],
    empty_string: "''" => [plain(""), TokenKind::Newline],
    other_quote_inside: "\"it's\"" => [plain("it's"), TokenKind::Newline],
    escaped_quote: "'it\\'s'" => [plain("it's"), TokenKind::Newline],
    newline_escape: "'a\\nb'" => [plain("a\nb"), TokenKind::Newline],
    tab_escape: "'a\\tb'" => [plain("a\tb"), TokenKind::Newline],
    unknown_escape_kept: "'\\d+'" => [plain("\\d+"), TokenKind::Newline],
    hex_escape: "'\\x41'" => [plain("A"), TokenKind::Newline],
    unicode_escape: "'\\u00e9'" => [plain("é"), TokenKind::Newline],
    raw_string: "r'\\n'" => [plain("\\n"), TokenKind::Newline],
    raw_escaped_quote: "r'\\''" => [plain("\\'"), TokenKind::Newline],
    triple_quoted: "'''a\nb'''" => [plain("a\nb"), TokenKind::Newline],
    triple_with_inner_quotes: "\"\"\"say \"hi\" \"\"\"" => [plain("say \"hi\" "), TokenKind::Newline],
    empty_triple: "''''''" => [plain(""), TokenKind::Newline],
}

lex_tests! {
    fstring_prefix: "f'{x}'" => [fstr("{x}"), TokenKind::Newline],
    fstring_upper_prefix: "F\"{x}\"" => [fstr("{x}"), TokenKind::Newline],
    raw_fstring: "rf'{x}\\n'" => [fstr("{x}\\n"), TokenKind::Newline],
    fr_fstring: "fR'{x}'" => [fstr("{x}"), TokenKind::Newline],
    fstring_with_inner_quotes: "f\"{d['k']}\"" => [fstr("{d['k']}"), TokenKind::Newline],
    name_f_not_prefix: "f = 1" => [
        TokenKind::Name("f".into()),
        TokenKind::Assign,
        TokenKind::Int(1),
        TokenKind::Newline,
    ],
}

span_tests! {
    string_span_includes_quotes: "'ab'" => [(0, 4), (4, 4)],
    prefixed_string_span_includes_prefix: "f'ab'" => [(0, 5), (5, 5)],
}
