// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Indentation tracking: INDENT/DEDENT emission and blank line handling.

use crate::lexer::Lexer;
use crate::token::{Keyword, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
}

fn structure(input: &str) -> String {
    kinds(input)
        .iter()
        .map(|k| match k {
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Newline => "NL",
            _ => "T",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn simple_block() {
    assert_eq!(structure("if x:\n    y\n"), "T T T NL INDENT T NL DEDENT");
}

#[test]
fn nested_blocks_close_at_eof() {
    assert_eq!(
        structure("while a:\n    if b:\n        c\n"),
        "T T T NL INDENT T T T NL INDENT T NL DEDENT DEDENT"
    );
}

#[test]
fn dedent_to_outer_level() {
    assert_eq!(
        structure("if a:\n    b\nc\n"),
        "T T T NL INDENT T NL DEDENT T NL"
    );
}

#[test]
fn multiple_dedents_on_one_line() {
    assert_eq!(
        structure("if a:\n  if b:\n    c\nd"),
        "T T T NL INDENT T T T NL INDENT T NL DEDENT DEDENT T NL"
    );
}

#[test]
fn blank_and_comment_lines_do_not_affect_indentation() {
    let source = "def f():\n    x = 1\n\n        # stray comment\n    return x\n";
    assert_eq!(
        structure(source),
        "T T T T T NL INDENT T T T NL T T NL DEDENT"
    );
}

#[test]
fn tab_counts_as_eight_columns() {
    assert_eq!(structure("if a:\n\tb\n        c\n"), "T T T NL INDENT T NL T NL DEDENT");
}

#[test]
fn missing_trailing_newline_is_synthesized() {
    let tokens = kinds("pass");
    assert_eq!(tokens, vec![TokenKind::Keyword(Keyword::Pass), TokenKind::Newline]);
}

#[test]
fn brackets_suppress_indentation() {
    assert_eq!(structure("f(a,\n        b)\nc\n"), "T T T T T T NL T NL");
}
