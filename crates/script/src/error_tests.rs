// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::lexer::Lexer;

#[test]
fn error_span_is_exposed() {
    let err = LexerError::UnterminatedString { span: Span::new(4, 9) };
    assert_eq!(err.span(), Span::new(4, 9));
}

#[test]
fn diagnostic_includes_line_info() {
    let source = "x = 1\ny = 'oops\n";
    let err = Lexer::tokenize(source).unwrap_err();
    let diagnostic = err.diagnostic(source);
    assert!(diagnostic.contains("unterminated string literal"), "{diagnostic}");
    assert!(diagnostic.contains("line 2, column 5"), "{diagnostic}");
}
