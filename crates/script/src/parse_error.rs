// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parser error types.

use super::lexer::LexerError;
use super::token::{diagnostic_context, Span, TokenKind};
use super::validation::ValidationError;
use thiserror::Error;

/// Parser errors for script syntax.
///
/// Use [`ParseError::diagnostic`] to render a snippet showing where the
/// error occurred.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("{0}")]
    Lexer(#[from] LexerError),

    #[error("unexpected {found} at position {}, expected {expected}", span.start)]
    UnexpectedToken { found: TokenKind, expected: String, span: Span },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("unexpected indent")]
    UnexpectedIndent { span: Span },

    #[error("expected an indented block after {after}")]
    ExpectedIndent { after: String, span: Span },

    #[error("cannot assign to {what}")]
    InvalidTarget { what: String, span: Span },

    #[error("{message}")]
    InvalidSyntax { message: String, span: Span },

    /// Valid Python that this engine deliberately does not implement.
    #[error("{feature} is not supported")]
    Unsupported { feature: String, span: Span },

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Lexer(e) => Some(e.span()),
            ParseError::UnexpectedToken { span, .. } => Some(*span),
            ParseError::UnexpectedEof { .. } => None,
            ParseError::UnexpectedIndent { span } => Some(*span),
            ParseError::ExpectedIndent { span, .. } => Some(*span),
            ParseError::InvalidTarget { span, .. } => Some(*span),
            ParseError::InvalidSyntax { span, .. } => Some(*span),
            ParseError::Unsupported { span, .. } => Some(*span),
            ParseError::Validation(e) => Some(e.span()),
        }
    }

    /// Generate a rich diagnostic with line/column info, or `None` if no span.
    pub fn diagnostic(&self, input: &str) -> Option<String> {
        Some(diagnostic_context(input, self.span()?, &self.to_string()))
    }
}
