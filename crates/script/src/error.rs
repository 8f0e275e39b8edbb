// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the script lexer.

use crate::{diagnostic_context, Span};
use thiserror::Error;

/// Errors that can occur while tokenizing script source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexerError {
    /// Unexpected character encountered.
    #[error("invalid character '{ch}' at position {}", span.start)]
    UnexpectedChar {
        /// The unexpected character.
        ch: char,
        /// Source location span for the error.
        span: Span,
    },

    /// String literal not closed before end of line (or end of input for
    /// triple-quoted strings).
    #[error("unterminated string literal at position {}", span.start)]
    UnterminatedString {
        /// Source location span for the error.
        span: Span,
    },

    /// Malformed or out-of-range numeric literal.
    #[error("invalid number literal '{text}' at position {}", span.start)]
    InvalidNumber {
        /// The literal text as written.
        text: String,
        /// Source location span for the error.
        span: Span,
    },

    /// A dedent that does not return to any enclosing indentation level.
    #[error("unindent does not match any outer indentation level at position {}", span.start)]
    InconsistentDedent {
        /// Source location span for the error.
        span: Span,
    },

    /// Closing bracket without a matching opener.
    #[error("unmatched '{ch}' at position {}", span.start)]
    UnmatchedBracket {
        /// The closing bracket.
        ch: char,
        /// Source location span for the error.
        span: Span,
    },
}

impl LexerError {
    /// Get the span associated with this error.
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar { span, .. } => *span,
            Self::UnterminatedString { span } => *span,
            Self::InvalidNumber { span, .. } => *span,
            Self::InconsistentDedent { span } => *span,
            Self::UnmatchedBracket { span, .. } => *span,
        }
    }

    /// Generate a rich diagnostic message with line/column info.
    pub fn diagnostic(&self, input: &str) -> String {
        diagnostic_context(input, self.span(), &self.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
