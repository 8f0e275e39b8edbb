// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Indentation tracking at the start of each physical line.

use super::{Lexer, LexerError};
use crate::token::{Span, Token, TokenKind};

/// Tabs advance to the next multiple of this width.
const TAB_WIDTH: usize = 8;

impl Lexer<'_> {
    /// Measure the leading whitespace of a line and emit `Indent`/`Dedent`.
    ///
    /// Blank and comment-only lines leave the indentation state untouched.
    pub(super) fn handle_indentation(&mut self) -> Result<(), LexerError> {
        let start = self.current_position();
        let mut width = 0usize;
        loop {
            match self.peek_char() {
                Some(' ') => width += 1,
                Some('\t') => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
                Some('\x0c') => width = 0,
                _ => break,
            }
            self.chars.next();
        }

        if matches!(self.peek_char(), None | Some('#' | '\n' | '\r')) {
            return Ok(());
        }

        self.at_line_start = false;
        let pos = self.current_position();
        let current = self.indent_stack.last().copied().unwrap_or(0);

        if width > current {
            self.indent_stack.push(width);
            self.tokens.push(Token::new(TokenKind::Indent, Span::new(start, pos)));
        } else if width < current {
            while self.indent_stack.last().is_some_and(|&w| w > width) {
                self.indent_stack.pop();
                self.tokens.push(Token::new(TokenKind::Dedent, Span::empty(pos)));
            }
            if self.indent_stack.last().copied().unwrap_or(0) != width {
                return Err(LexerError::InconsistentDedent { span: Span::new(start, pos) });
            }
        }
        Ok(())
    }
}
