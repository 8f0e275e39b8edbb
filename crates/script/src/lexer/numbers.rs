// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Integer and float literals.

use super::{Lexer, LexerError};
use crate::token::{self, Span, Token, TokenKind};

impl Lexer<'_> {
    pub(super) fn lex_number(&mut self, start: usize) -> Result<Token, LexerError> {
        if self.peek_char() == Some('0')
            && matches!(self.peek_second(), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'))
        {
            return self.lex_radix_number(start);
        }

        let mut is_float = false;
        self.eat_digits();
        if self.peek_char() == Some('.') {
            is_float = true;
            self.chars.next();
            self.eat_digits();
        }
        if matches!(self.peek_char(), Some('e' | 'E')) && self.exponent_follows() {
            is_float = true;
            self.chars.next();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.chars.next();
            }
            self.eat_digits();
        }

        // `1abc` is a single malformed literal, not a number and a name.
        let trailing = self.peek_char().is_some_and(token::is_name_char);
        if trailing {
            while self.peek_char().is_some_and(token::is_name_char) {
                self.chars.next();
            }
        }

        let end = self.current_position();
        let text = &self.input[start..end];
        let span = Span::new(start, end);
        let invalid = || LexerError::InvalidNumber { text: text.to_string(), span };

        if trailing || text.ends_with('_') || text.contains("__") || text.contains("_.") {
            return Err(invalid());
        }
        let cleaned = text.replace('_', "");
        let kind = if is_float {
            TokenKind::Float(cleaned.parse::<f64>().map_err(|_| invalid())?)
        } else {
            TokenKind::Int(cleaned.parse::<i64>().map_err(|_| invalid())?)
        };
        Ok(Token::new(kind, span))
    }

    fn lex_radix_number(&mut self, start: usize) -> Result<Token, LexerError> {
        self.chars.next();
        let radix = match self.chars.next() {
            Some((_, 'x' | 'X')) => 16,
            Some((_, 'o' | 'O')) => 8,
            _ => 2,
        };
        while self.peek_char().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.chars.next();
        }
        let end = self.current_position();
        let text = &self.input[start..end];
        let digits: String = text[2..].chars().filter(|c| *c != '_').collect();
        i64::from_str_radix(&digits, radix)
            .map(|n| Token::new(TokenKind::Int(n), Span::new(start, end)))
            .map_err(|_| LexerError::InvalidNumber {
                text: text.to_string(),
                span: Span::new(start, end),
            })
    }

    fn eat_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.chars.next();
        }
    }

    /// Whether the `e`/`E` under the cursor starts an exponent.
    fn exponent_follows(&self) -> bool {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        match lookahead.next() {
            Some((_, c)) if c.is_ascii_digit() => true,
            Some((_, '+' | '-')) => lookahead.next().is_some_and(|(_, c)| c.is_ascii_digit()),
            _ => false,
        }
    }
}
