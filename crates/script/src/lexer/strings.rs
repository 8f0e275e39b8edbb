// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String literals: quoting, triple quotes, prefixes and escapes.

use super::{Lexer, LexerError};
use crate::token::{Span, Token, TokenKind};

impl Lexer<'_> {
    /// Lex a string literal whose prefix (if any) starts at `start`.
    ///
    /// The cursor must be on the opening quote.
    pub(super) fn lex_string(
        &mut self,
        start: usize,
        raw: bool,
        fstring: bool,
    ) -> Result<Token, LexerError> {
        let Some((_, quote)) = self.chars.next() else {
            return Err(LexerError::UnterminatedString { span: Span::empty(start) });
        };
        let triple = self.peek_char() == Some(quote) && self.peek_second() == Some(quote);
        if triple {
            self.chars.next();
            self.chars.next();
        }

        let mut value = String::new();
        loop {
            let Some((pos, ch)) = self.chars.next() else {
                return Err(LexerError::UnterminatedString {
                    span: Span::new(start, self.input.len()),
                });
            };
            match ch {
                c if c == quote => {
                    if !triple {
                        break;
                    }
                    if self.peek_char() == Some(quote) && self.peek_second() == Some(quote) {
                        self.chars.next();
                        self.chars.next();
                        break;
                    }
                    value.push(c);
                }
                '\n' | '\r' if !triple => {
                    return Err(LexerError::UnterminatedString { span: Span::new(start, pos) });
                }
                '\r' => {
                    if self.peek_char() == Some('\n') {
                        self.chars.next();
                    }
                    value.push('\n');
                }
                '\\' => self.lex_escape(&mut value, raw),
                c => value.push(c),
            }
        }

        let end = self.current_position();
        Ok(Token::new(TokenKind::Str { value, fstring }, Span::new(start, end)))
    }

    /// Process the character(s) following a backslash.
    fn lex_escape(&mut self, value: &mut String, raw: bool) {
        let Some(next) = self.peek_char() else {
            value.push('\\');
            return;
        };

        if raw {
            value.push('\\');
            if matches!(next, '\'' | '"' | '\\') {
                value.push(next);
                self.chars.next();
            }
            return;
        }

        self.chars.next();
        match next {
            '\n' => {}
            '\r' => {
                if self.peek_char() == Some('\n') {
                    self.chars.next();
                }
            }
            '\\' => value.push('\\'),
            '\'' => value.push('\''),
            '"' => value.push('"'),
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            '0' => value.push('\0'),
            'a' => value.push('\x07'),
            'b' => value.push('\x08'),
            'f' => value.push('\x0c'),
            'v' => value.push('\x0b'),
            'x' => self.lex_hex_escape(value, 'x', 2),
            'u' => self.lex_hex_escape(value, 'u', 4),
            'U' => self.lex_hex_escape(value, 'U', 8),
            other => {
                value.push('\\');
                value.push(other);
            }
        }
    }

    /// `\xHH`, `\uHHHH` and `\UHHHHHHHH`; malformed escapes stay literal.
    fn lex_hex_escape(&mut self, value: &mut String, marker: char, digits: usize) {
        let mut lookahead = self.chars.clone();
        let mut code = 0u32;
        for _ in 0..digits {
            match lookahead.next().and_then(|(_, c)| c.to_digit(16)) {
                Some(d) => code = code * 16 + d,
                None => {
                    value.push('\\');
                    value.push(marker);
                    return;
                }
            }
        }
        for _ in 0..digits {
            self.chars.next();
        }
        value.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
}
