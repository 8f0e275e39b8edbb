// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operators, delimiters and bracket tracking.

use super::{Lexer, LexerError};
use crate::token::{AugOp, Span, Token, TokenKind};

impl Lexer<'_> {
    pub(super) fn lex_operator(&mut self, start: usize, ch: char) -> Result<Token, LexerError> {
        self.chars.next();
        let single = Span::new(start, start + ch.len_utf8());

        let (kind, len) = match ch {
            '(' | '[' | '{' => {
                self.brackets.push((ch, single));
                let kind = match ch {
                    '(' => TokenKind::LParen,
                    '[' => TokenKind::LBracket,
                    _ => TokenKind::LBrace,
                };
                (kind, 1)
            }
            ')' | ']' | '}' => {
                self.close_bracket(ch, single)?;
                let kind = match ch {
                    ')' => TokenKind::RParen,
                    ']' => TokenKind::RBracket,
                    _ => TokenKind::RBrace,
                };
                (kind, 1)
            }
            ',' => (TokenKind::Comma, 1),
            ':' => (TokenKind::Colon, 1),
            ';' => (TokenKind::Semi, 1),
            '.' => (TokenKind::Dot, 1),
            '+' => self.with_aug(TokenKind::Plus, AugOp::Add),
            '%' => self.with_aug(TokenKind::Percent, AugOp::Mod),
            '-' => {
                if self.peek_char() == Some('>') {
                    self.chars.next();
                    (TokenKind::Arrow, 2)
                } else {
                    self.with_aug(TokenKind::Minus, AugOp::Sub)
                }
            }
            '*' => {
                if self.peek_char() == Some('*') {
                    self.chars.next();
                    let (kind, len) = self.with_aug(TokenKind::DoubleStar, AugOp::Pow);
                    (kind, len + 1)
                } else {
                    self.with_aug(TokenKind::Star, AugOp::Mul)
                }
            }
            '/' => {
                if self.peek_char() == Some('/') {
                    self.chars.next();
                    let (kind, len) = self.with_aug(TokenKind::DoubleSlash, AugOp::FloorDiv);
                    (kind, len + 1)
                } else {
                    self.with_aug(TokenKind::Slash, AugOp::Div)
                }
            }
            '=' => self.with_eq(TokenKind::Assign, TokenKind::EqEq),
            '<' => self.with_eq(TokenKind::Lt, TokenKind::LtE),
            '>' => self.with_eq(TokenKind::Gt, TokenKind::GtE),
            '!' if self.peek_char() == Some('=') => {
                self.chars.next();
                (TokenKind::NotEq, 2)
            }
            _ => return Err(LexerError::UnexpectedChar { ch, span: single }),
        };

        Ok(Token::new(kind, Span::new(start, start + len)))
    }

    /// `op` or `op=` as an augmented assignment.
    fn with_aug(&mut self, plain: TokenKind, op: AugOp) -> (TokenKind, usize) {
        if self.peek_char() == Some('=') {
            self.chars.next();
            (TokenKind::AugAssign(op), 2)
        } else {
            (plain, 1)
        }
    }

    /// `op` or `op=` as a distinct comparison token.
    fn with_eq(&mut self, plain: TokenKind, with_eq: TokenKind) -> (TokenKind, usize) {
        if self.peek_char() == Some('=') {
            self.chars.next();
            (with_eq, 2)
        } else {
            (plain, 1)
        }
    }

    fn close_bracket(&mut self, ch: char, span: Span) -> Result<(), LexerError> {
        let expected = match ch {
            ')' => '(',
            ']' => '[',
            _ => '{',
        };
        match self.brackets.pop() {
            Some((open, _)) if open == expected => Ok(()),
            _ => Err(LexerError::UnmatchedBracket { ch, span }),
        }
    }
}
