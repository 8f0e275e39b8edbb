// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script lexer: turns source text into tokens, including the synthetic
//! `Newline`/`Indent`/`Dedent` tokens that carry block structure.

mod indent;
mod numbers;
mod operators;
mod strings;

use super::token::{self, Keyword, Span, Token, TokenKind};

pub use crate::error::LexerError;

/// Script lexer that tokenizes a whole module.
pub struct Lexer<'a> {
    /// The input string being lexed.
    input: &'a str,
    /// Peekable iterator over character indices.
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    /// Tokens produced so far.
    tokens: Vec<Token>,
    /// Indentation widths of the enclosing blocks; always starts with 0.
    indent_stack: Vec<usize>,
    /// Open brackets; newlines and indentation are ignored while non-empty.
    brackets: Vec<(char, Span)>,
    /// True until the first non-whitespace character of a physical line.
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            tokens: Vec::with_capacity(input.len() / 3 + 1),
            indent_stack: vec![0],
            brackets: Vec::new(),
            at_line_start: true,
        }
    }

    /// Tokenize the entire input and return a vector of tokens.
    ///
    /// The stream always ends with a `Newline` (when any token was produced)
    /// followed by one `Dedent` per still-open block.
    pub fn tokenize(input: &str) -> Result<Vec<Token>, LexerError> {
        let mut lexer = Lexer::new(input);
        lexer.run()?;
        Ok(lexer.tokens)
    }

    fn run(&mut self) -> Result<(), LexerError> {
        loop {
            if self.at_line_start && self.brackets.is_empty() {
                self.handle_indentation()?;
            }
            self.skip_whitespace();

            let Some(&(pos, ch)) = self.chars.peek() else {
                break;
            };

            match ch {
                '#' => self.skip_comment(),
                '\n' | '\r' => {
                    let len = self.consume_newline();
                    if self.brackets.is_empty() {
                        self.push_newline(Span::new(pos, pos + len));
                        self.at_line_start = true;
                    }
                }
                '\'' | '"' => {
                    let token = self.lex_string(pos, false, false)?;
                    self.tokens.push(token);
                }
                '.' if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                    let token = self.lex_number(pos)?;
                    self.tokens.push(token);
                }
                c if c.is_ascii_digit() => {
                    let token = self.lex_number(pos)?;
                    self.tokens.push(token);
                }
                c if token::is_name_start(c) => {
                    let token = self.lex_name_or_prefixed_string(pos)?;
                    self.tokens.push(token);
                }
                _ => {
                    let token = self.lex_operator(pos, ch)?;
                    self.tokens.push(token);
                }
            }
        }

        self.finish();
        Ok(())
    }

    /// Peek at the next character without consuming it.
    #[inline]
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Peek one character past the next.
    #[inline]
    fn peek_second(&self) -> Option<char> {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.next().map(|(_, c)| c)
    }

    /// Get the current byte position in the input.
    fn current_position(&self) -> usize {
        self.chars.clone().next().map(|(pos, _)| pos).unwrap_or(self.input.len())
    }

    /// Consume a newline (LF or CRLF), returning the byte length consumed.
    fn consume_newline(&mut self) -> usize {
        match self.peek_char() {
            Some('\n') => {
                self.chars.next();
                1
            }
            Some('\r') => {
                self.chars.next();
                if self.peek_char() == Some('\n') {
                    self.chars.next();
                    2
                } else {
                    1
                }
            }
            _ => 0,
        }
    }

    /// Skip spaces, tabs, form feeds and backslash line continuations.
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\x0c') => {
                    self.chars.next();
                }
                Some('\\') if matches!(self.peek_second(), Some('\n' | '\r')) => {
                    self.chars.next();
                    self.consume_newline();
                }
                _ => break,
            }
        }
    }

    /// Skip a `#` comment up to (not including) the line break.
    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.chars.next();
        }
    }

    /// End the current logical line unless it is empty.
    fn push_newline(&mut self, span: Span) {
        match self.tokens.last() {
            None => {}
            Some(t) if matches!(t.kind, TokenKind::Newline) => {}
            Some(_) => self.tokens.push(Token::new(TokenKind::Newline, span)),
        }
    }

    /// Close the final logical line and all open blocks.
    fn finish(&mut self) {
        let end = self.input.len();
        self.push_newline(Span::empty(end));
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens.push(Token::new(TokenKind::Dedent, Span::empty(end)));
        }
    }

    /// Lex an identifier or keyword, or a string with an `f`/`r` prefix.
    fn lex_name_or_prefixed_string(&mut self, start: usize) -> Result<Token, LexerError> {
        let mut end = start;
        while let Some(&(pos, ch)) = self.chars.peek() {
            if !token::is_name_char(ch) {
                break;
            }
            end = pos + ch.len_utf8();
            self.chars.next();
        }
        let word = &self.input[start..end];

        if matches!(self.peek_char(), Some('\'' | '"')) {
            let lower = word.to_ascii_lowercase();
            let prefix = match lower.as_str() {
                "f" => Some((false, true)),
                "r" => Some((true, false)),
                "fr" | "rf" => Some((true, true)),
                _ => None,
            };
            if let Some((raw, fstring)) = prefix {
                return self.lex_string(start, raw, fstring);
            }
        }

        let kind = match Keyword::from_word(word) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Name(word.to_string()),
        };
        Ok(Token::new(kind, Span::new(start, end)))
    }
}

#[cfg(test)]
#[path = "../lexer_tests/mod.rs"]
mod tests;
