// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expression parsing, lowest precedence first.
//!
//! ```text
//! test       := lambda | or_test ['if' or_test 'else' test]
//! or_test    := and_test ('or' and_test)*
//! and_test   := not_test ('and' not_test)*
//! not_test   := 'not' not_test | comparison
//! comparison := arith (cmp_op arith)*
//! arith      := term (('+' | '-') term)*
//! term       := factor (('*' | '/' | '//' | '%') factor)*
//! factor     := ('-' | '+') factor | power
//! power      := await_expr ['**' factor]
//! await_expr := ['await'] primary
//! primary    := atom trailer*
//! ```

use super::{fstring, validate_target, Parser};
use crate::ast::*;
use crate::parse_error::ParseError;
use crate::token::{Keyword, Span, Token, TokenKind};

/// Whether a token can begin an expression.
fn starts_expression(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Name(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Str { .. }
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::LBrace
            | TokenKind::Minus
            | TokenKind::Plus
            | TokenKind::Keyword(
                Keyword::None
                    | Keyword::True
                    | Keyword::False
                    | Keyword::Not
                    | Keyword::Await
                    | Keyword::Lambda
            )
    )
}

impl Parser {
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.previous_span_end().max(start))
    }

    /// `test (',' test)* [',']`, producing a tuple when a comma is present.
    pub(super) fn parse_testlist(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_test()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let start = first.span.start;
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            if !self.peek().is_some_and(starts_expression) {
                break;
            }
            items.push(self.parse_test()?);
        }
        Ok(Expr::new(ExprKind::Tuple(items), self.span_from(start)))
    }

    /// Loop targets: `for a, (b, c) in ...`.
    pub(super) fn parse_target_list(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_arith()?;
        let target = if self.check(&TokenKind::Comma) {
            let start = first.span.start;
            let mut items = vec![first];
            while self.eat(&TokenKind::Comma) {
                if self.check_keyword(Keyword::In) {
                    break;
                }
                items.push(self.parse_arith()?);
            }
            Expr::new(ExprKind::Tuple(items), self.span_from(start))
        } else {
            first
        };
        validate_target(&target, true)?;
        Ok(target)
    }

    pub(super) fn parse_test(&mut self) -> Result<Expr, ParseError> {
        if self.check_keyword(Keyword::Lambda) {
            return self.parse_lambda();
        }

        let body = self.parse_or_test()?;
        if !self.eat_keyword(Keyword::If) {
            return Ok(body);
        }
        let start = body.span.start;
        let test = self.parse_or_test()?;
        self.expect_keyword(Keyword::Else)?;
        let orelse = self.parse_test()?;
        Ok(Expr::new(
            ExprKind::IfExp { test: Box::new(test), body: Box::new(body), orelse: Box::new(orelse) },
            self.span_from(start),
        ))
    }

    fn parse_lambda(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span_start();
        self.advance();
        let params = self.parse_params(&TokenKind::Colon, false)?;
        self.expect(&TokenKind::Colon, "':'")?;
        let body = self.parse_test()?;
        Ok(Expr::new(ExprKind::Lambda { params, body: Box::new(body) }, self.span_from(start)))
    }

    fn parse_or_test(&mut self) -> Result<Expr, ParseError> {
        self.parse_bool_chain(Keyword::Or, BoolOp::Or, Self::parse_and_test)
    }

    fn parse_and_test(&mut self) -> Result<Expr, ParseError> {
        self.parse_bool_chain(Keyword::And, BoolOp::And, Self::parse_not_test)
    }

    fn parse_bool_chain(
        &mut self,
        keyword: Keyword,
        op: BoolOp,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let first = operand(self)?;
        if !self.check_keyword(keyword) {
            return Ok(first);
        }
        let start = first.span.start;
        let mut values = vec![first];
        while self.eat_keyword(keyword) {
            values.push(operand(self)?);
        }
        Ok(Expr::new(ExprKind::BoolOp { op, values }, self.span_from(start)))
    }

    fn parse_not_test(&mut self) -> Result<Expr, ParseError> {
        if !self.check_keyword(Keyword::Not) {
            return self.parse_comparison();
        }
        let start = self.current_span_start();
        self.advance();
        let operand = self.parse_not_test()?;
        Ok(Expr::new(
            ExprKind::UnaryOp { op: UnaryOp::Not, operand: Box::new(operand) },
            self.span_from(start),
        ))
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_arith()?;
        let mut ops = Vec::new();
        let mut comparators = Vec::new();

        loop {
            let op = match self.peek() {
                Some(TokenKind::EqEq) => CmpOp::Eq,
                Some(TokenKind::NotEq) => CmpOp::NotEq,
                Some(TokenKind::Lt) => CmpOp::Lt,
                Some(TokenKind::LtE) => CmpOp::LtE,
                Some(TokenKind::Gt) => CmpOp::Gt,
                Some(TokenKind::GtE) => CmpOp::GtE,
                Some(TokenKind::Keyword(Keyword::In)) => CmpOp::In,
                Some(TokenKind::Keyword(Keyword::Not))
                    if self.peek_at(1).is_some_and(|k| k.is_keyword(Keyword::In)) =>
                {
                    self.advance();
                    CmpOp::NotIn
                }
                Some(TokenKind::Keyword(Keyword::Is)) => {
                    if self.peek_at(1).is_some_and(|k| k.is_keyword(Keyword::Not)) {
                        self.advance();
                        CmpOp::IsNot
                    } else {
                        CmpOp::Is
                    }
                }
                _ => break,
            };
            self.advance();
            ops.push(op);
            comparators.push(self.parse_arith()?);
        }

        if ops.is_empty() {
            return Ok(left);
        }
        let start = left.span.start;
        Ok(Expr::new(
            ExprKind::Compare { left: Box::new(left), ops, comparators },
            self.span_from(start),
        ))
    }

    fn parse_arith(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = self.binop(left, op, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                Some(TokenKind::DoubleSlash) => BinOp::FloorDiv,
                Some(TokenKind::Percent) => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = self.binop(left, op, right);
        }
        Ok(left)
    }

    fn binop(&self, left: Expr, op: BinOp, right: Expr) -> Expr {
        let span = left.span.merge(right.span);
        Expr::new(ExprKind::BinOp { left: Box::new(left), op, right: Box::new(right) }, span)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            Some(TokenKind::Minus) => UnaryOp::Neg,
            Some(TokenKind::Plus) => UnaryOp::Pos,
            _ => return self.parse_power(),
        };
        let start = self.current_span_start();
        self.advance();
        let operand = self.parse_factor()?;
        Ok(Expr::new(ExprKind::UnaryOp { op, operand: Box::new(operand) }, self.span_from(start)))
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_await()?;
        if !self.eat(&TokenKind::DoubleStar) {
            return Ok(base);
        }
        let exponent = self.parse_factor()?;
        Ok(self.binop(base, BinOp::Pow, exponent))
    }

    fn parse_await(&mut self) -> Result<Expr, ParseError> {
        if !self.check_keyword(Keyword::Await) {
            return self.parse_primary();
        }
        let start = self.current_span_start();
        self.advance();
        let value = self.parse_primary()?;
        Ok(Expr::new(ExprKind::Await(Box::new(value)), self.span_from(start)))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_atom()?;
        loop {
            match self.peek() {
                Some(TokenKind::Dot) => {
                    self.advance();
                    let attr = self.expect_name()?;
                    let span = self.span_from(expr.span.start);
                    expr = Expr::new(ExprKind::Attribute { value: Box::new(expr), attr }, span);
                }
                Some(TokenKind::LParen) => {
                    self.advance();
                    expr = self.parse_call(expr)?;
                }
                Some(TokenKind::LBracket) => {
                    self.advance();
                    let index = self.parse_subscript()?;
                    self.expect(&TokenKind::RBracket, "']'")?;
                    let span = self.span_from(expr.span.start);
                    expr = Expr::new(
                        ExprKind::Subscript { value: Box::new(expr), index: Box::new(index) },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Arguments after `(`, through the closing `)`.
    fn parse_call(&mut self, func: Expr) -> Result<Expr, ParseError> {
        let mut args = Vec::new();
        let mut keywords: Vec<KeywordArg> = Vec::new();

        while !self.check(&TokenKind::RParen) {
            if self.check(&TokenKind::Star) || self.check(&TokenKind::DoubleStar) {
                return Err(self.unsupported_here("argument unpacking"));
            }

            let keyword_name = match (self.peek(), self.peek_at(1)) {
                (Some(TokenKind::Name(name)), Some(TokenKind::Assign)) => Some(name.clone()),
                _ => None,
            };

            if let Some(arg) = keyword_name {
                self.advance();
                self.advance();
                let value = self.parse_test()?;
                keywords.push(KeywordArg { arg, value });
            } else {
                if !keywords.is_empty() {
                    return Err(ParseError::InvalidSyntax {
                        message: "positional argument follows keyword argument".to_string(),
                        span: self.current_span(),
                    });
                }
                let arg = self.parse_test()?;
                let arg = if self.check_keyword(Keyword::For) {
                    let start = arg.span.start;
                    let generators = self.parse_comprehension()?;
                    Expr::new(
                        ExprKind::GeneratorExp { elt: Box::new(arg), generators },
                        self.span_from(start),
                    )
                } else {
                    arg
                };
                args.push(arg);
            }

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        let end = self.expect(&TokenKind::RParen, "')'")?.end;
        let span = Span::new(func.span.start, end);
        Ok(Expr::new(ExprKind::Call { func: Box::new(func), args, keywords }, span))
    }

    /// Subscript contents: an index, a slice, or a tuple of them.
    fn parse_subscript(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_slice_item()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let start = first.span.start;
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RBracket) {
                break;
            }
            items.push(self.parse_slice_item()?);
        }
        Ok(Expr::new(ExprKind::Tuple(items), self.span_from(start)))
    }

    fn parse_slice_item(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span_start();
        let lower = if self.check(&TokenKind::Colon) {
            None
        } else {
            let expr = self.parse_test()?;
            if !self.check(&TokenKind::Colon) {
                return Ok(expr);
            }
            Some(Box::new(expr))
        };
        self.expect(&TokenKind::Colon, "':'")?;

        let upper = if self.at_slice_bound() { None } else { Some(Box::new(self.parse_test()?)) };
        let step = if self.eat(&TokenKind::Colon) && !self.at_slice_bound() {
            Some(Box::new(self.parse_test()?))
        } else {
            None
        };
        Ok(Expr::new(ExprKind::Slice { lower, upper, step }, self.span_from(start)))
    }

    fn at_slice_bound(&self) -> bool {
        matches!(self.peek(), Some(TokenKind::Colon | TokenKind::RBracket | TokenKind::Comma))
    }

    /// `('for' targets 'in' or_test ('if' or_test)*)+`
    fn parse_comprehension(&mut self) -> Result<Vec<Comprehension>, ParseError> {
        let mut generators = Vec::new();
        while self.eat_keyword(Keyword::For) {
            let target = self.parse_target_list()?;
            self.expect_keyword(Keyword::In)?;
            let iter = self.parse_or_test()?;
            let mut ifs = Vec::new();
            while self.eat_keyword(Keyword::If) {
                ifs.push(self.parse_or_test()?);
            }
            generators.push(Comprehension { target, iter, ifs });
        }
        Ok(generators)
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return Err(self.unexpected_token("expression"));
        };
        let start = token.span.start;

        let kind = match token.kind {
            TokenKind::Name(name) => ExprKind::Name(name),
            TokenKind::Int(n) => ExprKind::Constant(Constant::Int(n)),
            TokenKind::Float(n) => ExprKind::Constant(Constant::Float(n)),
            TokenKind::Keyword(Keyword::None) => ExprKind::Constant(Constant::None),
            TokenKind::Keyword(Keyword::True) => ExprKind::Constant(Constant::Bool(true)),
            TokenKind::Keyword(Keyword::False) => ExprKind::Constant(Constant::Bool(false)),
            TokenKind::Str { .. } => return self.parse_strings(),
            TokenKind::LParen => {
                self.advance();
                return self.parse_paren(start);
            }
            TokenKind::LBracket => {
                self.advance();
                return self.parse_list(start);
            }
            TokenKind::LBrace => {
                self.advance();
                return self.parse_brace(start);
            }
            _ => return Err(self.unexpected_token("expression")),
        };
        self.advance();
        Ok(Expr::new(kind, token.span))
    }

    /// Adjacent string literals concatenate; any f-string makes the result
    /// an f-string.
    fn parse_strings(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span_start();
        let mut parts: Vec<FStringPart> = Vec::new();
        let mut any_fstring = false;

        while let Some(Token { kind: TokenKind::Str { value, fstring }, span }) =
            self.tokens.get(self.pos).cloned()
        {
            self.pos += 1;
            if fstring {
                any_fstring = true;
                parts.extend(fstring::split(&value, span)?);
            } else {
                parts.push(FStringPart::Literal(value));
            }
        }

        let span = self.span_from(start);
        if !any_fstring {
            let text: String = parts
                .into_iter()
                .map(|p| match p {
                    FStringPart::Literal(s) => s,
                    FStringPart::Field { .. } => String::new(),
                })
                .collect();
            return Ok(Expr::new(ExprKind::Constant(Constant::Str(text)), span));
        }

        let mut merged: Vec<FStringPart> = Vec::with_capacity(parts.len());
        for part in parts {
            if let FStringPart::Literal(text) = &part {
                if text.is_empty() {
                    continue;
                }
                if let Some(FStringPart::Literal(prev)) = merged.last_mut() {
                    prev.push_str(text);
                    continue;
                }
            }
            merged.push(part);
        }
        Ok(Expr::new(ExprKind::FString(merged), span))
    }

    /// After `(`: empty tuple, parenthesized expression, tuple or generator.
    fn parse_paren(&mut self, start: usize) -> Result<Expr, ParseError> {
        if self.eat(&TokenKind::RParen) {
            return Ok(Expr::new(ExprKind::Tuple(Vec::new()), self.span_from(start)));
        }

        let first = self.parse_test()?;

        if self.check_keyword(Keyword::For) {
            let generators = self.parse_comprehension()?;
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(Expr::new(
                ExprKind::GeneratorExp { elt: Box::new(first), generators },
                self.span_from(start),
            ));
        }

        if !self.check(&TokenKind::Comma) {
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(first);
        }

        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RParen) {
                break;
            }
            items.push(self.parse_test()?);
        }
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(Expr::new(ExprKind::Tuple(items), self.span_from(start)))
    }

    /// After `[`: list display or list comprehension.
    fn parse_list(&mut self, start: usize) -> Result<Expr, ParseError> {
        if self.eat(&TokenKind::RBracket) {
            return Ok(Expr::new(ExprKind::List(Vec::new()), self.span_from(start)));
        }

        let first = self.parse_test()?;
        if self.check_keyword(Keyword::For) {
            let generators = self.parse_comprehension()?;
            self.expect(&TokenKind::RBracket, "']'")?;
            return Ok(Expr::new(
                ExprKind::ListComp { elt: Box::new(first), generators },
                self.span_from(start),
            ));
        }

        let items = self.parse_display_rest(first, &TokenKind::RBracket)?;
        self.expect(&TokenKind::RBracket, "']'")?;
        Ok(Expr::new(ExprKind::List(items), self.span_from(start)))
    }

    /// After `{`: dict or set display, or their comprehensions.
    fn parse_brace(&mut self, start: usize) -> Result<Expr, ParseError> {
        if self.eat(&TokenKind::RBrace) {
            return Ok(Expr::new(ExprKind::Dict(Vec::new()), self.span_from(start)));
        }
        if self.check(&TokenKind::DoubleStar) {
            return Err(self.unsupported_here("dict unpacking"));
        }

        let first = self.parse_test()?;

        if !self.eat(&TokenKind::Colon) {
            if self.check_keyword(Keyword::For) {
                let generators = self.parse_comprehension()?;
                self.expect(&TokenKind::RBrace, "'}'")?;
                return Ok(Expr::new(
                    ExprKind::SetComp { elt: Box::new(first), generators },
                    self.span_from(start),
                ));
            }
            let items = self.parse_display_rest(first, &TokenKind::RBrace)?;
            self.expect(&TokenKind::RBrace, "'}'")?;
            return Ok(Expr::new(ExprKind::Set(items), self.span_from(start)));
        }

        let value = self.parse_test()?;
        if self.check_keyword(Keyword::For) {
            let generators = self.parse_comprehension()?;
            self.expect(&TokenKind::RBrace, "'}'")?;
            return Ok(Expr::new(
                ExprKind::DictComp { key: Box::new(first), value: Box::new(value), generators },
                self.span_from(start),
            ));
        }

        let mut pairs = vec![(first, value)];
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RBrace) {
                break;
            }
            let key = self.parse_test()?;
            self.expect(&TokenKind::Colon, "':'")?;
            pairs.push((key, self.parse_test()?));
        }
        self.expect(&TokenKind::RBrace, "'}'")?;
        Ok(Expr::new(ExprKind::Dict(pairs), self.span_from(start)))
    }

    /// Remaining comma-separated items of a display, up to `close`.
    fn parse_display_rest(&mut self, first: Expr, close: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.check(close) {
                break;
            }
            items.push(self.parse_test()?);
        }
        Ok(items)
    }
}
