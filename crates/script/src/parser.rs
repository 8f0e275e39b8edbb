// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script parser that transforms tokens into an Abstract Syntax Tree.
//!
//! Statements live here; expressions are in `parser/expr.rs` and f-string
//! splitting in `parser/fstring.rs`.

mod expr;
mod fstring;

use super::ast::*;
use super::lexer::Lexer;
use super::parse_error::ParseError;
use super::token::{Keyword, Span, Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    input_len: usize,
}

impl Parser {
    /// Parse input text into a module, or error on invalid syntax.
    ///
    /// Only syntax is checked here; see [`crate::parse`] for the variant
    /// that also runs semantic validation.
    pub fn parse(input: &str) -> Result<Module, ParseError> {
        let tokens = Lexer::tokenize(input)?;
        let mut parser = Parser { tokens, pos: 0, input_len: input.len() };
        parser.parse_module()
    }

    /// Parse a standalone expression (a bare tuple is allowed).
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        let tokens = Lexer::tokenize(input)?;
        let mut parser = Parser { tokens, pos: 0, input_len: input.len() };
        let expr = parser.parse_testlist()?;
        parser.eat(&TokenKind::Newline);
        if !parser.at_end() {
            return Err(parser.unexpected_token("end of expression"));
        }
        Ok(expr)
    }

    fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut body = Vec::new();
        while !self.at_end() {
            match self.peek() {
                Some(TokenKind::Indent) => {
                    return Err(ParseError::UnexpectedIndent { span: self.current_span() });
                }
                Some(TokenKind::Newline | TokenKind::Dedent) => {
                    self.advance();
                }
                _ => body.extend(self.parse_statement()?),
            }
        }
        Ok(Module { body, span: Span::new(0, self.input_len) })
    }

    // ── Statements ──────────────────────────────────────────────────────

    /// One logical line or one compound statement.
    ///
    /// Returns a vector because `a; b` yields several statements.
    fn parse_statement(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let start = self.current_span_start();
        match self.peek() {
            Some(TokenKind::Keyword(Keyword::If)) => {
                self.advance();
                Ok(vec![self.parse_if_rest(start, "'if' statement")?])
            }
            Some(TokenKind::Keyword(Keyword::While)) => Ok(vec![self.parse_while()?]),
            Some(TokenKind::Keyword(Keyword::For)) => Ok(vec![self.parse_for()?]),
            Some(TokenKind::Keyword(Keyword::Try)) => Ok(vec![self.parse_try()?]),
            Some(TokenKind::Keyword(Keyword::Def)) => {
                self.advance();
                Ok(vec![self.parse_function_def(start, false)?])
            }
            Some(TokenKind::Keyword(Keyword::Async)) => {
                self.advance();
                if !self.eat_keyword(Keyword::Def) {
                    return Err(self.unsupported_here("'async' outside a function definition"));
                }
                Ok(vec![self.parse_function_def(start, true)?])
            }
            Some(TokenKind::Keyword(Keyword::Class)) => Err(self.unsupported_here("'class'")),
            Some(TokenKind::Indent) => {
                Err(ParseError::UnexpectedIndent { span: self.current_span() })
            }
            _ => self.parse_simple_line(),
        }
    }

    /// `small_stmt (';' small_stmt)* [';'] NEWLINE`
    fn parse_simple_line(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = vec![self.parse_small_statement()?];
        while self.eat(&TokenKind::Semi) {
            if self.check(&TokenKind::Newline) || self.at_end() {
                break;
            }
            stmts.push(self.parse_small_statement()?);
        }
        if !self.at_end() {
            self.expect(&TokenKind::Newline, "newline")?;
        }
        Ok(stmts)
    }

    fn parse_small_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span_start();
        let keyword = match self.peek() {
            Some(TokenKind::Keyword(kw)) => Some(*kw),
            _ => None,
        };

        let kind = match keyword {
            Some(Keyword::Pass) => {
                self.advance();
                StmtKind::Pass
            }
            Some(Keyword::Break) => {
                self.advance();
                StmtKind::Break
            }
            Some(Keyword::Continue) => {
                self.advance();
                StmtKind::Continue
            }
            Some(Keyword::Return) => {
                self.advance();
                let value =
                    if self.at_statement_end() { None } else { Some(self.parse_testlist()?) };
                StmtKind::Return(value)
            }
            Some(Keyword::Raise) => {
                self.advance();
                let exc = if self.at_statement_end() { None } else { Some(self.parse_test()?) };
                StmtKind::Raise(exc)
            }
            Some(Keyword::Global) => {
                self.advance();
                let mut names = vec![self.expect_name()?];
                while self.eat(&TokenKind::Comma) {
                    names.push(self.expect_name()?);
                }
                StmtKind::Global(names)
            }
            Some(Keyword::Import) => {
                self.advance();
                let mut aliases = vec![self.parse_import_alias()?];
                while self.eat(&TokenKind::Comma) {
                    aliases.push(self.parse_import_alias()?);
                }
                StmtKind::Import(aliases)
            }
            Some(Keyword::Assert) => {
                self.advance();
                let test = self.parse_test()?;
                let msg = if self.eat(&TokenKind::Comma) { Some(self.parse_test()?) } else { None };
                StmtKind::Assert { test, msg }
            }
            _ => self.parse_expression_statement()?,
        };

        Ok(Stmt::new(kind, Span::new(start, self.previous_span_end().max(start))))
    }

    /// Expression statements and the assignment forms that start with an
    /// expression.
    fn parse_expression_statement(&mut self) -> Result<StmtKind, ParseError> {
        let first = self.parse_testlist()?;

        match self.peek() {
            Some(TokenKind::Assign) => {
                let mut exprs = vec![first];
                while self.eat(&TokenKind::Assign) {
                    exprs.push(self.parse_testlist()?);
                }
                let value = exprs.pop().ok_or_else(|| self.unexpected_token("expression"))?;
                for target in &exprs {
                    validate_target(target, true)?;
                }
                Ok(StmtKind::Assign { targets: exprs, value })
            }
            Some(TokenKind::AugAssign(op)) => {
                let op = BinOp::from(*op);
                validate_target(&first, false)?;
                self.advance();
                let value = self.parse_testlist()?;
                Ok(StmtKind::AugAssign { target: first, op, value })
            }
            Some(TokenKind::Colon) => {
                validate_target(&first, false)?;
                self.advance();
                let annotation = self.parse_test()?;
                let value =
                    if self.eat(&TokenKind::Assign) { Some(self.parse_testlist()?) } else { None };
                Ok(StmtKind::AnnAssign { target: first, annotation, value })
            }
            _ => Ok(StmtKind::Expr(first)),
        }
    }

    fn parse_import_alias(&mut self) -> Result<Alias, ParseError> {
        let mut name = self.expect_name()?;
        while self.eat(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_name()?);
        }
        let asname = if self.eat_keyword(Keyword::As) { Some(self.expect_name()?) } else { None };
        Ok(Alias { name, asname })
    }

    /// `if`/`elif` after the keyword: `test ':' block (elif ... | else ':' block)?`
    fn parse_if_rest(&mut self, start: usize, what: &str) -> Result<Stmt, ParseError> {
        let test = self.parse_test()?;
        let body = self.parse_block(what)?;

        let orelse = match self.peek() {
            Some(TokenKind::Keyword(Keyword::Elif)) => {
                let elif_start = self.current_span_start();
                self.advance();
                vec![self.parse_if_rest(elif_start, "'elif' statement")?]
            }
            Some(TokenKind::Keyword(Keyword::Else)) => {
                self.advance();
                self.parse_block("'else' statement")?
            }
            _ => Vec::new(),
        };

        let span = Span::new(start, self.previous_span_end().max(start));
        Ok(Stmt::new(StmtKind::If { test, body, orelse }, span))
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span_start();
        self.advance();
        let test = self.parse_test()?;
        let body = self.parse_block("'while' statement")?;
        let orelse = self.parse_optional_else()?;
        let span = Span::new(start, self.previous_span_end());
        Ok(Stmt::new(StmtKind::While { test, body, orelse }, span))
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span_start();
        self.advance();
        let target = self.parse_target_list()?;
        self.expect_keyword(Keyword::In)?;
        let iter = self.parse_testlist()?;
        let body = self.parse_block("'for' statement")?;
        let orelse = self.parse_optional_else()?;
        let span = Span::new(start, self.previous_span_end());
        Ok(Stmt::new(StmtKind::For { target, iter, body, orelse }, span))
    }

    fn parse_optional_else(&mut self) -> Result<Vec<Stmt>, ParseError> {
        if self.eat_keyword(Keyword::Else) {
            self.parse_block("'else' statement")
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_try(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span_start();
        self.advance();
        let body = self.parse_block("'try' statement")?;

        let mut handlers = Vec::new();
        while self.check_keyword(Keyword::Except) {
            let handler_start = self.current_span_start();
            self.advance();
            let (kind, name) = if self.check(&TokenKind::Colon) {
                (None, None)
            } else {
                let kind = self.parse_test()?;
                let name =
                    if self.eat_keyword(Keyword::As) { Some(self.expect_name()?) } else { None };
                (Some(kind), name)
            };
            let body = self.parse_block("'except' statement")?;
            let span = Span::new(handler_start, self.previous_span_end());
            handlers.push(ExceptHandler { kind, name, body, span });
        }

        let orelse = if !handlers.is_empty() { self.parse_optional_else()? } else { Vec::new() };
        let finalbody = if self.eat_keyword(Keyword::Finally) {
            self.parse_block("'finally' statement")?
        } else {
            Vec::new()
        };

        if handlers.is_empty() && finalbody.is_empty() {
            return Err(self.unexpected_token("'except' or 'finally' block"));
        }

        let span = Span::new(start, self.previous_span_end());
        Ok(Stmt::new(StmtKind::Try(Box::new(Try { body, handlers, orelse, finalbody })), span))
    }

    /// After `def`: `NAME '(' params ')' ['->' test] ':' block`
    fn parse_function_def(&mut self, start: usize, is_async: bool) -> Result<Stmt, ParseError> {
        let name = self.expect_name()?;
        self.expect(&TokenKind::LParen, "'('")?;
        let params = self.parse_params(&TokenKind::RParen, true)?;
        self.expect(&TokenKind::RParen, "')'")?;
        let returns = if self.eat(&TokenKind::Arrow) { Some(self.parse_test()?) } else { None };
        let body = self.parse_block("function definition")?;

        let span = Span::new(start, self.previous_span_end());
        let def = FunctionDef { name, params, body, returns, is_async };
        Ok(Stmt::new(StmtKind::FunctionDef(Box::new(def)), span))
    }

    /// Comma-separated parameters up to (not including) `close`.
    ///
    /// Annotations are only allowed in `def` parameter lists.
    fn parse_params(
        &mut self,
        close: &TokenKind,
        annotations: bool,
    ) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();
        while !self.check(close) {
            if self.check(&TokenKind::Star) || self.check(&TokenKind::DoubleStar) {
                return Err(self.unsupported_here("variadic parameters"));
            }
            let name = self.expect_name()?;
            let annotation = if annotations && self.eat(&TokenKind::Colon) {
                Some(self.parse_test()?)
            } else {
                None
            };
            let default = if self.eat(&TokenKind::Assign) { Some(self.parse_test()?) } else { None };
            params.push(Param { name, annotation, default });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    /// `':' (simple_line | NEWLINE INDENT statement+ DEDENT)`
    fn parse_block(&mut self, after: &str) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::Colon, "':'")?;

        if !self.check(&TokenKind::Newline) {
            return self.parse_simple_line();
        }
        self.advance();

        if !self.eat(&TokenKind::Indent) {
            return Err(ParseError::ExpectedIndent {
                after: after.to_string(),
                span: self.current_span(),
            });
        }

        let mut body = Vec::new();
        while !self.at_end() && !self.check(&TokenKind::Dedent) {
            body.extend(self.parse_statement()?);
        }
        self.eat(&TokenKind::Dedent);
        Ok(body)
    }

    // ── Token helpers ───────────────────────────────────────────────────

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn at_statement_end(&self) -> bool {
        matches!(self.peek(), None | Some(TokenKind::Newline | TokenKind::Semi))
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().is_some_and(|k| k.is_keyword(keyword))
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Span, ParseError> {
        if self.check(kind) {
            let span = self.current_span();
            self.pos += 1;
            Ok(span)
        } else {
            Err(self.unexpected_token(expected))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected_token(&format!("'{}'", keyword.as_str())))
        }
    }

    fn expect_name(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(TokenKind::Name(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected_token("name")),
        }
    }

    fn current_span(&self) -> Span {
        self.tokens.get(self.pos).map(|t| t.span).unwrap_or(Span::empty(self.input_len))
    }

    fn current_span_start(&self) -> usize {
        self.current_span().start
    }

    fn previous_span_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span.end)
            .unwrap_or(0)
    }

    fn unexpected_token(&self, expected: &str) -> ParseError {
        match self.tokens.get(self.pos) {
            Some(token) => ParseError::UnexpectedToken {
                found: token.kind.clone(),
                expected: expected.to_string(),
                span: token.span,
            },
            None => ParseError::UnexpectedEof { expected: expected.to_string() },
        }
    }

    fn unsupported_here(&self, feature: &str) -> ParseError {
        ParseError::Unsupported { feature: feature.to_string(), span: self.current_span() }
    }
}

/// Check that `expr` may appear on the left of `=`.
///
/// Tuple and list destructuring is only allowed for plain assignment.
fn validate_target(expr: &Expr, allow_unpack: bool) -> Result<(), ParseError> {
    match &expr.kind {
        ExprKind::Name(_) | ExprKind::Attribute { .. } | ExprKind::Subscript { .. } => Ok(()),
        ExprKind::Tuple(items) | ExprKind::List(items) if allow_unpack => {
            items.iter().try_for_each(|item| validate_target(item, true))
        }
        kind => Err(ParseError::InvalidTarget { what: describe(kind).to_string(), span: expr.span }),
    }
}

/// Human-readable name of an expression form, for error messages.
fn describe(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Name(_) => "name",
        ExprKind::Constant(Constant::None) => "None",
        ExprKind::Constant(Constant::Bool(true)) => "True",
        ExprKind::Constant(Constant::Bool(false)) => "False",
        ExprKind::Constant(_) => "literal",
        ExprKind::FString(_) => "f-string expression",
        ExprKind::List(_) => "list",
        ExprKind::Tuple(_) => "tuple",
        ExprKind::Set(_) => "set display",
        ExprKind::Dict(_) => "dict literal",
        ExprKind::ListComp { .. } => "list comprehension",
        ExprKind::SetComp { .. } => "set comprehension",
        ExprKind::DictComp { .. } => "dict comprehension",
        ExprKind::GeneratorExp { .. } => "generator expression",
        ExprKind::Attribute { .. } => "attribute",
        ExprKind::Subscript { .. } => "subscript",
        ExprKind::Slice { .. } => "slice",
        ExprKind::Call { .. } => "function call",
        ExprKind::UnaryOp { .. } | ExprKind::BinOp { .. } | ExprKind::BoolOp { .. } => {
            "expression"
        }
        ExprKind::Compare { .. } => "comparison",
        ExprKind::IfExp { .. } => "conditional expression",
        ExprKind::Lambda { .. } => "lambda",
        ExprKind::Await(_) => "await expression",
    }
}

#[cfg(test)]
#[path = "parser_tests/mod.rs"]
mod tests;
