// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! algo-script: a Python-subset scripting engine.
//!
//! Source text goes through [`Lexer`] → [`Parser`] → [`validate`] to
//! produce a [`Module`]; [`unparse`] turns a (possibly rewritten) module
//! back into source, and [`Interpreter`] executes it asynchronously so a
//! script can suspend on host-provided awaitables.

pub mod ast;
mod error;
pub mod exec;
mod lexer;
mod parse_error;
mod parser;
mod span;
mod token;
mod unparse;
mod validation;
mod validator;

pub use ast::{Expr, ExprKind, Fold, Module, Stmt, StmtKind, Visitor};
pub use error::LexerError;
pub use exec::{ExcType, ExecError, Interpreter, InterpreterConfig, Value, RUNTIME_STACK_SIZE};
pub use lexer::Lexer;
pub use parse_error::ParseError;
pub use parser::Parser;
pub use span::{diagnostic_context, locate_span, Span};
pub use token::{Keyword, Token, TokenKind};
pub use unparse::{unparse, unparse_expr};
pub use validation::ValidationError;
pub use validator::{validate, validate_with_config, ValidatorConfig};

/// Parse and validate `source`.
///
/// The first validation error is reported as [`ParseError::Validation`],
/// which is what the interpreter surfaces as a `SyntaxError`.
pub fn parse(source: &str) -> Result<Module, ParseError> {
    let module = Parser::parse(source)?;
    if let Err(errors) = validate(&module) {
        if let Some(first) = errors.into_iter().next() {
            return Err(first.into());
        }
    }
    Ok(module)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
