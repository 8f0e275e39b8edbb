// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation error types for script AST validation.

use crate::{diagnostic_context, Span};
use thiserror::Error;

/// Semantic errors in a successfully parsed module.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'await' outside async function")]
    AwaitOutsideAsync { span: Span },

    #[error("'return' outside function")]
    ReturnOutsideFunction { span: Span },

    #[error("'{keyword}' not properly in loop")]
    NotInLoop { keyword: &'static str, span: Span },

    #[error("name '{name}' is assigned to before global declaration")]
    AssignedBeforeGlobal { name: String, span: Span },

    #[error("duplicate argument '{name}' in function definition")]
    DuplicateArgument { name: String, span: Span },

    #[error("non-default argument follows default argument")]
    NonDefaultAfterDefault { span: Span },
}

impl ValidationError {
    pub fn span(&self) -> Span {
        match self {
            Self::AwaitOutsideAsync { span } => *span,
            Self::ReturnOutsideFunction { span } => *span,
            Self::NotInLoop { span, .. } => *span,
            Self::AssignedBeforeGlobal { span, .. } => *span,
            Self::DuplicateArgument { span, .. } => *span,
            Self::NonDefaultAfterDefault { span } => *span,
        }
    }

    pub fn diagnostic(&self, input: &str) -> String {
        diagnostic_context(input, self.span(), &self.to_string())
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
