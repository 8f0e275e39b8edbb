// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution errors: Python exceptions and the built-in exception hierarchy.

use std::fmt;
use std::sync::Arc;

use super::format::{repr, to_str};
use super::value::Value;

/// Errors that end (or unwind through) script execution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExecError {
    /// The source did not parse or failed validation.
    #[error("SyntaxError: {0}")]
    Syntax(#[from] crate::ParseError),

    /// A raised exception, caught by `try`/`except` or surfaced to the host.
    #[error("{0}")]
    Exception(Arc<Exception>),
}

impl ExecError {
    /// Raise `kind` with a single message argument.
    pub fn new(kind: ExcType, message: impl Into<String>) -> Self {
        let message = message.into();
        let args = if message.is_empty() { Vec::new() } else { vec![Value::str(message)] };
        ExecError::Exception(Arc::new(Exception { kind, args }))
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ExcType::TypeError, message)
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(ExcType::ValueError, message)
    }

    /// The exception class name (`SyntaxError` for parse failures).
    pub fn kind_name(&self) -> &'static str {
        match self {
            ExecError::Syntax(_) => "SyntaxError",
            ExecError::Exception(exc) => exc.kind.name(),
        }
    }

    /// The exception type, when this is a raised exception.
    pub fn exc_type(&self) -> Option<ExcType> {
        match self {
            ExecError::Syntax(_) => None,
            ExecError::Exception(exc) => Some(exc.kind),
        }
    }

    /// The message without the type prefix.
    pub fn message(&self) -> String {
        match self {
            ExecError::Syntax(e) => e.to_string(),
            ExecError::Exception(exc) => exc.message(),
        }
    }
}

/// A Python exception instance.
#[derive(Debug, Clone)]
pub struct Exception {
    pub kind: ExcType,
    pub args: Vec<Value>,
}

impl Exception {
    /// `str(exc)`: the lone argument, the argument tuple, or empty.
    pub fn message(&self) -> String {
        match self.args.as_slice() {
            [] => String::new(),
            [single] if self.kind == ExcType::KeyError => repr(single),
            [single] => to_str(single),
            many => repr(&Value::tuple(many.to_vec())),
        }
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message();
        if message.is_empty() {
            f.write_str(self.kind.name())
        } else {
            write!(f, "{}: {}", self.kind.name(), message)
        }
    }
}

macro_rules! exc_types {
    ($($variant:ident => $parent:expr),* $(,)?) => {
        /// Built-in exception classes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ExcType {
            BaseException,
            $($variant),*
        }

        impl ExcType {
            pub const ALL: &'static [ExcType] = &[ExcType::BaseException, $(ExcType::$variant),*];

            pub fn name(&self) -> &'static str {
                match self {
                    ExcType::BaseException => "BaseException",
                    $(ExcType::$variant => stringify!($variant)),*
                }
            }

            /// Direct superclass; `None` only for `BaseException`.
            pub fn parent(&self) -> Option<ExcType> {
                match self {
                    ExcType::BaseException => None,
                    $(ExcType::$variant => Some($parent)),*
                }
            }
        }
    };
}

exc_types! {
    Exception => ExcType::BaseException,
    KeyboardInterrupt => ExcType::BaseException,
    ArithmeticError => ExcType::Exception,
    ZeroDivisionError => ExcType::ArithmeticError,
    OverflowError => ExcType::ArithmeticError,
    LookupError => ExcType::Exception,
    IndexError => ExcType::LookupError,
    KeyError => ExcType::LookupError,
    ValueError => ExcType::Exception,
    TypeError => ExcType::Exception,
    NameError => ExcType::Exception,
    UnboundLocalError => ExcType::NameError,
    AttributeError => ExcType::Exception,
    MemoryError => ExcType::Exception,
    RuntimeError => ExcType::Exception,
    RecursionError => ExcType::RuntimeError,
    NotImplementedError => ExcType::RuntimeError,
    StopIteration => ExcType::Exception,
    EOFError => ExcType::Exception,
    AssertionError => ExcType::Exception,
    ImportError => ExcType::Exception,
    ModuleNotFoundError => ExcType::ImportError,
}

impl ExcType {
    pub fn from_name(name: &str) -> Option<ExcType> {
        ExcType::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// `issubclass(self, other)`
    pub fn is_subclass_of(self, other: ExcType) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}
