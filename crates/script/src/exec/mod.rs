// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async tree-walking interpreter.
//!
//! An [`Interpreter`] owns a global namespace that persists across runs.
//! The host injects values into it with [`Interpreter::set_global`]; host
//! functions created with [`Value::host_async_fn`] become awaitable from
//! scripts, which is how a script can suspend on host work.

mod builtins;
mod call;
mod error;
mod eval;
mod format;
mod methods;
mod ops;
mod run;
mod scope;
mod value;

use std::collections::HashMap;

pub use builtins::Builtin;
pub use error::{ExcType, ExecError, Exception};
pub use format::{float_repr, format_value, repr, str_repr, to_str};
pub use value::{
    Awaitable, BoundMethod, Dict, Function, HashKey, HostFn, HostFuture, HostResult, ModuleKind,
    Range, Set, Stream, Value,
};

use crate::ast::Module;
use run::{Flow, Machine};
use scope::{new_frame, Frame, Scope};

/// Native stack a host thread should give the interpreter so the default
/// recursion limit raises `RecursionError` rather than overflowing, even in
/// unoptimized builds.
pub const RUNTIME_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Interpreter limits.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Maximum depth of nested user-function calls. Each level nests boxed
    /// futures on the native stack; see [`RUNTIME_STACK_SIZE`].
    pub recursion_limit: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { recursion_limit: 200 }
    }
}

/// A script interpreter with a persistent global namespace.
pub struct Interpreter {
    globals: Frame,
    config: InterpreterConfig,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Self { globals: new_frame(), config }
    }

    /// Bind a global name, replacing any previous binding.
    pub fn set_global(&self, name: &str, value: Value) {
        self.globals.lock().insert(name.to_string(), value);
    }

    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.lock().get(name).cloned()
    }

    /// Remove a global binding, returning it.
    pub fn remove_global(&self, name: &str) -> Option<Value> {
        self.globals.lock().remove(name)
    }

    /// Names currently bound in the global namespace, sorted.
    pub fn global_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.globals.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every global binding, including host-installed ones.
    pub fn reset(&self) {
        self.globals.lock().clear();
    }

    /// Parse, validate and execute `source` in the global namespace.
    pub async fn run(&self, source: &str) -> Result<(), ExecError> {
        let module = crate::parse(source)?;
        self.exec_module(&module).await
    }

    /// Execute an already-parsed module.
    pub async fn exec_module(&self, module: &Module) -> Result<(), ExecError> {
        tracing::debug!(statements = module.body.len(), "executing module");
        let machine = Machine::new(self.globals.clone(), self.config.recursion_limit);
        let scope = Scope::module(self.globals.clone());
        match machine.exec_block(&module.body, &scope).await {
            Ok(Flow::Normal | Flow::Break | Flow::Continue | Flow::Return(_)) => Ok(()),
            Err(err) => {
                tracing::debug!(error = %err, "module raised");
                Err(err)
            }
        }
    }

    /// Snapshot of the global namespace.
    pub fn globals(&self) -> HashMap<String, Value> {
        self.globals.lock().clone()
    }
}

#[cfg(test)]
#[path = "../exec_tests/mod.rs"]
mod tests;
