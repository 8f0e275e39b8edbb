// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scripting-engine seam.

use algo_script::{ExecError, Interpreter, ParseError, Value};
use async_trait::async_trait;
use std::sync::Arc;

/// What the supervisor needs from a scripting runtime.
///
/// Interpreter futures are `!Send`, so the trait is too; runs are driven on
/// a single-threaded runtime.
#[async_trait(?Send)]
pub trait ScriptEngine {
    /// Whether the engine has finished loading and can run programs.
    fn is_ready(&self) -> bool {
        true
    }

    /// Bind `name` in the engine's global namespace.
    fn set_global(&self, name: &str, value: Value);

    /// Execute `source` to completion.
    async fn run(&self, source: &str) -> Result<(), ExecError>;

    /// Rewrite `source` so every `input()` call is awaited, using the
    /// engine's own parser and unparser.
    fn transform_input_calls(&self, source: &str) -> Result<String, ParseError> {
        crate::transform::try_transform(source)
    }
}

#[async_trait(?Send)]
impl ScriptEngine for Interpreter {
    fn set_global(&self, name: &str, value: Value) {
        Interpreter::set_global(self, name, value);
    }

    async fn run(&self, source: &str) -> Result<(), ExecError> {
        Interpreter::run(self, source).await
    }
}

/// How the supervisor obtains an engine for each run.
pub enum EngineSource<E> {
    /// One engine for the whole session; globals persist across runs.
    Shared(Arc<E>),
    /// A fresh engine per run, built by the factory.
    PerRun(Box<dyn Fn() -> E + Send + Sync>),
}

impl<E> EngineSource<E> {
    pub fn shared(engine: E) -> Self {
        EngineSource::Shared(Arc::new(engine))
    }

    pub fn per_run(factory: impl Fn() -> E + Send + Sync + 'static) -> Self {
        EngineSource::PerRun(Box::new(factory))
    }

    pub(crate) fn acquire(&self) -> Arc<E> {
        match self {
            EngineSource::Shared(engine) => Arc::clone(engine),
            EngineSource::PerRun(factory) => Arc::new(factory()),
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
