// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test doubles for the engine seam.

use crate::ScriptEngine;
use algo_script::{ExecError, Interpreter, Value};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A real interpreter behind a readiness switch, recording every source
/// it is asked to run.
#[derive(Default)]
pub struct FakeEngine {
    interpreter: Interpreter,
    loading: AtomicBool,
    runs: Mutex<Vec<String>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that reports it is still loading.
    pub fn loading() -> Self {
        let engine = Self::default();
        engine.loading.store(true, Ordering::SeqCst);
        engine
    }

    pub fn finish_loading(&self) {
        self.loading.store(false, Ordering::SeqCst);
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Sources passed to `run`, oldest first.
    pub fn runs(&self) -> Vec<String> {
        self.runs.lock().clone()
    }
}

#[async_trait(?Send)]
impl ScriptEngine for FakeEngine {
    fn is_ready(&self) -> bool {
        !self.loading.load(Ordering::SeqCst)
    }

    fn set_global(&self, name: &str, value: Value) {
        self.interpreter.set_global(name, value);
    }

    async fn run(&self, source: &str) -> Result<(), ExecError> {
        self.runs.lock().push(source.to_string());
        self.interpreter.run(source).await
    }
}
