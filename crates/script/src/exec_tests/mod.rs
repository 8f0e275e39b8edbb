// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the interpreter.

use std::sync::Arc;

use parking_lot::Mutex;

use super::*;

mod errors;
mod host;
mod programs;

/// Install a `__stdout__` sink that appends into the returned buffer.
pub(crate) fn capture(interpreter: &Interpreter, sink: &str) -> Arc<Mutex<String>> {
    let buffer = Arc::new(Mutex::new(String::new()));
    let writer = buffer.clone();
    interpreter.set_global(
        sink,
        Value::host_fn(sink, move |args| {
            if let Some(Value::Str(text)) = args.first() {
                writer.lock().push_str(text);
            }
            Ok(Value::None)
        }),
    );
    buffer
}

/// Run `source` in a fresh interpreter, returning captured stdout.
pub(crate) async fn run(source: &str) -> (String, Result<(), ExecError>) {
    let interpreter = Interpreter::new();
    let stdout = capture(&interpreter, "__stdout__");
    let result = interpreter.run(source).await;
    let output = stdout.lock().clone();
    (output, result)
}

/// Sync wrapper for async execution in parameterized tests.
pub(crate) fn run_async<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
}

/// Run `source` and return its output, failing the test on error.
pub(crate) fn output_of(source: &str) -> String {
    let (output, result) = run_async(run(source));
    if let Err(err) = result {
        panic!("script failed: {err}\n--- source ---\n{source}\n--- output ---\n{output}");
    }
    output
}

/// Run `source` and return the rendered error.
pub(crate) fn error_of(source: &str) -> String {
    let (_, result) = run_async(run(source));
    match result {
        Ok(()) => panic!("script succeeded unexpectedly:\n{source}"),
        Err(err) => err.to_string(),
    }
}
