// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for host integration: injected functions, sinks and globals.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::capture;
use crate::exec::{ExcType, ExecError, Interpreter, Value};

fn counting_fetch(calls: Arc<AtomicUsize>) -> Value {
    Value::host_async_fn("fetch", move |args| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            let key = args.first().and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default();
            Ok(Value::str(format!("value of {key}")))
        }
    })
}

// ---------------------------------------------------------------------------
// Host functions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sync_host_function_is_called_directly() {
    let interpreter = Interpreter::new();
    let stdout = capture(&interpreter, "__stdout__");
    interpreter.set_global(
        "double",
        Value::host_fn("double", |args| match args.as_slice() {
            [Value::Int(n)] => Ok(Value::Int(n * 2)),
            _ => Err(ExecError::type_error("double() expects an int")),
        }),
    );
    interpreter.run("print(double(21))").await.unwrap();
    assert_eq!(*stdout.lock(), "42\n");
}

#[tokio::test]
async fn host_errors_surface_as_exceptions() {
    let interpreter = Interpreter::new();
    let stdout = capture(&interpreter, "__stdout__");
    interpreter.set_global(
        "fail",
        Value::host_fn("fail", |_| Err(ExecError::value_error("host says no"))),
    );
    let source = "try:\n    fail()\nexcept ValueError as e:\n    print('caught', e)";
    interpreter.run(source).await.unwrap();
    assert_eq!(*stdout.lock(), "caught host says no\n");
}

#[tokio::test]
async fn async_host_function_without_await_is_a_coroutine() {
    let calls = Arc::new(AtomicUsize::new(0));
    let interpreter = Interpreter::new();
    let stdout = capture(&interpreter, "__stdout__");
    interpreter.set_global("fetch", counting_fetch(calls.clone()));

    interpreter.run("print(fetch('a'))").await.unwrap();

    assert_eq!(*stdout.lock(), "<coroutine object fetch>\n");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn awaiting_async_host_function_returns_its_value() {
    let calls = Arc::new(AtomicUsize::new(0));
    let interpreter = Interpreter::new();
    let stdout = capture(&interpreter, "__stdout__");
    interpreter.set_global("fetch", counting_fetch(calls.clone()));

    let source = "async def main():\n    v = await fetch('k')\n    print(v)\nawait main()";
    interpreter.run(source).await.unwrap();

    assert_eq!(*stdout.lock(), "value of k\n");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn awaiting_twice_is_a_runtime_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let interpreter = Interpreter::new();
    capture(&interpreter, "__stdout__");
    interpreter.set_global("fetch", counting_fetch(calls.clone()));

    let err = interpreter.run("c = fetch('x')\nawait c\nawait c").await.unwrap_err();

    assert_eq!(err.exc_type(), Some(ExcType::RuntimeError));
    assert_eq!(err.message(), "cannot reuse already awaited coroutine");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn async_user_function_runs_only_when_awaited() {
    let (output, result) = super::run(
        "async def greet():\n    print('ran')\ng = greet()\nprint('before')\nawait g",
    )
    .await;
    result.unwrap();
    assert_eq!(output, "before\nran\n");
}

// ---------------------------------------------------------------------------
// Output sinks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stderr_is_routed_to_its_own_sink() {
    let interpreter = Interpreter::new();
    let stdout = capture(&interpreter, "__stdout__");
    let stderr = capture(&interpreter, "__stderr__");
    let source = "import sys\nprint('out')\nprint('err', file=sys.stderr)\nsys.stderr.write('raw')";
    interpreter.run(source).await.unwrap();
    assert_eq!(*stdout.lock(), "out\n");
    assert_eq!(*stderr.lock(), "err\nraw");
}

#[tokio::test]
async fn output_without_sink_is_discarded() {
    let interpreter = Interpreter::new();
    interpreter.run("print('nobody hears this')\nx = 1").await.unwrap();
    assert!(matches!(interpreter.get_global("x"), Some(Value::Int(1))));
}

#[tokio::test]
async fn async_sink_is_awaited() {
    let interpreter = Interpreter::new();
    let written = Arc::new(parking_lot::Mutex::new(Vec::<String>::new()));
    let sink = written.clone();
    interpreter.set_global(
        "__stdout__",
        Value::host_async_fn("__stdout__", move |args| {
            let sink = sink.clone();
            async move {
                if let Some(text) = args.first().and_then(Value::as_str) {
                    sink.lock().push(text.to_string());
                }
                Ok(Value::None)
            }
        }),
    );
    interpreter.run("print('a')\nprint('b', end='')").await.unwrap();
    assert_eq!(*written.lock(), vec!["a\n".to_string(), "b".to_string()]);
}

// ---------------------------------------------------------------------------
// Input overrides
// ---------------------------------------------------------------------------

#[tokio::test]
async fn async_input_override_feeds_the_script() {
    let interpreter = Interpreter::new();
    let stdout = capture(&interpreter, "__stdout__");
    interpreter.set_global(
        "input",
        Value::host_async_fn("input", |_| async { Ok(Value::str("Bob")) }),
    );
    let source = "async def __main__():\n    name = await input('Name? ')\n    print('Hi', name)\nawait __main__()";
    interpreter.run(source).await.unwrap();
    assert_eq!(*stdout.lock(), "Hi Bob\n");
}

#[tokio::test]
async fn sync_input_override_needs_no_await() {
    let interpreter = Interpreter::new();
    let stdout = capture(&interpreter, "__stdout__");
    interpreter.set_global("input", Value::host_fn("input", |_| Ok(Value::str("7"))));
    interpreter.run("n = int(input())\nprint(n * 6)").await.unwrap();
    assert_eq!(*stdout.lock(), "42\n");
}

// ---------------------------------------------------------------------------
// Globals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn globals_persist_across_runs() {
    let interpreter = Interpreter::new();
    let stdout = capture(&interpreter, "__stdout__");
    interpreter.run("total = 10\ndef add(n):\n    return total + n").await.unwrap();
    interpreter.run("print(add(5))").await.unwrap();
    assert_eq!(*stdout.lock(), "15\n");
    assert!(interpreter.global_names().contains(&"add".to_string()));
}

#[tokio::test]
async fn reset_clears_globals() {
    let interpreter = Interpreter::new();
    interpreter.run("x = 1").await.unwrap();
    interpreter.reset();
    assert!(interpreter.get_global("x").is_none());
    let err = interpreter.run("x").await.unwrap_err();
    assert_eq!(err.exc_type(), Some(ExcType::NameError));
}

#[tokio::test]
async fn remove_global_unbinds_one_name() {
    let interpreter = Interpreter::new();
    interpreter.run("a = 1\nb = 2").await.unwrap();
    assert!(interpreter.remove_global("a").is_some());
    assert!(interpreter.get_global("a").is_none());
    assert!(interpreter.get_global("b").is_some());
}
