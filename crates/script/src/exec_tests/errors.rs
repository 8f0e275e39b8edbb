// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for uncaught exceptions and their rendering.

use super::{capture, error_of, run};
use crate::exec::{ExcType, ExecError, Interpreter, InterpreterConfig};

// ---------------------------------------------------------------------------
// Rendered messages
// ---------------------------------------------------------------------------

#[yare::parameterized(
    zero_division = { "1 / 0", "ZeroDivisionError: division by zero" },
    int_modulo_zero = { "5 % 0", "ZeroDivisionError: integer modulo by zero" },
    name_error = { "undefined_name", "NameError: name 'undefined_name' is not defined" },
    index_error = { "[1, 2][5]", "IndexError: list index out of range" },
    key_error = { "{'a': 1}['b']", "KeyError: 'b'" },
    concat_type_error = { "'a' + 1", "TypeError: can only concatenate str (not \"int\") to str" },
    unsupported_operand = { "None - 1", "TypeError: unsupported operand type(s) for -: 'NoneType' and 'int'" },
    bad_int_literal = { "int('abc')", "ValueError: invalid literal for int() with base 10: 'abc'" },
    raise_with_message = { "raise ValueError('bad')", "ValueError: bad" },
    raise_class = { "raise RuntimeError", "RuntimeError" },
    bare_raise_without_active = { "raise", "RuntimeError: No active exception to reraise" },
    raise_non_exception = { "raise 5", "TypeError: exceptions must derive from BaseException" },
    assertion = { "assert 1 == 2, 'math is broken'", "AssertionError: math is broken" },
    too_many_values = { "x, y = [1, 2, 3]", "ValueError: too many values to unpack (expected 2)" },
    not_enough_values = { "a, b, c = (1,)", "ValueError: not enough values to unpack (expected 3, got 1)" },
    missing_module = { "import random", "ModuleNotFoundError: No module named 'random'" },
    missing_argument = {
        "def f(a, b):\n    pass\nf(1)",
        "TypeError: f() missing 1 required positional argument: 'b'"
    },
    too_many_arguments = {
        "def f(a):\n    pass\nf(1, 2)",
        "TypeError: f() takes 1 positional argument but 2 were given"
    },
    no_len = { "len(5)", "TypeError: object of type 'int' has no len()" },
    no_attribute = { "None.foo", "AttributeError: 'NoneType' object has no attribute 'foo'" },
    pop_empty = { "[].pop()", "IndexError: pop from empty list" },
    not_callable = { "x = 3\nx()", "TypeError: 'int' object is not callable" },
    unorderable = { "1 < 'a'", "TypeError: '<' not supported between instances of 'int' and 'str'" },
    unhashable = { "{[1]: 2}", "TypeError: unhashable type: 'list'" },
    huge_string_repeat = { "'ab' * 9223372036854775807", "OverflowError: repeated string is too long" },
    huge_list_repeat = { "[1, 2] * 4611686018427387904", "MemoryError" },
    huge_tuple_repeat = { "(0,) * (2 ** 40)", "MemoryError" },
    huge_ljust = { "'x'.ljust(10 ** 12)", "MemoryError" },
    huge_zfill = { "'7'.zfill(10 ** 12)", "MemoryError" },
    huge_format_width = { "f'{1:999999999999}'", "ValueError: Too many decimal digits in format string" },
    default_input_is_eof = { "input()", "EOFError: EOF when reading a line" },
    handler_name_is_unbound = {
        "try:\n    1 / 0\nexcept Exception as e:\n    pass\nprint(e)",
        "NameError: name 'e' is not defined"
    },
)]
fn uncaught(source: &str, expected: &str) {
    assert_eq!(error_of(source), expected);
}

// ---------------------------------------------------------------------------
// Error values
// ---------------------------------------------------------------------------

#[tokio::test]
async fn exception_exposes_kind_and_message() {
    let (_, result) = run("raise KeyError('missing')").await;
    let err = result.unwrap_err();
    assert_eq!(err.exc_type(), Some(ExcType::KeyError));
    assert_eq!(err.kind_name(), "KeyError");
    assert_eq!(err.message(), "'missing'");
}

#[test]
fn unclosed_call_is_a_syntax_error() {
    assert!(error_of("print(").starts_with("SyntaxError: "));
}

#[tokio::test]
async fn syntax_errors_are_not_exceptions() {
    let (_, result) = run("def f(:\n    pass").await;
    let err = result.unwrap_err();
    assert!(matches!(err, ExecError::Syntax(_)), "got {err:?}");
    assert_eq!(err.exc_type(), None);
    assert_eq!(err.kind_name(), "SyntaxError");
}

#[tokio::test]
async fn output_before_failure_is_kept() {
    let (output, result) = run("print('before')\n1 / 0\nprint('after')").await;
    assert_eq!(output, "before\n");
    assert_eq!(result.unwrap_err().exc_type(), Some(ExcType::ZeroDivisionError));
}

#[tokio::test]
async fn finally_runs_before_exception_propagates() {
    let (output, result) = run("try:\n    1 / 0\nfinally:\n    print('f')").await;
    assert_eq!(output, "f\n");
    assert!(result.is_err());
}

#[tokio::test]
async fn recursion_limit_raises_recursion_error() {
    let interpreter = Interpreter::with_config(InterpreterConfig { recursion_limit: 20 });
    let result = interpreter.run("def f(n):\n    return f(n + 1)\nf(0)").await;
    let err = result.unwrap_err();
    assert_eq!(err.exc_type(), Some(ExcType::RecursionError));
    assert_eq!(err.to_string(), "RecursionError: maximum recursion depth exceeded");
}

#[tokio::test]
async fn recursion_error_is_catchable_as_runtime_error() {
    let interpreter = Interpreter::with_config(InterpreterConfig { recursion_limit: 10 });
    let stdout = capture(&interpreter, "__stdout__");
    let source = "def f():\n    f()\ntry:\n    f()\nexcept RuntimeError:\n    print('deep')";
    interpreter.run(source).await.unwrap();
    assert_eq!(*stdout.lock(), "deep\n");
}

#[test]
fn exception_hierarchy() {
    assert!(ExcType::ZeroDivisionError.is_subclass_of(ExcType::ArithmeticError));
    assert!(ExcType::KeyError.is_subclass_of(ExcType::Exception));
    assert!(!ExcType::KeyboardInterrupt.is_subclass_of(ExcType::Exception));
    assert!(ExcType::ModuleNotFoundError.is_subclass_of(ExcType::ImportError));
    assert_eq!(ExcType::from_name("EOFError"), Some(ExcType::EOFError));
    assert_eq!(ExcType::from_name("NotAnError"), None);
}
