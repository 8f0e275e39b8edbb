// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::parser::Parser;

fn errors(source: &str) -> Vec<ValidationError> {
    let module = Parser::parse(source).unwrap();
    validate(&module).err().unwrap_or_default()
}

fn messages(source: &str) -> Vec<String> {
    errors(source).iter().map(ToString::to_string).collect()
}

// ---------------------------------------------------------------------------
// Valid programs
// ---------------------------------------------------------------------------

#[yare::parameterized(
    loop_control = { "for x in xs:\n    if x:\n        break\n    continue" },
    while_loop = { "while True:\n    break" },
    return_in_def = { "def f():\n    return 1" },
    await_in_async = { "async def f():\n    await g()" },
    top_level_await = { "await main()" },
    global_first = { "def f():\n    global n\n    n = 1" },
    defaults_last = { "def f(a, b=1, c=2):\n    pass" },
    lambda_defaults = { "g = lambda a, b=2: a + b" },
    loop_in_function = { "def f():\n    for i in range(3):\n        if i:\n            return i" },
)]
fn accepts(source: &str) {
    assert_eq!(errors(source), Vec::new());
}

// ---------------------------------------------------------------------------
// Rejected programs
// ---------------------------------------------------------------------------

#[yare::parameterized(
    module_return = { "return 1", "'return' outside function" },
    module_break = { "break", "'break' not properly in loop" },
    continue_in_if = { "if x:\n    continue", "'continue' not properly in loop" },
    break_in_nested_def = {
        "for x in xs:\n    def f():\n        break",
        "'break' not properly in loop"
    },
    await_in_sync_def = { "def f():\n    return await g()", "'await' outside async function" },
    await_in_lambda = { "async def f():\n    h = lambda: await g()", "'await' outside async function" },
    late_global = { "def f():\n    n = 1\n    global n", "name 'n' is assigned to before global declaration" },
    duplicate_param = { "def f(a, a):\n    pass", "duplicate argument 'a' in function definition" },
    default_order = { "def f(a=1, b):\n    pass", "non-default argument follows default argument" },
)]
fn rejects(source: &str, expected: &str) {
    assert_eq!(messages(source), vec![expected.to_string()]);
}

#[test]
fn collects_every_error() {
    let found = messages("break\nreturn\ncontinue");
    assert_eq!(
        found,
        vec![
            "'break' not properly in loop".to_string(),
            "'return' outside function".to_string(),
            "'continue' not properly in loop".to_string(),
        ]
    );
}

#[test]
fn top_level_await_can_be_disallowed() {
    let module = Parser::parse("await main()").unwrap();
    let config = ValidatorConfig { allow_top_level_await: false };
    let errors = validate_with_config(&module, config).unwrap_err();
    assert!(matches!(errors.as_slice(), [ValidationError::AwaitOutsideAsync { .. }]));
}

#[test]
fn loop_else_is_outside_the_loop() {
    let found = messages("for x in xs:\n    pass\nelse:\n    break");
    assert_eq!(found, vec!["'break' not properly in loop".to_string()]);
}
