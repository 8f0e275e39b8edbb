// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    assignment = { "x = input(\"q\")", "x = await input('q')" },
    no_arguments = { "input()", "await input()" },
    nested_in_call = { "n = int(input())", "n = int(await input())" },
    both_operands = { "print(input('a') + input('b'))", "print(await input('a') + await input('b'))" },
    inside_argument = { "input(input())", "await input(await input())" },
    fstring_field = { "print(f'{input()}')", "print(f'{await input()}')" },
    comprehension = { "xs = [input() for _ in range(2)]", "xs = [await input() for _ in range(2)]" },
    in_condition = { "while input() != 'q':\n    pass", "while await input() != 'q':\n    pass" },
    in_function = { "def ask():\n    return input('? ')", "def ask():\n    return await input('? ')" },
    already_awaited = { "x = await input()", "x = await input()" },
)]
fn wraps_input_calls(source: &str, expected: &str) {
    assert_eq!(try_transform(source).unwrap(), expected);
}

#[yare::parameterized(
    attribute_call = { "obj.input()" },
    bare_reference = { "f = input" },
    other_call = { "print('input')" },
    keyword_named_input = { "f(input=1)" },
)]
fn leaves_other_code_alone(source: &str) {
    assert_eq!(try_transform(source).unwrap(), source);
}

#[test]
fn invalid_source_is_returned_unchanged() {
    let source = "x = input(\n";
    assert!(try_transform(source).is_err());
    assert_eq!(transform(source), source);
}

#[test]
fn validation_failure_is_returned_unchanged() {
    let source = "break\nx = input()";
    assert_eq!(transform(source), source);
}

#[test]
fn transform_is_idempotent() {
    let once = transform("a = input('a')\nb = int(input())");
    assert_eq!(transform(&once), once);
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[test]
fn wraps_program_in_async_main() {
    assert_eq!(
        wrap_entry_point("x = 1\nif x:\n    print(x)"),
        "async def __main__():\n    x = 1\n    if x:\n        print(x)\nawait __main__()\n"
    );
}

#[test]
fn empty_program_becomes_pass() {
    assert_eq!(wrap_entry_point(""), "async def __main__():\n    pass\nawait __main__()\n");
}

#[test]
fn wrapped_program_parses() {
    let wrapped = wrap_entry_point(&transform("name = input('Name: ')\nprint('Hi ' + name)"));
    assert!(algo_script::parse(&wrapped).is_ok(), "{wrapped}");
}
