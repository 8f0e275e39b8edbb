// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::parser::Parser;

fn roundtrip(source: &str) -> String {
    let module = Parser::parse(source).unwrap();
    unparse(&module)
}

/// Unparsing must be a fixed point after one pass.
fn assert_stable(source: &str) {
    let once = roundtrip(source);
    let twice = roundtrip(&once);
    assert_eq!(once, twice, "unparse is not stable for:\n{source}");
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[yare::parameterized(
    name = { "x", "x" },
    double_quotes_normalized = { "\"hi\"", "'hi'" },
    quote_inside = { "\"it's\"", "\"it's\"" },
    escapes = { "'a\\tb\\n'", "'a\\tb\\n'" },
    float = { "2.50", "2.5" },
    exponent_float = { "1e20", "1e+20" },
    redundant_parens = { "(a + b)", "a + b" },
    needed_parens = { "(a + b) * c", "(a + b) * c" },
    left_associative = { "a - (b - c)", "a - (b - c)" },
    left_chain = { "(a - b) - c", "a - b - c" },
    power_right_associative = { "a ** b ** c", "a ** b ** c" },
    power_left_group = { "(a ** b) ** c", "(a ** b) ** c" },
    negative_power = { "-x ** 2", "-x ** 2" },
    negated_base = { "(-x) ** 2", "(-x) ** 2" },
    not_comparison = { "not a == b", "not a == b" },
    bool_mix = { "a or b and c", "a or b and c" },
    grouped_or = { "(a or b) and c", "(a or b) and c" },
    chained_compare = { "a < b <= c", "a < b <= c" },
    membership = { "x not in y", "x not in y" },
    identity = { "x is not None", "x is not None" },
    conditional = { "a if b else c", "a if b else c" },
    call_keywords = { "f(1, sep='', end = '\\n')", "f(1, sep='', end='\\n')" },
    keywords_only = { "f(x=1)", "f(x=1)" },
    attribute_chain = { "a.b.c()", "a.b.c()" },
    int_attribute = { "(1).real", "(1).real" },
    subscript = { "d['k'][0]", "d['k'][0]" },
    slices = { "s[1:2], s[::2], s[:]", "s[1:2], s[::2], s[:]" },
    tuple_index = { "m[1, 2]", "m[1, 2]" },
    single_tuple = { "(1,)", "1," },
    empty_tuple = { "()", "()" },
    nested_tuple = { "[(1, 2)]", "[(1, 2)]" },
    dict_display = { "{'a': 1, 'b': [2]}", "{'a': 1, 'b': [2]}" },
    set_display = { "{1, 2}", "{1, 2}" },
    list_comprehension = { "[x * 2 for x in xs if x]", "[x * 2 for x in xs if x]" },
    dict_comprehension = { "{k: v for k, v in items}", "{k: v for k, v in items}" },
    generator_argument = { "sum(x for x in xs)", "sum((x for x in xs))" },
    lambda_expr = { "lambda a, b=1: a + b", "lambda a, b=1: a + b" },
    lambda_no_params = { "lambda: 0", "lambda: 0" },
    await_call = { "await f(x)", "await f(x)" },
    awaited_operand = { "(await f()) + 1", "await f() + 1" },
    fstring = { "f'{x!r:>4} and {y}'", "f'{x!r:>4} and {y}'" },
    fstring_braces = { "f'{{literal}} {v}'", "f'{{literal}} {v}'" },
    fstring_quote_switch = { "f\"{d['k']}\"", "f\"{d['k']}\"" },
    fstring_conditional_field = { "f'{a if b else c}'", "f'{(a if b else c)}'" },
)]
fn expression(source: &str, expected: &str) {
    assert_eq!(roundtrip(source), expected);
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[test]
fn simple_statements() {
    let source = "x = y = 1\nx += 2\nn: int = 3\ndel_ = None\nimport sys, math as m\nglobal a, b\nassert x, 'msg'\nraise\npass";
    let expected = "x = y = 1\nx += 2\nn: int = 3\ndel_ = None\nimport sys, math as m\nglobal a, b\nassert x, 'msg'\nraise\npass";
    assert_eq!(roundtrip(source), expected);
}

#[test]
fn tuple_assignment_has_no_parens() {
    assert_eq!(roundtrip("a, b = b, a"), "a, b = b, a");
}

#[test]
fn semicolons_become_lines() {
    assert_eq!(roundtrip("a = 1; b = 2"), "a = 1\nb = 2");
}

#[test]
fn if_elif_else() {
    let source = "if a:\n  x = 1\nelif b:\n  x = 2\nelse:\n  x = 3\n";
    let expected = "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3";
    assert_eq!(roundtrip(source), expected);
}

#[test]
fn loops_with_else() {
    let source = "for i, v in enumerate(xs):\n    if v:\n        break\nelse:\n    continue_ = 1\nwhile n > 0:\n    n -= 1";
    let expected = "for i, v in enumerate(xs):\n    if v:\n        break\nelse:\n    continue_ = 1\nwhile n > 0:\n    n -= 1";
    assert_eq!(roundtrip(source), expected);
}

#[test]
fn function_definitions() {
    let source = "async def fetch(url: str, retries=3, timeout: float = 1.0) -> dict:\n    return await get(url)\ndef noop(): pass";
    let expected = "async def fetch(url: str, retries=3, timeout: float = 1.0) -> dict:\n    return await get(url)\ndef noop():\n    pass";
    assert_eq!(roundtrip(source), expected);
}

#[test]
fn try_statement() {
    let source = "try:\n    f()\nexcept (KeyError, IndexError) as e:\n    g(e)\nexcept:\n    raise\nelse:\n    h()\nfinally:\n    done()";
    let expected = "try:\n    f()\nexcept (KeyError, IndexError) as e:\n    g(e)\nexcept:\n    raise\nelse:\n    h()\nfinally:\n    done()";
    assert_eq!(roundtrip(source), expected);
}

#[test]
fn empty_block_becomes_pass() {
    let mut module = Parser::parse("def f():\n    pass").unwrap();
    if let StmtKind::FunctionDef(def) = &mut module.body[0].kind {
        def.body.clear();
    }
    assert_eq!(unparse(&module), "def f():\n    pass");
}

#[test]
fn empty_module_is_empty() {
    assert_eq!(roundtrip(""), "");
    assert_eq!(roundtrip("# just a comment\n"), "");
}

#[test]
fn unparse_expr_renders_bare_tuple() {
    let expr = Parser::parse_expression("a, (b, c)").unwrap();
    assert_eq!(unparse_expr(&expr), "a, (b, c)");
}

// ---------------------------------------------------------------------------
// Stability
// ---------------------------------------------------------------------------

#[yare::parameterized(
    arithmetic = { "x = -(a + b) * c ** -d // 2 % 3" },
    logic = { "ok = not (a and b) or (c if d else e)" },
    strings = { "s = 'a' \"b\" + f'{x}{{}}{y!s}'" },
    nested_functions = { "def outer():\n    def inner(a=[1, 2]):\n        return a[::-1]\n    return inner" },
    comprehensions = { "m = {k: [v for v in vs if v > 0] for k, vs in d.items()}" },
    program = { "name = await input('Name? ')\nprint(f'Hi {name}')\nfor i in range(3):\n    print(i, end=' ')" },
)]
fn stable(source: &str) {
    assert_stable(source);
}
