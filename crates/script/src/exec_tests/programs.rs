// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-program tests: statements, expressions and builtins.

use super::output_of;

// ---------------------------------------------------------------------------
// Printing and literals
// ---------------------------------------------------------------------------

#[yare::parameterized(
    print_args = { "print('hello', 42)", "hello 42\n" },
    print_sep_end = { "print(1, 2, 3, sep='-', end='!')", "1-2-3!" },
    print_empty = { "print()", "\n" },
    nested_repr = {
        "print([1, 'two', (3,), {'k': None}, [], 2.0])",
        "[1, 'two', (3,), {'k': None}, [], 2.0]\n"
    },
    string_repr = { "print(repr('it\\'s'), repr('a\\nb'))", "\"it's\" 'a\\nb'\n" },
    float_repr = {
        "print(0.1 + 0.2, 1.0, 1e20, 1.5e-7, 3.0 * 2)",
        "0.30000000000000004 1.0 1e+20 1.5e-07 6.0\n"
    },
    booleans = { "print(True, False, None)", "True False None\n" },
)]
fn printing(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

#[yare::parameterized(
    arithmetic = {
        "print(7 // 2, -7 // 2, 7 % 3, -7 % 3, 2 ** 10, 7 / 2)",
        "3 -4 1 2 1024 3.5\n"
    },
    chained_compare = { "x = 5\nprint(1 < x <= 5, 1 < x < 3, x is not None)", "True False True\n" },
    bool_ops = { "print(0 or 'default', 1 and 2, not [])", "default 2 True\n" },
    membership = { "print(2 in [1, 2], 'b' not in 'abc', 3 in range(0, 10, 3))", "True False True\n" },
    sequence_ops = { "print('ab' * 2, [0] * 3, (1,) + (2,))", "abab [0, 0, 0] (1, 2)\n" },
    percent_format = {
        "print('%s has %d items (%.1f%%)' % ('cart', 3, 42.26))",
        "cart has 3 items (42.3%)\n"
    },
    conditional_expr = { "x = 3\nprint('odd' if x % 2 else 'even')", "odd\n" },
)]
fn operators(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

#[yare::parameterized(
    methods = {
        "s = 'Hello, World'\nprint(s.upper(), s.lower(), s.split(', '), s.replace('l', 'L'), s.find('World'))",
        "HELLO, WORLD hello, world ['Hello', 'World'] HeLLo, WorLd 7\n"
    },
    fstrings = {
        "name = 'Ada'\nn = 3.14159\nprint(f'{name!r} {n:.2f} {n=:.1f} {10:>4}|{\"x\":<3}|')",
        "'Ada' 3.14 n=3.1   10|x  |\n"
    },
    str_format = {
        "print('{} + {} = {:>3}'.format(1, 2, 3), '{name}!'.format(name='hi'))",
        "1 + 2 =   3 hi!\n"
    },
    join_and_strip = { "print('-'.join(['a', 'b', 'c']), '  x  '.strip() + '|')", "a-b-c x|\n" },
    slicing = { "s = 'abcdef'\nprint(s[1:4], s[::-1], s[-2:], s[::2])", "bcd fedcba ef ace\n" },
    iterate_chars = { "for c in 'hi':\n    print(c)", "h\ni\n" },
)]
fn strings(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

#[yare::parameterized(
    list_ops = {
        "xs = [3, 1, 2]\nxs.append(5)\nxs.sort()\nprint(xs, len(xs), xs[-1], xs[1:3], sum(xs), min(xs), max(xs))",
        "[1, 2, 3, 5] 4 5 [2, 3] 11 1 5\n"
    },
    dict_ops = {
        "d = {'a': 1}\nd['b'] = 2\nprint(d, d.get('c', 0), list(d.keys()), 'a' in d)",
        "{'a': 1, 'b': 2} 0 ['a', 'b'] True\n"
    },
    aug_assign_extends_in_place = { "a = [1]\nb = a\nb += [2]\nprint(a)", "[1, 2]\n" },
    tuple_swap = { "a, b = 1, 2\na, b = b, a\nprint(a, b)", "2 1\n" },
    comprehensions = {
        "print([x * x for x in range(5) if x % 2 == 0], {k: len(k) for k in ['a', 'bb']}, sum(x for x in range(4)))",
        "[0, 4, 16] {'a': 1, 'bb': 2} 6\n"
    },
    sets = { "s = {3, 1, 3}\ns.add(2)\nprint(len(s), 2 in s, sorted(s))", "3 True [1, 2, 3]\n" },
    sorted_with_key = {
        "words = ['pear', 'fig', 'apple']\nprint(sorted(words, key=lambda w: len(w)), sorted(words, reverse=True))",
        "['fig', 'pear', 'apple'] ['pear', 'fig', 'apple']\n"
    },
    slice_assignment = { "xs = [1, 2, 3, 4]\nxs[1:3] = ['a']\nprint(xs)", "[1, 'a', 4]\n" },
)]
fn containers(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}

// ---------------------------------------------------------------------------
// Control flow
// ---------------------------------------------------------------------------

#[yare::parameterized(
    loops = {
        "total = 0\nfor i in range(5):\n    if i == 3:\n        continue\n    total += i\nprint(total)\nwhile True:\n    total -= 1\n    if total < 5:\n        break\nprint(total)",
        "7\n4\n"
    },
    for_else = { "for i in range(3):\n    pass\nelse:\n    print('done', i)", "done 2\n" },
    while_else_skipped_on_break = {
        "n = 0\nwhile n < 10:\n    n += 1\n    if n == 2:\n        break\nelse:\n    print('never')\nprint(n)",
        "2\n"
    },
    enumerate_zip = {
        "for i, (a, b) in enumerate(zip('ab', [1, 2]), start=1):\n    print(i, a, b)",
        "1 a 1\n2 b 2\n"
    },
    elif_chain = {
        "for n in [1, 15, 30]:\n    if n < 10:\n        print('small')\n    elif n < 20:\n        print('medium')\n    else:\n        print('large')",
        "small\nmedium\nlarge\n"
    },
)]
fn control_flow(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

#[yare::parameterized(
    defaults_and_keywords = {
        "def greet(name, greeting='Hello'):\n    return f'{greeting}, {name}!'\nprint(greet('Bob'))\nprint(greet(greeting='Hi', name='Ann'))",
        "Hello, Bob!\nHi, Ann!\n"
    },
    closures = {
        "def make_counter():\n    count = [0]\n    def inc():\n        count[0] += 1\n        return count[0]\n    return inc\nc = make_counter()\nc()\nprint(c())",
        "2\n"
    },
    recursion = {
        "def fib(n):\n    return n if n < 2 else fib(n - 1) + fib(n - 2)\nprint(fib(15))",
        "610\n"
    },
    global_statement = {
        "count = 0\ndef bump():\n    global count\n    count += 1\nbump()\nbump()\nprint(count)",
        "2\n"
    },
    async_def_awaited = { "async def f(x):\n    return x + 1\nprint(await f(1))", "2\n" },
    nested_async_calls = {
        "async def inner():\n    return 'in'\nasync def outer():\n    return (await inner()) + 'out'\nprint(await outer())",
        "inout\n"
    },
    map_filter = {
        "print(list(map(lambda x: x * 2, [1, 2])), list(filter(None, [0, 1, 2])))",
        "[2, 4] [1, 2]\n"
    },
)]
fn functions(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}

// ---------------------------------------------------------------------------
// Exceptions
// ---------------------------------------------------------------------------

#[yare::parameterized(
    caught_with_finally = {
        "try:\n    1 / 0\nexcept ZeroDivisionError as e:\n    print('caught', e)\nfinally:\n    print('cleanup')",
        "caught division by zero\ncleanup\n"
    },
    hierarchy = {
        "try:\n    [][1]\nexcept LookupError as e:\n    print(type(e).__name__, e)",
        "IndexError list index out of range\n"
    },
    exception_args = {
        "try:\n    raise ValueError('bad', 2)\nexcept ValueError as e:\n    print(e.args, repr(e))",
        "('bad', 2) ValueError('bad', 2)\n"
    },
    else_runs_without_error = {
        "try:\n    x = 1\nexcept Exception:\n    print('no')\nelse:\n    print('else', x)",
        "else 1\n"
    },
    finally_overrides_return = {
        "def f():\n    try:\n        return 1\n    finally:\n        return 2\nprint(f())",
        "2\n"
    },
    bare_raise_reraises = {
        "try:\n    try:\n        1 / 0\n    except ZeroDivisionError:\n        raise\nexcept ArithmeticError as e:\n    print('outer', e)",
        "outer division by zero\n"
    },
    tuple_of_types = {
        "try:\n    int('x')\nexcept (TypeError, ValueError):\n    print('handled')",
        "handled\n"
    },
)]
fn exceptions(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}

// ---------------------------------------------------------------------------
// Builtins and modules
// ---------------------------------------------------------------------------

#[yare::parameterized(
    conversions = {
        "print(int('42') + 1, float('2.5'), int(3.9), str(7) + '!', round(2.5), round(3.14159, 2))",
        "43 2.5 3 7! 2 3.14\n"
    },
    isinstance_checks = {
        "print(isinstance(True, int), isinstance(1.0, (int, float)), isinstance('x', list))",
        "True True False\n"
    },
    math_module = {
        "import math\nprint(math.sqrt(16), math.floor(2.7), math.gcd(12, 18), math.pi > 3)",
        "4.0 2 6 True\n"
    },
    import_alias = { "import math as m\nprint(m.ceil(1.2))", "2\n" },
    type_names = { "print(type(1), type('a'), type([]))", "<class 'int'> <class 'str'> <class 'list'>\n" },
    abs_divmod_pow = { "print(abs(-3), divmod(7, 2), pow(2, 8), pow(3, 4, 5))", "3 (3, 1) 256 1\n" },
    any_all = { "print(any([0, 1]), all([1, 0]), all([]))", "True False True\n" },
    chr_ord = { "print(chr(65), ord('a'), hex(255), bin(5))", "A 97 0xff 0b101\n" },
    sys_stdout_write = { "import sys\nn = sys.stdout.write('hi\\n')\nprint(n)", "hi\n3\n" },
)]
fn builtins(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}
