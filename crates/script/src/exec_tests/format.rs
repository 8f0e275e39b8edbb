// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::exec::Set;

// ---------------------------------------------------------------------------
// repr
// ---------------------------------------------------------------------------

#[yare::parameterized(
    integral = { 3.0, "3.0" },
    fraction = { 0.1, "0.1" },
    shortest_round_trip = { 0.1 + 0.2, "0.30000000000000004" },
    negative_zero = { -0.0, "-0.0" },
    large_integral = { 1e15, "1000000000000000.0" },
    large_exponent = { 1e16, "1e+16" },
    small_exponent = { 1.5e-7, "1.5e-07" },
    infinity = { f64::INFINITY, "inf" },
    negative_infinity = { f64::NEG_INFINITY, "-inf" },
    not_a_number = { f64::NAN, "nan" },
)]
fn float_repr_matches_python(value: f64, expected: &str) {
    assert_eq!(float_repr(value), expected);
}

#[yare::parameterized(
    plain = { "abc", "'abc'" },
    single_quote_switches = { "it's", "\"it's\"" },
    both_quotes_escape = { "it's \"x\"", "'it\\'s \"x\"'" },
    newline = { "a\nb", "'a\\nb'" },
    backslash = { "a\\b", "'a\\\\b'" },
    control = { "\u{1}", "'\\x01'" },
)]
fn str_repr_quotes_like_python(input: &str, expected: &str) {
    assert_eq!(str_repr(input), expected);
}

#[test]
fn container_repr() {
    let list = Value::list(vec![Value::Int(1), Value::str("a"), Value::None]);
    assert_eq!(repr(&list), "[1, 'a', None]");
    assert_eq!(repr(&Value::tuple(vec![Value::Bool(true)])), "(True,)");
    assert_eq!(repr(&Value::tuple(Vec::new())), "()");
    assert_eq!(repr(&Value::set(Set::new())), "set()");
}

#[test]
fn str_of_string_is_unquoted() {
    assert_eq!(to_str(&Value::str("hi")), "hi");
    assert_eq!(to_str(&Value::Float(2.5)), "2.5");
}

// ---------------------------------------------------------------------------
// format()
// ---------------------------------------------------------------------------

#[yare::parameterized(
    zero_padded = { Value::Int(42), "05d", "00042" },
    zero_padded_negative = { Value::Int(-42), "05d", "-0042" },
    fixed_precision = { Value::Float(3.14159), ".2f", "3.14" },
    thousands = { Value::Int(1234567), ",", "1,234,567" },
    fixed_thousands = { Value::Float(1234.5), ",.2f", "1,234.50" },
    centered = { Value::str("ab"), "^6", "  ab  " },
    fill_left = { Value::Int(7), "*<4", "7***" },
    right_default_for_numbers = { Value::Int(7), "4", "   7" },
    left_default_for_strings = { Value::str("x"), "3", "x  " },
    percent = { Value::Float(0.256), ".1%", "25.6%" },
    explicit_plus = { Value::Int(5), "+d", "+5" },
    alternate_hex = { Value::Int(255), "#x", "0xff" },
    upper_hex = { Value::Int(255), "X", "FF" },
    binary = { Value::Int(5), "b", "101" },
    exponent = { Value::Float(12345.678), "e", "1.234568e+04" },
    general_small = { Value::Float(0.0001234), "g", "0.0001234" },
    general_large = { Value::Float(1234567.0), "g", "1.23457e+06" },
    int_as_float = { Value::Int(2), ".3f", "2.000" },
    truncated_string = { Value::str("abcdef"), ".2", "ab" },
    bool_as_int = { Value::Bool(true), "d", "1" },
    empty_spec = { Value::Float(3.0), "", "3.0" },
)]
fn format_value_applies_spec(value: Value, spec: &str, expected: &str) {
    assert_eq!(format_value(&value, spec).unwrap(), expected);
}

#[yare::parameterized(
    string_with_int_code = { Value::str("x"), "d", "ValueError: Unknown format code 'd' for object of type 'str'" },
    int_with_precision = { Value::Int(1), ".2d", "ValueError: Precision not allowed in integer format specifier" },
    trailing_garbage = { Value::Int(1), "dd", "ValueError: Invalid format specifier" },
    missing_precision = { Value::Float(1.0), ".f", "ValueError: Format specifier missing precision" },
)]
fn format_value_rejects_bad_specs(value: Value, spec: &str, expected: &str) {
    assert_eq!(format_value(&value, spec).unwrap_err().to_string(), expected);
}

// ---------------------------------------------------------------------------
// % formatting
// ---------------------------------------------------------------------------

#[yare::parameterized(
    integer = { "%d items", Value::Int(3), "3 items" },
    width_and_precision = { "%5.2f|", Value::Float(3.14159), " 3.14|" },
    left_justified = { "%-4s|", Value::str("ab"), "ab  |" },
    zero_padded = { "%05d", Value::Int(42), "00042" },
    hex = { "%x", Value::Int(255), "ff" },
    repr_conversion = { "%r", Value::str("a"), "'a'" },
    float_truncated_by_d = { "%d", Value::Float(2.9), "2" },
    literal_percent = { "100%%", Value::tuple(Vec::new()), "100%" },
    tuple_arguments = { "%s=%s", Value::tuple(vec![Value::str("k"), Value::Int(1)]), "k=1" },
)]
fn percent_format_renders(template: &str, args: Value, expected: &str) {
    assert_eq!(percent_format(template, &args).unwrap(), expected);
}

#[yare::parameterized(
    too_few = { "%d %d", Value::tuple(vec![Value::Int(1)]), "TypeError: not enough arguments for format string" },
    too_many = {
        "%d",
        Value::tuple(vec![Value::Int(1), Value::Int(2)]),
        "TypeError: not all arguments converted during string formatting"
    },
    number_required = { "%d", Value::str("x"), "TypeError: %d format: a real number is required, not str" },
    incomplete = { "50%", Value::tuple(Vec::new()), "ValueError: incomplete format" },
)]
fn percent_format_errors(template: &str, args: Value, expected: &str) {
    assert_eq!(percent_format(template, &args).unwrap_err().to_string(), expected);
}
