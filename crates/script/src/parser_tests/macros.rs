// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test macros for script parser tests.

/// Generate parse success tests that verify the top-level statement count.
///
/// ```ignore
/// parse_tests! {
///     two_lines: "a = 1\nb = 2" => statements: 2,
/// }
/// ```
macro_rules! parse_tests {
    ($($name:ident: $input:expr => statements: $count:expr),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let module = Parser::parse($input)
                    .expect(concat!("failed to parse: ", $input));
                assert_eq!(
                    module.body.len(), $count,
                    "input: {:?}, expected {} statements, got {}",
                    $input, $count, module.body.len()
                );
            }
        )*
    };
}

/// Generate parse error tests.
///
/// ```ignore
/// parse_error_tests! {
///     unclosed: "f(" => ParseError::UnexpectedEof { .. },
/// }
/// ```
macro_rules! parse_error_tests {
    ($($name:ident: $input:expr => $error:pat),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let result = Parser::parse($input);
                assert!(
                    matches!(result, Err($error)),
                    "expected error {:?} for input {:?}, got {:?}",
                    stringify!($error), $input, result
                );
            }
        )*
    };
}
