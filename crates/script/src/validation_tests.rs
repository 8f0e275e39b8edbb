// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn validation_error_span_returns_correct_span() {
    let span = Span::new(5, 10);

    let cases = [
        ValidationError::AwaitOutsideAsync { span },
        ValidationError::ReturnOutsideFunction { span },
        ValidationError::NotInLoop { keyword: "break", span },
        ValidationError::AssignedBeforeGlobal { name: "x".to_string(), span },
        ValidationError::DuplicateArgument { name: "a".to_string(), span },
        ValidationError::NonDefaultAfterDefault { span },
    ];

    for error in &cases {
        assert_eq!(error.span(), span, "error variant: {error:?}");
    }
}

#[test]
fn validation_error_display_messages() {
    let span = Span::new(0, 5);

    assert_eq!(
        ValidationError::AwaitOutsideAsync { span }.to_string(),
        "'await' outside async function"
    );
    assert_eq!(
        ValidationError::NotInLoop { keyword: "continue", span }.to_string(),
        "'continue' not properly in loop"
    );
    assert_eq!(
        ValidationError::AssignedBeforeGlobal { name: "total".to_string(), span }.to_string(),
        "name 'total' is assigned to before global declaration"
    );
    assert_eq!(
        ValidationError::DuplicateArgument { name: "a".to_string(), span }.to_string(),
        "duplicate argument 'a' in function definition"
    );
}

#[test]
fn validation_error_diagnostic_marks_span() {
    let source = "x = 1\nbreak\n";
    let error = ValidationError::NotInLoop { keyword: "break", span: Span::new(6, 11) };
    let diagnostic = error.diagnostic(source);
    assert!(diagnostic.contains("line 2, column 1"), "{diagnostic}");
    assert!(diagnostic.contains("^^^^^"), "{diagnostic}");
}
