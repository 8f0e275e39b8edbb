// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::ast::*;
use crate::parser::Parser;
use crate::token::Span;

fn only_stmt(source: &str) -> StmtKind {
    let mut module = Parser::parse(source).unwrap();
    assert_eq!(module.body.len(), 1, "source: {source:?}");
    module.body.remove(0).kind
}

parse_tests! {
    empty_input: "" => statements: 0,
    blank_lines: "\n\n   \n" => statements: 0,
    comment_only: "# nothing here" => statements: 0,
    single_expression: "print('hi')" => statements: 1,
    two_lines: "a = 1\nb = 2" => statements: 2,
    semicolons: "a = 1; b = 2; c = 3" => statements: 3,
    trailing_semicolon: "a = 1;" => statements: 1,
    compound_counts_once: "if a:\n    b\n    c\nd" => statements: 2,
    bracket_continuation: "x = [\n    1,\n    2,\n]" => statements: 1,
    backslash_continuation: "x = 1 + \\\n    2" => statements: 1,
    crlf_lines: "a = 1\r\nb = 2\r\n" => statements: 2,
}

#[test]
fn chained_assignment() {
    let StmtKind::Assign { targets, value } = only_stmt("a = b = 1") else {
        panic!("expected assignment");
    };
    assert_eq!(targets.len(), 2);
    assert_eq!(value.kind, ExprKind::Constant(Constant::Int(1)));
}

#[test]
fn tuple_unpacking_target() {
    let StmtKind::Assign { targets, .. } = only_stmt("a, (b, c) = x") else {
        panic!("expected assignment");
    };
    let ExprKind::Tuple(items) = &targets[0].kind else {
        panic!("expected tuple target");
    };
    assert_eq!(items.len(), 2);
    assert!(matches!(items[1].kind, ExprKind::Tuple(_)));
}

#[test]
fn augmented_assignment() {
    let StmtKind::AugAssign { target, op, .. } = only_stmt("totals['a'] //= 2") else {
        panic!("expected augmented assignment");
    };
    assert_eq!(op, BinOp::FloorDiv);
    assert!(matches!(target.kind, ExprKind::Subscript { .. }));
}

#[test]
fn annotated_assignment() {
    let StmtKind::AnnAssign { target, annotation, value } = only_stmt("n: int = 3") else {
        panic!("expected annotated assignment");
    };
    assert_eq!(target.as_name(), Some("n"));
    assert_eq!(annotation.as_name(), Some("int"));
    assert!(value.is_some());
}

#[test]
fn elif_nests_in_orelse() {
    let StmtKind::If { orelse, .. } = only_stmt("if a:\n    x\nelif b:\n    y\nelse:\n    z") else {
        panic!("expected if");
    };
    let [Stmt { kind: StmtKind::If { orelse: inner, .. }, .. }] = orelse.as_slice() else {
        panic!("expected elif as nested if");
    };
    assert_eq!(inner.len(), 1);
}

#[test]
fn for_loop_with_else() {
    let StmtKind::For { target, body, orelse, .. } =
        only_stmt("for i, v in enumerate(xs):\n    pass\nelse:\n    done()")
    else {
        panic!("expected for");
    };
    assert!(matches!(target.kind, ExprKind::Tuple(_)));
    assert_eq!(body.len(), 1);
    assert_eq!(orelse.len(), 1);
}

#[test]
fn while_with_inline_body() {
    let StmtKind::While { body, .. } = only_stmt("while x: x -= 1; y()") else {
        panic!("expected while");
    };
    assert_eq!(body.len(), 2);
}

#[test]
fn function_definition() {
    let StmtKind::FunctionDef(def) = only_stmt("async def f(a, b: int = 2) -> str:\n    return a") else {
        panic!("expected def");
    };
    assert!(def.is_async);
    assert_eq!(def.name, "f");
    assert_eq!(def.params.len(), 2);
    assert!(def.params[0].default.is_none());
    assert!(def.params[1].annotation.is_some());
    assert!(def.params[1].default.is_some());
    assert!(def.returns.is_some());
}

#[test]
fn try_with_all_clauses() {
    let source = "try:\n    a()\nexcept ValueError as e:\n    b()\nexcept:\n    c()\nelse:\n    d()\nfinally:\n    e()";
    let StmtKind::Try(t) = only_stmt(source) else {
        panic!("expected try");
    };
    assert_eq!(t.handlers.len(), 2);
    assert_eq!(t.handlers[0].name.as_deref(), Some("e"));
    assert!(t.handlers[1].kind.is_none());
    assert_eq!(t.orelse.len(), 1);
    assert_eq!(t.finalbody.len(), 1);
}

#[test]
fn try_finally_only() {
    let StmtKind::Try(t) = only_stmt("try:\n    a()\nfinally:\n    b()") else {
        panic!("expected try");
    };
    assert!(t.handlers.is_empty());
    assert_eq!(t.finalbody.len(), 1);
}

#[test]
fn simple_keyword_statements() {
    assert_eq!(only_stmt("pass"), StmtKind::Pass);
    assert_eq!(only_stmt("raise"), StmtKind::Raise(None));
    assert_eq!(only_stmt("global a, b"), StmtKind::Global(vec!["a".into(), "b".into()]));
    assert_eq!(
        only_stmt("import os.path as p"),
        StmtKind::Import(vec![Alias { name: "os.path".into(), asname: Some("p".into()) }])
    );
    assert!(matches!(only_stmt("assert x, 'm'"), StmtKind::Assert { msg: Some(_), .. }));
}

#[test]
fn statement_spans_cover_the_line() {
    let module = Parser::parse("x = 1\nprint(x)").unwrap();
    assert_eq!(module.body[0].span, Span::new(0, 5));
    assert_eq!(module.body[1].span, Span::new(6, 14));
}
