// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::parser::Parser;
use crate::token::AugOp;

fn name(id: &str) -> Expr {
    Expr::new(ExprKind::Name(id.to_string()), Span::new(0, id.len()))
}

#[test]
fn as_name_only_matches_bare_names() {
    assert_eq!(name("x").as_name(), Some("x"));
    let call = Expr::new(
        ExprKind::Call { func: Box::new(name("f")), args: vec![], keywords: vec![] },
        Span::new(0, 3),
    );
    assert_eq!(call.as_name(), None);
}

#[yare::parameterized(
    add = { AugOp::Add, BinOp::Add, "+" },
    floor_div = { AugOp::FloorDiv, BinOp::FloorDiv, "//" },
    pow = { AugOp::Pow, BinOp::Pow, "**" },
)]
fn aug_op_maps_to_bin_op(aug: AugOp, bin: BinOp, symbol: &str) {
    assert_eq!(BinOp::from(aug), bin);
    assert_eq!(bin.symbol(), symbol);
}

#[test]
fn compare_symbols() {
    assert_eq!(CmpOp::NotIn.symbol(), "not in");
    assert_eq!(CmpOp::IsNot.symbol(), "is not");
    assert_eq!(CmpOp::LtE.symbol(), "<=");
}

// ---------------------------------------------------------------------------
// Visitor / Fold
// ---------------------------------------------------------------------------

/// Collects every name read or written.
#[derive(Default)]
struct Names(Vec<String>);

impl Visitor for Names {
    fn visit_expr(&mut self, expr: &Expr) {
        if let ExprKind::Name(id) = &expr.kind {
            self.0.push(id.clone());
        }
        walk_expr_ref(self, expr);
    }
}

#[test]
fn visitor_reaches_nested_expressions() {
    let module =
        Parser::parse("def f(a=b):\n    return [c for d in e if g]\nx = {h: i}[j]").unwrap();
    let mut names = Names::default();
    names.visit_body(&module.body);
    for expected in ["b", "c", "d", "e", "g", "x", "h", "i", "j"] {
        assert!(names.0.iter().any(|n| n == expected), "missing {expected} in {:?}", names.0);
    }
}

/// Renames every `old` to `new`.
struct Rename {
    old: &'static str,
    new: &'static str,
}

impl Fold for Rename {
    fn fold_expr(&mut self, expr: Expr) -> Expr {
        if expr.as_name() == Some(self.old) {
            return Expr::new(ExprKind::Name(self.new.to_string()), expr.span);
        }
        walk_expr(self, expr)
    }
}

#[test]
fn fold_rewrites_inside_statements() {
    let module = Parser::parse("if a:\n    print(a + 1)\nelse:\n    a = 2").unwrap();
    let folded = Rename { old: "a", new: "z" }.fold_module(module);
    assert_eq!(crate::unparse(&folded), "if z:\n    print(z + 1)\nelse:\n    z = 2");
}

#[test]
fn fold_preserves_spans() {
    let module = Parser::parse("x = y").unwrap();
    let before: Vec<Span> = module.body.iter().map(|s| s.span).collect();
    let folded = Rename { old: "y", new: "w" }.fold_module(module);
    let after: Vec<Span> = folded.body.iter().map(|s| s.span).collect();
    assert_eq!(before, after);
}
