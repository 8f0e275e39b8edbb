// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only traversal.
//!
//! Override the `visit_*` methods of interest and call the matching
//! `walk_*_ref` function to continue into children.

use super::*;

/// A read-only syntax-tree visitor.
pub trait Visitor {
    fn visit_body(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt_ref(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr_ref(self, expr);
    }

    fn visit_params(&mut self, params: &[Param]) {
        for param in params {
            if let Some(annotation) = &param.annotation {
                self.visit_expr(annotation);
            }
            if let Some(default) = &param.default {
                self.visit_expr(default);
            }
        }
    }

    fn visit_generators(&mut self, generators: &[Comprehension]) {
        for generator in generators {
            self.visit_expr(&generator.iter);
            self.visit_expr(&generator.target);
            for cond in &generator.ifs {
                self.visit_expr(cond);
            }
        }
    }
}

/// Visit every child of `stmt`.
pub fn walk_stmt_ref<V: Visitor + ?Sized>(v: &mut V, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Expr(e) => v.visit_expr(e),
        StmtKind::Assign { targets, value } => {
            v.visit_expr(value);
            for target in targets {
                v.visit_expr(target);
            }
        }
        StmtKind::AugAssign { target, value, .. } => {
            v.visit_expr(value);
            v.visit_expr(target);
        }
        StmtKind::AnnAssign { target, annotation, value } => {
            if let Some(value) = value {
                v.visit_expr(value);
            }
            v.visit_expr(annotation);
            v.visit_expr(target);
        }
        StmtKind::If { test, body, orelse } | StmtKind::While { test, body, orelse } => {
            v.visit_expr(test);
            v.visit_body(body);
            v.visit_body(orelse);
        }
        StmtKind::For { target, iter, body, orelse } => {
            v.visit_expr(iter);
            v.visit_expr(target);
            v.visit_body(body);
            v.visit_body(orelse);
        }
        StmtKind::FunctionDef(def) => {
            v.visit_params(&def.params);
            if let Some(returns) = &def.returns {
                v.visit_expr(returns);
            }
            v.visit_body(&def.body);
        }
        StmtKind::Return(value) | StmtKind::Raise(value) => {
            if let Some(value) = value {
                v.visit_expr(value);
            }
        }
        StmtKind::Try(t) => {
            v.visit_body(&t.body);
            for handler in &t.handlers {
                if let Some(kind) = &handler.kind {
                    v.visit_expr(kind);
                }
                v.visit_body(&handler.body);
            }
            v.visit_body(&t.orelse);
            v.visit_body(&t.finalbody);
        }
        StmtKind::Assert { test, msg } => {
            v.visit_expr(test);
            if let Some(msg) = msg {
                v.visit_expr(msg);
            }
        }
        StmtKind::Break
        | StmtKind::Continue
        | StmtKind::Pass
        | StmtKind::Import(_)
        | StmtKind::Global(_) => {}
    }
}

/// Visit every child of `expr`.
pub fn walk_expr_ref<V: Visitor + ?Sized>(v: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Name(_) | ExprKind::Constant(_) => {}
        ExprKind::FString(parts) => {
            for part in parts {
                if let FStringPart::Field { value, .. } = part {
                    v.visit_expr(value);
                }
            }
        }
        ExprKind::List(items) | ExprKind::Tuple(items) | ExprKind::Set(items) => {
            for item in items {
                v.visit_expr(item);
            }
        }
        ExprKind::Dict(pairs) => {
            for (key, value) in pairs {
                v.visit_expr(key);
                v.visit_expr(value);
            }
        }
        ExprKind::ListComp { elt, generators }
        | ExprKind::SetComp { elt, generators }
        | ExprKind::GeneratorExp { elt, generators } => {
            v.visit_generators(generators);
            v.visit_expr(elt);
        }
        ExprKind::DictComp { key, value, generators } => {
            v.visit_generators(generators);
            v.visit_expr(key);
            v.visit_expr(value);
        }
        ExprKind::Attribute { value, .. } => v.visit_expr(value),
        ExprKind::Subscript { value, index } => {
            v.visit_expr(value);
            v.visit_expr(index);
        }
        ExprKind::Slice { lower, upper, step } => {
            for bound in [lower, upper, step].into_iter().flatten() {
                v.visit_expr(bound);
            }
        }
        ExprKind::Call { func, args, keywords } => {
            v.visit_expr(func);
            for arg in args {
                v.visit_expr(arg);
            }
            for keyword in keywords {
                v.visit_expr(&keyword.value);
            }
        }
        ExprKind::UnaryOp { operand, .. } => v.visit_expr(operand),
        ExprKind::BinOp { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        ExprKind::BoolOp { values, .. } => {
            for value in values {
                v.visit_expr(value);
            }
        }
        ExprKind::Compare { left, comparators, .. } => {
            v.visit_expr(left);
            for comparator in comparators {
                v.visit_expr(comparator);
            }
        }
        ExprKind::IfExp { test, body, orelse } => {
            v.visit_expr(test);
            v.visit_expr(body);
            v.visit_expr(orelse);
        }
        ExprKind::Lambda { params, body } => {
            v.visit_params(params);
            v.visit_expr(body);
        }
        ExprKind::Await(value) => v.visit_expr(value),
    }
}
