// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Owned tree rewriting.
//!
//! Implementors override the node methods they care about and call the
//! matching `walk_*` function to keep recursing into children.

use super::*;

/// A syntax-tree rewriter that consumes a tree and produces a new one.
pub trait Fold {
    fn fold_module(&mut self, module: Module) -> Module {
        Module { body: self.fold_body(module.body), span: module.span }
    }

    fn fold_body(&mut self, body: Vec<Stmt>) -> Vec<Stmt> {
        body.into_iter().map(|stmt| self.fold_stmt(stmt)).collect()
    }

    fn fold_stmt(&mut self, stmt: Stmt) -> Stmt {
        walk_stmt(self, stmt)
    }

    fn fold_expr(&mut self, expr: Expr) -> Expr {
        walk_expr(self, expr)
    }
}

fn fold_opt<F: Fold + ?Sized>(f: &mut F, expr: Option<Expr>) -> Option<Expr> {
    expr.map(|e| f.fold_expr(e))
}

fn fold_box<F: Fold + ?Sized>(f: &mut F, expr: Box<Expr>) -> Box<Expr> {
    Box::new(f.fold_expr(*expr))
}

fn fold_exprs<F: Fold + ?Sized>(f: &mut F, exprs: Vec<Expr>) -> Vec<Expr> {
    exprs.into_iter().map(|e| f.fold_expr(e)).collect()
}

fn fold_params<F: Fold + ?Sized>(f: &mut F, params: Vec<Param>) -> Vec<Param> {
    params
        .into_iter()
        .map(|p| Param {
            name: p.name,
            annotation: fold_opt(f, p.annotation),
            default: fold_opt(f, p.default),
        })
        .collect()
}

fn fold_generators<F: Fold + ?Sized>(f: &mut F, gens: Vec<Comprehension>) -> Vec<Comprehension> {
    gens.into_iter()
        .map(|g| Comprehension {
            target: f.fold_expr(g.target),
            iter: f.fold_expr(g.iter),
            ifs: fold_exprs(f, g.ifs),
        })
        .collect()
}

/// Rebuild `stmt` with every child statement and expression folded.
pub fn walk_stmt<F: Fold + ?Sized>(f: &mut F, stmt: Stmt) -> Stmt {
    let kind = match stmt.kind {
        StmtKind::Expr(e) => StmtKind::Expr(f.fold_expr(e)),
        StmtKind::Assign { targets, value } => {
            StmtKind::Assign { targets: fold_exprs(f, targets), value: f.fold_expr(value) }
        }
        StmtKind::AugAssign { target, op, value } => StmtKind::AugAssign {
            target: f.fold_expr(target),
            op,
            value: f.fold_expr(value),
        },
        StmtKind::AnnAssign { target, annotation, value } => StmtKind::AnnAssign {
            target: f.fold_expr(target),
            annotation: f.fold_expr(annotation),
            value: fold_opt(f, value),
        },
        StmtKind::If { test, body, orelse } => StmtKind::If {
            test: f.fold_expr(test),
            body: f.fold_body(body),
            orelse: f.fold_body(orelse),
        },
        StmtKind::While { test, body, orelse } => StmtKind::While {
            test: f.fold_expr(test),
            body: f.fold_body(body),
            orelse: f.fold_body(orelse),
        },
        StmtKind::For { target, iter, body, orelse } => StmtKind::For {
            target: f.fold_expr(target),
            iter: f.fold_expr(iter),
            body: f.fold_body(body),
            orelse: f.fold_body(orelse),
        },
        StmtKind::FunctionDef(def) => {
            let FunctionDef { name, params, body, returns, is_async } = *def;
            StmtKind::FunctionDef(Box::new(FunctionDef {
                name,
                params: fold_params(f, params),
                body: f.fold_body(body),
                returns: fold_opt(f, returns),
                is_async,
            }))
        }
        StmtKind::Return(value) => StmtKind::Return(fold_opt(f, value)),
        StmtKind::Raise(exc) => StmtKind::Raise(fold_opt(f, exc)),
        StmtKind::Try(t) => {
            let Try { body, handlers, orelse, finalbody } = *t;
            let handlers = handlers
                .into_iter()
                .map(|h| ExceptHandler {
                    kind: fold_opt(f, h.kind),
                    name: h.name,
                    body: f.fold_body(h.body),
                    span: h.span,
                })
                .collect();
            StmtKind::Try(Box::new(Try {
                body: f.fold_body(body),
                handlers,
                orelse: f.fold_body(orelse),
                finalbody: f.fold_body(finalbody),
            }))
        }
        StmtKind::Assert { test, msg } => {
            StmtKind::Assert { test: f.fold_expr(test), msg: fold_opt(f, msg) }
        }
        kind @ (StmtKind::Break
        | StmtKind::Continue
        | StmtKind::Pass
        | StmtKind::Import(_)
        | StmtKind::Global(_)) => kind,
    };
    Stmt { kind, span: stmt.span }
}

/// Rebuild `expr` with every child expression folded.
pub fn walk_expr<F: Fold + ?Sized>(f: &mut F, expr: Expr) -> Expr {
    let kind = match expr.kind {
        kind @ (ExprKind::Name(_) | ExprKind::Constant(_)) => kind,
        ExprKind::FString(parts) => ExprKind::FString(
            parts
                .into_iter()
                .map(|part| match part {
                    FStringPart::Field { value, conversion, format_spec } => FStringPart::Field {
                        value: fold_box(f, value),
                        conversion,
                        format_spec,
                    },
                    literal => literal,
                })
                .collect(),
        ),
        ExprKind::List(items) => ExprKind::List(fold_exprs(f, items)),
        ExprKind::Tuple(items) => ExprKind::Tuple(fold_exprs(f, items)),
        ExprKind::Set(items) => ExprKind::Set(fold_exprs(f, items)),
        ExprKind::Dict(pairs) => ExprKind::Dict(
            pairs.into_iter().map(|(k, v)| (f.fold_expr(k), f.fold_expr(v))).collect(),
        ),
        ExprKind::ListComp { elt, generators } => ExprKind::ListComp {
            elt: fold_box(f, elt),
            generators: fold_generators(f, generators),
        },
        ExprKind::SetComp { elt, generators } => ExprKind::SetComp {
            elt: fold_box(f, elt),
            generators: fold_generators(f, generators),
        },
        ExprKind::DictComp { key, value, generators } => ExprKind::DictComp {
            key: fold_box(f, key),
            value: fold_box(f, value),
            generators: fold_generators(f, generators),
        },
        ExprKind::GeneratorExp { elt, generators } => ExprKind::GeneratorExp {
            elt: fold_box(f, elt),
            generators: fold_generators(f, generators),
        },
        ExprKind::Attribute { value, attr } => {
            ExprKind::Attribute { value: fold_box(f, value), attr }
        }
        ExprKind::Subscript { value, index } => {
            ExprKind::Subscript { value: fold_box(f, value), index: fold_box(f, index) }
        }
        ExprKind::Slice { lower, upper, step } => ExprKind::Slice {
            lower: lower.map(|e| fold_box(f, e)),
            upper: upper.map(|e| fold_box(f, e)),
            step: step.map(|e| fold_box(f, e)),
        },
        ExprKind::Call { func, args, keywords } => ExprKind::Call {
            func: fold_box(f, func),
            args: fold_exprs(f, args),
            keywords: keywords
                .into_iter()
                .map(|k| KeywordArg { arg: k.arg, value: f.fold_expr(k.value) })
                .collect(),
        },
        ExprKind::UnaryOp { op, operand } => {
            ExprKind::UnaryOp { op, operand: fold_box(f, operand) }
        }
        ExprKind::BinOp { left, op, right } => {
            ExprKind::BinOp { left: fold_box(f, left), op, right: fold_box(f, right) }
        }
        ExprKind::BoolOp { op, values } => ExprKind::BoolOp { op, values: fold_exprs(f, values) },
        ExprKind::Compare { left, ops, comparators } => ExprKind::Compare {
            left: fold_box(f, left),
            ops,
            comparators: fold_exprs(f, comparators),
        },
        ExprKind::IfExp { test, body, orelse } => ExprKind::IfExp {
            test: fold_box(f, test),
            body: fold_box(f, body),
            orelse: fold_box(f, orelse),
        },
        ExprKind::Lambda { params, body } => {
            ExprKind::Lambda { params: fold_params(f, params), body: fold_box(f, body) }
        }
        ExprKind::Await(value) => ExprKind::Await(fold_box(f, value)),
    };
    Expr { kind, span: expr.span }
}
