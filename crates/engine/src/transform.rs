// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source Transformer: makes every `input()` call site a suspension point.

use algo_script::ast::{walk_expr, Expr, ExprKind, Fold};
use algo_script::ParseError;

/// Name of the coroutine the program body is nested in.
pub const ENTRY_POINT: &str = "__main__";

/// Wrap every bare `input(...)` call in `await`.
///
/// Attribute calls such as `obj.input()` are left alone, and calls that are
/// already awaited are not wrapped twice. Returns the regenerated source.
pub fn try_transform(source: &str) -> Result<String, ParseError> {
    let module = algo_script::parse(source)?;
    let module = InputAwaiter.fold_module(module);
    Ok(algo_script::unparse(&module))
}

/// Like [`try_transform`], but falls back to the original source when it
/// cannot be parsed. Never fails.
pub fn transform(source: &str) -> String {
    try_transform(source).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "source left untransformed");
        source.to_string()
    })
}

/// Nest `program` in `async def __main__():` and await it, so top-level
/// `await input()` runs inside a coroutine.
pub fn wrap_entry_point(program: &str) -> String {
    let mut wrapped = format!("async def {ENTRY_POINT}():\n");
    let mut empty = true;
    for line in program.lines() {
        if !line.trim().is_empty() {
            empty = false;
        }
        wrapped.push_str("    ");
        wrapped.push_str(line);
        wrapped.push('\n');
    }
    if empty {
        wrapped.push_str("    pass\n");
    }
    wrapped.push_str(&format!("await {ENTRY_POINT}()\n"));
    wrapped
}

struct InputAwaiter;

impl Fold for InputAwaiter {
    fn fold_expr(&mut self, expr: Expr) -> Expr {
        let Expr { kind, span } = expr;
        match kind {
            ExprKind::Await(inner) if is_input_call(&inner) => {
                Expr::new(ExprKind::Await(Box::new(walk_expr(self, *inner))), span)
            }
            kind => {
                let expr = walk_expr(self, Expr::new(kind, span));
                if is_input_call(&expr) {
                    Expr::new(ExprKind::Await(Box::new(expr)), span)
                } else {
                    expr
                }
            }
        }
    }
}

fn is_input_call(expr: &Expr) -> bool {
    matches!(&expr.kind, ExprKind::Call { func, .. } if func.as_name() == Some("input"))
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
