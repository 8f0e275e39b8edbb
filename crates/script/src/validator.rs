// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semantic validation for parsed modules.
//!
//! Catches the errors CPython reports at compile time rather than parse
//! time: misplaced `await`/`return`/`break`/`continue`, bad parameter lists
//! and late `global` declarations.

use std::collections::HashSet;

use super::ast::*;
pub use crate::validation::ValidationError;

#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Accept `await` outside any function, as an async REPL does.
    pub allow_top_level_await: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self { allow_top_level_await: true }
    }
}

pub fn validate(module: &Module) -> Result<(), Vec<ValidationError>> {
    validate_with_config(module, ValidatorConfig::default())
}

pub fn validate_with_config(
    module: &Module,
    config: ValidatorConfig,
) -> Result<(), Vec<ValidationError>> {
    Validator::new(config).validate(module)
}

/// Per-function state; the module level has no frame.
struct Frame {
    is_async: bool,
    loop_depth: usize,
    assigned: HashSet<String>,
}

struct Validator {
    config: ValidatorConfig,
    errors: Vec<ValidationError>,
    frames: Vec<Frame>,
    module_loop_depth: usize,
}

impl Validator {
    fn new(config: ValidatorConfig) -> Self {
        Self { config, errors: Vec::new(), frames: Vec::new(), module_loop_depth: 0 }
    }

    fn validate(mut self, module: &Module) -> Result<(), Vec<ValidationError>> {
        self.visit_body(&module.body);
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn report(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn loop_depth_mut(&mut self) -> &mut usize {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.loop_depth,
            None => &mut self.module_loop_depth,
        }
    }

    fn in_loop(&mut self, body: &[Stmt]) {
        *self.loop_depth_mut() += 1;
        self.visit_body(body);
        *self.loop_depth_mut() -= 1;
    }

    fn in_function(&mut self, is_async: bool, visit: impl FnOnce(&mut Self)) {
        self.frames.push(Frame { is_async, loop_depth: 0, assigned: HashSet::new() });
        visit(self);
        self.frames.pop();
    }

    fn record_assignment(&mut self, target: &Expr) {
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        match &target.kind {
            ExprKind::Name(name) => {
                frame.assigned.insert(name.clone());
            }
            ExprKind::Tuple(items) | ExprKind::List(items) => {
                for item in items {
                    self.record_assignment(item);
                }
            }
            _ => {}
        }
    }

    fn check_params(&mut self, params: &[Param], span: crate::Span) {
        let mut seen = HashSet::new();
        let mut saw_default = false;
        for param in params {
            if !seen.insert(param.name.as_str()) {
                self.report(ValidationError::DuplicateArgument { name: param.name.clone(), span });
            }
            if param.default.is_some() {
                saw_default = true;
            } else if saw_default {
                self.report(ValidationError::NonDefaultAfterDefault { span });
            }
        }
    }
}

impl Visitor for Validator {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::While { test, body, orelse } => {
                self.visit_expr(test);
                self.in_loop(body);
                self.visit_body(orelse);
            }
            StmtKind::For { target, iter, body, orelse } => {
                self.visit_expr(iter);
                self.visit_expr(target);
                self.record_assignment(target);
                self.in_loop(body);
                self.visit_body(orelse);
            }
            StmtKind::Break | StmtKind::Continue => {
                if *self.loop_depth_mut() == 0 {
                    let keyword = if matches!(stmt.kind, StmtKind::Break) { "break" } else { "continue" };
                    self.report(ValidationError::NotInLoop { keyword, span: stmt.span });
                }
            }
            StmtKind::Return(value) => {
                if self.frames.is_empty() {
                    self.report(ValidationError::ReturnOutsideFunction { span: stmt.span });
                }
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
            StmtKind::FunctionDef(def) => {
                self.check_params(&def.params, stmt.span);
                self.visit_params(&def.params);
                if let Some(returns) = &def.returns {
                    self.visit_expr(returns);
                }
                let name = Expr::new(ExprKind::Name(def.name.clone()), stmt.span);
                self.record_assignment(&name);
                self.in_function(def.is_async, |v| v.visit_body(&def.body));
            }
            StmtKind::Global(names) => {
                if let Some(frame) = self.frames.last() {
                    let late: Vec<String> =
                        names.iter().filter(|n| frame.assigned.contains(*n)).cloned().collect();
                    for name in late {
                        self.report(ValidationError::AssignedBeforeGlobal { name, span: stmt.span });
                    }
                }
            }
            StmtKind::Assign { targets, .. } => {
                walk_stmt_ref(self, stmt);
                for target in targets {
                    self.record_assignment(target);
                }
            }
            StmtKind::AugAssign { target, .. } | StmtKind::AnnAssign { target, .. } => {
                walk_stmt_ref(self, stmt);
                self.record_assignment(target);
            }
            _ => walk_stmt_ref(self, stmt),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Await(value) => {
                let allowed = match self.frames.last() {
                    Some(frame) => frame.is_async,
                    None => self.config.allow_top_level_await,
                };
                if !allowed {
                    self.report(ValidationError::AwaitOutsideAsync { span: expr.span });
                }
                self.visit_expr(value);
            }
            ExprKind::Lambda { params, body } => {
                self.check_params(params, expr.span);
                self.visit_params(params);
                self.in_function(false, |v| v.visit_expr(body));
            }
            _ => walk_expr_ref(self, expr),
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
