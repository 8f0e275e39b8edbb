// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Statement execution.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::error::{ExcType, ExecError, Exception};
use super::scope::{Frame, Scope};
use super::value::{Function, FunctionBody, ModuleKind, Value};
use crate::ast::{walk_stmt_ref, BinOp, Expr, ExprKind, FunctionDef, Stmt, StmtKind, Try, Visitor};

/// Boxed future for the recursive parts of the tree walker.
pub(crate) type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Loop iterations between cooperative yields to the runtime.
const YIELD_INTERVAL: u64 = 1024;

/// How a block finished.
pub(crate) enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// Per-run execution state.
pub(crate) struct Machine {
    pub(crate) globals: Frame,
    pub(crate) depth: Cell<usize>,
    pub(crate) recursion_limit: usize,
    /// Exceptions being handled, innermost last; used by bare `raise`.
    handling: RefCell<Vec<Arc<Exception>>>,
    ticks: Cell<u64>,
}

impl Machine {
    pub(crate) fn new(globals: Frame, recursion_limit: usize) -> Self {
        Self {
            globals,
            depth: Cell::new(0),
            recursion_limit,
            handling: RefCell::new(Vec::new()),
            ticks: Cell::new(0),
        }
    }

    /// Count a loop iteration, yielding to the runtime now and then so a
    /// busy script does not starve other tasks.
    pub(crate) async fn tick(&self) {
        let ticks = self.ticks.get().wrapping_add(1);
        self.ticks.set(ticks);
        if ticks % YIELD_INTERVAL == 0 {
            tokio::task::yield_now().await;
        }
    }

    pub(crate) fn exec_block<'a>(
        &'a self,
        body: &'a [Stmt],
        scope: &'a Scope,
    ) -> LocalBoxFuture<'a, Result<Flow, ExecError>> {
        Box::pin(async move {
            for stmt in body {
                match self.exec_stmt(stmt, scope).await? {
                    Flow::Normal => {}
                    flow => return Ok(flow),
                }
            }
            Ok(Flow::Normal)
        })
    }

    async fn exec_stmt(&self, stmt: &Stmt, scope: &Scope) -> Result<Flow, ExecError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.eval(expr, scope).await?;
            }
            StmtKind::Assign { targets, value } => {
                let value = self.eval(value, scope).await?;
                for target in targets {
                    self.assign(target, value.clone(), scope).await?;
                }
            }
            StmtKind::AugAssign { target, op, value } => {
                self.aug_assign(target, *op, value, scope).await?;
            }
            StmtKind::AnnAssign { target, value, .. } => {
                if let Some(value) = value {
                    let value = self.eval(value, scope).await?;
                    self.assign(target, value, scope).await?;
                }
            }
            StmtKind::If { test, body, orelse } => {
                let branch = if self.eval(test, scope).await?.is_truthy() { body } else { orelse };
                return self.exec_block(branch, scope).await;
            }
            StmtKind::While { test, body, orelse } => {
                while self.eval(test, scope).await?.is_truthy() {
                    self.tick().await;
                    match self.exec_block(body, scope).await? {
                        Flow::Break => return Ok(Flow::Normal),
                        Flow::Normal | Flow::Continue => {}
                        ret @ Flow::Return(_) => return Ok(ret),
                    }
                }
                return self.exec_block(orelse, scope).await;
            }
            StmtKind::For { target, iter, body, orelse } => {
                let iterable = self.eval(iter, scope).await?;
                for item in super::eval::iterate(&iterable)? {
                    self.tick().await;
                    self.assign(target, item, scope).await?;
                    match self.exec_block(body, scope).await? {
                        Flow::Break => return Ok(Flow::Normal),
                        Flow::Normal | Flow::Continue => {}
                        ret @ Flow::Return(_) => return Ok(ret),
                    }
                }
                return self.exec_block(orelse, scope).await;
            }
            StmtKind::Break => return Ok(Flow::Break),
            StmtKind::Continue => return Ok(Flow::Continue),
            StmtKind::Pass | StmtKind::Global(_) => {}
            StmtKind::FunctionDef(def) => {
                let func = self.define(def, scope).await?;
                scope.assign(&def.name, func);
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(expr, scope).await?,
                    None => Value::None,
                };
                return Ok(Flow::Return(value));
            }
            StmtKind::Raise(exc) => return Err(self.raise(exc.as_ref(), scope).await),
            StmtKind::Try(t) => return self.exec_try(t, scope).await,
            StmtKind::Assert { test, msg } => {
                if !self.eval(test, scope).await?.is_truthy() {
                    let args = match msg {
                        Some(msg) => vec![self.eval(msg, scope).await?],
                        None => Vec::new(),
                    };
                    return Err(ExecError::Exception(Arc::new(Exception {
                        kind: ExcType::AssertionError,
                        args,
                    })));
                }
            }
            StmtKind::Import(aliases) => {
                for alias in aliases {
                    let module = ModuleKind::from_name(&alias.name).ok_or_else(|| {
                        ExecError::new(
                            ExcType::ModuleNotFoundError,
                            format!("No module named '{}'", alias.name),
                        )
                    })?;
                    let name = alias.asname.as_deref().unwrap_or(&alias.name);
                    scope.assign(name, Value::Module(module));
                }
            }
        }
        Ok(Flow::Normal)
    }

    /// Build the function object for a `def`; defaults are evaluated now.
    async fn define(&self, def: &FunctionDef, scope: &Scope) -> Result<Value, ExecError> {
        let mut params = Vec::with_capacity(def.params.len());
        for param in &def.params {
            let default = match &param.default {
                Some(expr) => Some(self.eval(expr, scope).await?),
                None => None,
            };
            params.push((param.name.clone(), default));
        }
        let mut globals = GlobalNames::default();
        globals.visit_body(&def.body);
        Ok(Value::Function(Arc::new(Function {
            name: def.name.clone(),
            params,
            body: FunctionBody::Block(Arc::new(def.body.clone())),
            is_async: def.is_async,
            closure: scope.closure(),
            global_names: Arc::new(globals.0),
        })))
    }

    async fn aug_assign(
        &self,
        target: &Expr,
        op: BinOp,
        value: &Expr,
        scope: &Scope,
    ) -> Result<(), ExecError> {
        match &target.kind {
            ExprKind::Name(name) => {
                let current = scope.lookup(name)?;
                let rhs = self.eval(value, scope).await?;
                let result = self.inplace(op, current, &rhs)?;
                scope.assign(name, result);
            }
            ExprKind::Subscript { value: object, index } => {
                let object = self.eval(object, scope).await?;
                let index = self.eval(index, scope).await?;
                let current = super::eval::get_item(&object, &index)?;
                let rhs = self.eval(value, scope).await?;
                let result = self.inplace(op, current, &rhs)?;
                super::eval::set_item(&object, index, result)?;
            }
            _ => {
                let object = self.eval(target, scope).await?;
                return Err(ExecError::new(
                    ExcType::AttributeError,
                    format!("'{}' object attribute is read-only", object.type_name()),
                ));
            }
        }
        Ok(())
    }

    /// `+=` on a list extends it in place; everything else rebinds.
    fn inplace(&self, op: BinOp, current: Value, rhs: &Value) -> Result<Value, ExecError> {
        if let (BinOp::Add, Value::List(items)) = (op, &current) {
            let extra: Vec<Value> = super::eval::iterate(rhs)?.collect();
            items.lock().extend(extra);
            return Ok(current);
        }
        super::ops::binary(op, &current, rhs)
    }

    async fn raise(&self, exc: Option<&Expr>, scope: &Scope) -> ExecError {
        let Some(expr) = exc else {
            return match self.handling.borrow().last() {
                Some(active) => ExecError::Exception(active.clone()),
                None => ExecError::new(ExcType::RuntimeError, "No active exception to reraise"),
            };
        };
        match self.eval(expr, scope).await {
            Ok(Value::Exception(exc)) => ExecError::Exception(exc),
            Ok(Value::ExceptionType(kind)) => {
                ExecError::Exception(Arc::new(Exception { kind, args: Vec::new() }))
            }
            Ok(_) => ExecError::type_error("exceptions must derive from BaseException"),
            Err(err) => err,
        }
    }

    async fn exec_try(&self, t: &Try, scope: &Scope) -> Result<Flow, ExecError> {
        let result = match self.exec_block(&t.body, scope).await {
            Ok(Flow::Normal) => self.exec_block(&t.orelse, scope).await,
            Ok(flow) => Ok(flow),
            Err(ExecError::Exception(exc)) => self.handle(t, exc, scope).await,
            Err(err) => Err(err),
        };
        if t.finalbody.is_empty() {
            return result;
        }
        match self.exec_block(&t.finalbody, scope).await? {
            Flow::Normal => result,
            flow => Ok(flow),
        }
    }

    /// Run the first matching `except` clause, or re-raise.
    async fn handle(
        &self,
        t: &Try,
        exc: Arc<Exception>,
        scope: &Scope,
    ) -> Result<Flow, ExecError> {
        for handler in &t.handlers {
            if let Some(kind) = &handler.kind {
                let filter = self.eval(kind, scope).await?;
                if !matches_exception(&filter, exc.kind)? {
                    continue;
                }
            }
            if let Some(name) = &handler.name {
                scope.assign(name, Value::Exception(exc.clone()));
            }
            self.handling.borrow_mut().push(exc.clone());
            let result = self.exec_block(&handler.body, scope).await;
            self.handling.borrow_mut().pop();
            if let Some(name) = &handler.name {
                scope.unbind(name);
            }
            return result;
        }
        Err(ExecError::Exception(exc))
    }
}

/// Does an `except` filter (a class or a tuple of classes) match `kind`?
fn matches_exception(filter: &Value, kind: ExcType) -> Result<bool, ExecError> {
    match filter {
        Value::ExceptionType(t) => Ok(kind.is_subclass_of(*t)),
        Value::Tuple(items) => {
            for item in items.iter() {
                if matches_exception(item, kind)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        _ => Err(ExecError::type_error(
            "catching classes that do not inherit from BaseException is not allowed",
        )),
    }
}

/// Names declared `global` directly in a function body.
#[derive(Default)]
struct GlobalNames(HashSet<String>);

impl Visitor for GlobalNames {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Global(names) => self.0.extend(names.iter().cloned()),
            StmtKind::FunctionDef(_) => {}
            _ => walk_stmt_ref(self, stmt),
        }
    }

    fn visit_expr(&mut self, _expr: &Expr) {}
}
