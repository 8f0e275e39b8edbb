// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calling functions, host functions and coroutines.

use std::cell::Cell;
use std::sync::Arc;

use super::builtins;
use super::error::{ExcType, ExecError, Exception};
use super::methods;
use super::run::{Flow, LocalBoxFuture, Machine};
use super::scope::{new_frame, Frame, Scope};
use super::value::{Awaitable, Function, FunctionBody, HostCall, Pending, Value};

/// Keyword arguments as passed at a call site.
pub(crate) type Kwargs = Vec<(String, Value)>;

/// Decrements the call depth when a frame unwinds.
struct DepthGuard<'a>(&'a Cell<usize>);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

impl Machine {
    /// Call any callable value.
    pub(crate) fn call(
        &self,
        callee: Value,
        args: Vec<Value>,
        kwargs: Kwargs,
    ) -> LocalBoxFuture<'_, Result<Value, ExecError>> {
        Box::pin(async move {
            match callee {
                Value::Function(func) => {
                    let frame = bind_arguments(&func, args, kwargs)?;
                    if func.is_async {
                        return Ok(Value::Awaitable(Awaitable::new(
                            &func.name,
                            Pending::Call { func: func.clone(), frame },
                        )));
                    }
                    self.run_function(&func, frame).await
                }
                Value::Builtin(builtin) => builtins::call(self, builtin, args, kwargs).await,
                Value::BoundMethod(method) => {
                    methods::call(self, &method.receiver, &method.name, args, kwargs).await
                }
                Value::Host(host) => {
                    if let Some((name, _)) = kwargs.first() {
                        return Err(ExecError::type_error(format!(
                            "{}() got an unexpected keyword argument '{name}'",
                            host.name
                        )));
                    }
                    match &host.call {
                        HostCall::Sync(call) => call(args),
                        HostCall::Async(call) => Ok(Value::Awaitable(Awaitable::new(
                            &host.name,
                            Pending::Host { call: call.clone(), args },
                        ))),
                    }
                }
                Value::ExceptionType(kind) => {
                    if !kwargs.is_empty() {
                        return Err(ExecError::type_error(format!(
                            "{}() takes no keyword arguments",
                            kind.name()
                        )));
                    }
                    Ok(Value::Exception(Arc::new(Exception { kind, args })))
                }
                other => Err(ExecError::type_error(format!(
                    "'{}' object is not callable",
                    other.type_name()
                ))),
            }
        })
    }

    /// Run a bound function body to completion.
    async fn run_function(&self, func: &Function, frame: Frame) -> Result<Value, ExecError> {
        let depth = self.depth.get() + 1;
        if depth > self.recursion_limit {
            return Err(ExecError::new(ExcType::RecursionError, "maximum recursion depth exceeded"));
        }
        self.depth.set(depth);
        let _guard = DepthGuard(&self.depth);

        let scope = Scope::function(
            frame,
            func.closure.clone(),
            self.globals.clone(),
            func.global_names.clone(),
        );
        match &func.body {
            FunctionBody::Block(body) => match self.exec_block(body, &scope).await? {
                Flow::Return(value) => Ok(value),
                Flow::Normal | Flow::Break | Flow::Continue => Ok(Value::None),
            },
            FunctionBody::Lambda(expr) => self.eval(expr, &scope).await,
        }
    }

    /// `await value`
    pub(crate) async fn await_value(&self, value: Value) -> Result<Value, ExecError> {
        let Value::Awaitable(awaitable) = value else {
            return Err(ExecError::type_error(format!(
                "object {} can't be used in 'await' expression",
                value.type_name()
            )));
        };
        match awaitable.take() {
            None => Err(ExecError::new(
                ExcType::RuntimeError,
                "cannot reuse already awaited coroutine",
            )),
            Some(Pending::Host { call, args }) => {
                tracing::trace!(name = %awaitable.name, "awaiting host call");
                call(args).await
            }
            Some(Pending::Call { func, frame }) => self.run_function(&func, frame).await,
        }
    }
}

/// Bind call arguments to a fresh frame for `func`.
fn bind_arguments(func: &Function, args: Vec<Value>, kwargs: Kwargs) -> Result<Frame, ExecError> {
    let name = &func.name;
    let params = &func.params;
    if args.len() > params.len() {
        let takes = if params.iter().any(|(_, d)| d.is_some()) {
            let required = params.iter().filter(|(_, d)| d.is_none()).count();
            format!("from {required} to {}", params.len())
        } else {
            params.len().to_string()
        };
        let plural = if params.len() == 1 && takes == "1" { "" } else { "s" };
        let was = if args.len() == 1 { "was" } else { "were" };
        return Err(ExecError::type_error(format!(
            "{name}() takes {takes} positional argument{plural} but {} {was} given",
            args.len()
        )));
    }

    let mut slots: Vec<Option<Value>> = vec![None; params.len()];
    for (slot, arg) in slots.iter_mut().zip(args) {
        *slot = Some(arg);
    }
    for (key, value) in kwargs {
        let Some(i) = params.iter().position(|(p, _)| *p == key) else {
            return Err(ExecError::type_error(format!(
                "{name}() got an unexpected keyword argument '{key}'"
            )));
        };
        if slots[i].is_some() {
            return Err(ExecError::type_error(format!(
                "{name}() got multiple values for argument '{key}'"
            )));
        }
        slots[i] = Some(value);
    }

    let mut missing = Vec::new();
    let frame = new_frame();
    {
        let mut locals = frame.lock();
        for ((param, default), slot) in params.iter().zip(slots) {
            match slot.or_else(|| default.clone()) {
                Some(value) => {
                    locals.insert(param.clone(), value);
                }
                None => missing.push(format!("'{param}'")),
            }
        }
    }
    if !missing.is_empty() {
        let list = match missing.as_slice() {
            [only] => only.clone(),
            [init @ .., last] => format!("{} and {last}", init.join(", ")),
            [] => String::new(),
        };
        let plural = if missing.len() == 1 { "" } else { "s" };
        return Err(ExecError::type_error(format!(
            "{name}() missing {} required positional argument{plural}: {list}",
            missing.len()
        )));
    }
    Ok(frame)
}
