// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expression evaluation, assignment targets, item and attribute access.

use std::sync::Arc;

use super::error::{ExcType, ExecError, Exception};
use super::format::{format_value, repr, to_str};
use super::methods;
use super::ops;
use super::run::{LocalBoxFuture, Machine};
use super::scope::Scope;
use super::value::{BoundMethod, Dict, Function, FunctionBody, ModuleKind, Set, Stream, Value};
use crate::ast::{BoolOp, Comprehension, Constant, Expr, ExprKind, FStringPart};

/// Element producer of a comprehension.
enum Produce<'a> {
    Item(&'a Expr),
    Pair(&'a Expr, &'a Expr),
}

impl Machine {
    pub(crate) fn eval<'a>(
        &'a self,
        expr: &'a Expr,
        scope: &'a Scope,
    ) -> LocalBoxFuture<'a, Result<Value, ExecError>> {
        Box::pin(async move {
            match &expr.kind {
                ExprKind::Name(name) => scope.lookup(name),
                ExprKind::Constant(c) => Ok(constant(c)),
                ExprKind::FString(parts) => self.fstring(parts, scope).await,
                ExprKind::List(items) => Ok(Value::list(self.eval_all(items, scope).await?)),
                ExprKind::Tuple(items) => Ok(Value::tuple(self.eval_all(items, scope).await?)),
                ExprKind::Set(items) => {
                    Ok(Value::set(Set::from_values(self.eval_all(items, scope).await?)?))
                }
                ExprKind::Dict(pairs) => {
                    let mut dict = Dict::new();
                    for (key, value) in pairs {
                        let key = self.eval(key, scope).await?;
                        let value = self.eval(value, scope).await?;
                        dict.insert(key, value)?;
                    }
                    Ok(Value::dict(dict))
                }
                ExprKind::ListComp { elt, generators }
                | ExprKind::GeneratorExp { elt, generators } => {
                    let child = scope.child();
                    Ok(Value::list(self.comprehend(&Produce::Item(elt), generators, &child).await?))
                }
                ExprKind::SetComp { elt, generators } => {
                    let child = scope.child();
                    let items = self.comprehend(&Produce::Item(elt), generators, &child).await?;
                    Ok(Value::set(Set::from_values(items)?))
                }
                ExprKind::DictComp { key, value, generators } => {
                    let child = scope.child();
                    let pairs = self.comprehend(&Produce::Pair(key, value), generators, &child).await?;
                    let mut dict = Dict::new();
                    for pair in pairs {
                        if let Value::Tuple(kv) = pair {
                            dict.insert(kv[0].clone(), kv[1].clone())?;
                        }
                    }
                    Ok(Value::dict(dict))
                }
                ExprKind::Attribute { value, attr } => {
                    let object = self.eval(value, scope).await?;
                    get_attr(&object, attr)
                }
                ExprKind::Subscript { value, index } => {
                    let object = self.eval(value, scope).await?;
                    if let ExprKind::Slice { lower, upper, step } = &index.kind {
                        let lower = self.eval_opt(lower.as_deref(), scope).await?;
                        let upper = self.eval_opt(upper.as_deref(), scope).await?;
                        let step = self.eval_opt(step.as_deref(), scope).await?;
                        return get_slice(&object, &lower, &upper, &step);
                    }
                    let index = self.eval(index, scope).await?;
                    get_item(&object, &index)
                }
                ExprKind::Slice { .. } => Err(ExecError::type_error("slice outside of a subscript")),
                ExprKind::Call { func, args, keywords } => {
                    let callee = self.eval(func, scope).await?;
                    let args = self.eval_all(args, scope).await?;
                    let mut kwargs = Vec::with_capacity(keywords.len());
                    for keyword in keywords {
                        kwargs.push((keyword.arg.clone(), self.eval(&keyword.value, scope).await?));
                    }
                    self.call(callee, args, kwargs).await
                }
                ExprKind::UnaryOp { op, operand } => {
                    let operand = self.eval(operand, scope).await?;
                    ops::unary(*op, &operand)
                }
                ExprKind::BinOp { left, op, right } => {
                    let left = self.eval(left, scope).await?;
                    let right = self.eval(right, scope).await?;
                    ops::binary(*op, &left, &right)
                }
                ExprKind::BoolOp { op, values } => {
                    let mut result = Value::None;
                    for value in values {
                        result = self.eval(value, scope).await?;
                        let done = match op {
                            BoolOp::And => !result.is_truthy(),
                            BoolOp::Or => result.is_truthy(),
                        };
                        if done {
                            break;
                        }
                    }
                    Ok(result)
                }
                ExprKind::Compare { left, ops: cmp_ops, comparators } => {
                    let mut left = self.eval(left, scope).await?;
                    for (op, right) in cmp_ops.iter().zip(comparators) {
                        let right = self.eval(right, scope).await?;
                        if !ops::compare(*op, &left, &right)? {
                            return Ok(Value::Bool(false));
                        }
                        left = right;
                    }
                    Ok(Value::Bool(true))
                }
                ExprKind::IfExp { test, body, orelse } => {
                    if self.eval(test, scope).await?.is_truthy() {
                        self.eval(body, scope).await
                    } else {
                        self.eval(orelse, scope).await
                    }
                }
                ExprKind::Lambda { params, body } => {
                    let mut bound = Vec::with_capacity(params.len());
                    for param in params {
                        let default = self.eval_opt(param.default.as_ref(), scope).await?;
                        bound.push((param.name.clone(), param.default.as_ref().map(|_| default)));
                    }
                    Ok(Value::Function(Arc::new(Function {
                        name: "<lambda>".to_string(),
                        params: bound,
                        body: FunctionBody::Lambda(Arc::new((**body).clone())),
                        is_async: false,
                        closure: scope.closure(),
                        global_names: Arc::default(),
                    })))
                }
                ExprKind::Await(operand) => {
                    let awaitable = self.eval(operand, scope).await?;
                    self.await_value(awaitable).await
                }
            }
        })
    }

    async fn eval_all(&self, exprs: &[Expr], scope: &Scope) -> Result<Vec<Value>, ExecError> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs {
            values.push(self.eval(expr, scope).await?);
        }
        Ok(values)
    }

    /// Evaluate an optional expression; absent means `None`.
    async fn eval_opt(&self, expr: Option<&Expr>, scope: &Scope) -> Result<Value, ExecError> {
        match expr {
            Some(expr) => self.eval(expr, scope).await,
            None => Ok(Value::None),
        }
    }

    async fn fstring(&self, parts: &[FStringPart], scope: &Scope) -> Result<Value, ExecError> {
        let mut out = String::new();
        for part in parts {
            match part {
                FStringPart::Literal(text) => out.push_str(text),
                FStringPart::Field { value, conversion, format_spec } => {
                    let value = self.eval(value, scope).await?;
                    let value = match conversion {
                        Some('r' | 'a') => Value::str(repr(&value)),
                        Some(_) => Value::str(to_str(&value)),
                        None => value,
                    };
                    out.push_str(&format_value(&value, format_spec.as_deref().unwrap_or(""))?);
                }
            }
        }
        Ok(Value::str(out))
    }

    fn comprehend<'a>(
        &'a self,
        produce: &'a Produce<'a>,
        generators: &'a [Comprehension],
        scope: &'a Scope,
    ) -> LocalBoxFuture<'a, Result<Vec<Value>, ExecError>> {
        Box::pin(async move {
            let Some((first, rest)) = generators.split_first() else {
                let item = match produce {
                    Produce::Item(elt) => self.eval(elt, scope).await?,
                    Produce::Pair(key, value) => {
                        let key = self.eval(key, scope).await?;
                        Value::tuple(vec![key, self.eval(value, scope).await?])
                    }
                };
                return Ok(vec![item]);
            };
            let iterable = self.eval(&first.iter, scope).await?;
            let mut out = Vec::new();
            'items: for item in iterate(&iterable)? {
                self.tick().await;
                self.assign(&first.target, item, scope).await?;
                for cond in &first.ifs {
                    if !self.eval(cond, scope).await?.is_truthy() {
                        continue 'items;
                    }
                }
                out.extend(self.comprehend(produce, rest, scope).await?);
            }
            Ok(out)
        })
    }

    /// Bind `value` to an assignment target.
    pub(crate) fn assign<'a>(
        &'a self,
        target: &'a Expr,
        value: Value,
        scope: &'a Scope,
    ) -> LocalBoxFuture<'a, Result<(), ExecError>> {
        Box::pin(async move {
            match &target.kind {
                ExprKind::Name(name) => {
                    scope.assign(name, value);
                    Ok(())
                }
                ExprKind::Tuple(targets) | ExprKind::List(targets) => {
                    let items: Vec<Value> = iterate(&value)?.collect();
                    if items.len() > targets.len() {
                        return Err(ExecError::value_error(format!(
                            "too many values to unpack (expected {})",
                            targets.len()
                        )));
                    }
                    if items.len() < targets.len() {
                        return Err(ExecError::value_error(format!(
                            "not enough values to unpack (expected {}, got {})",
                            targets.len(),
                            items.len()
                        )));
                    }
                    for (target, item) in targets.iter().zip(items) {
                        self.assign(target, item, scope).await?;
                    }
                    Ok(())
                }
                ExprKind::Subscript { value: object, index } => {
                    let object = self.eval(object, scope).await?;
                    if let ExprKind::Slice { lower, upper, step } = &index.kind {
                        let lower = self.eval_opt(lower.as_deref(), scope).await?;
                        let upper = self.eval_opt(upper.as_deref(), scope).await?;
                        let step = self.eval_opt(step.as_deref(), scope).await?;
                        return set_slice(&object, &lower, &upper, &step, &value);
                    }
                    let index = self.eval(index, scope).await?;
                    set_item(&object, index, value)
                }
                ExprKind::Attribute { value: object, attr } => {
                    let object = self.eval(object, scope).await?;
                    Err(ExecError::new(
                        ExcType::AttributeError,
                        format!("'{}' object attribute '{attr}' is read-only", object.type_name()),
                    ))
                }
                _ => Err(ExecError::type_error("cannot assign to expression")),
            }
        })
    }
}

fn constant(c: &Constant) -> Value {
    match c {
        Constant::None => Value::None,
        Constant::Bool(b) => Value::Bool(*b),
        Constant::Int(n) => Value::Int(*n),
        Constant::Float(f) => Value::Float(*f),
        Constant::Str(s) => Value::str(s.as_str()),
    }
}

// ── Iteration ───────────────────────────────────────────────────────────

/// Iterator over the items of an iterable value. Containers are
/// snapshotted; ranges are produced lazily.
pub(crate) enum ValueIter {
    Items(std::vec::IntoIter<Value>),
    Range { next: i64, stop: i64, step: i64 },
}

impl Iterator for ValueIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            ValueIter::Items(items) => items.next(),
            ValueIter::Range { next, stop, step } => {
                let more = if *step > 0 { *next < *stop } else { *next > *stop };
                if !more {
                    return None;
                }
                let current = *next;
                *next = next.saturating_add(*step);
                if *next == current {
                    *next = *stop;
                }
                Some(Value::Int(current))
            }
        }
    }
}

pub(crate) fn iterate(value: &Value) -> Result<ValueIter, ExecError> {
    let items = match value {
        Value::List(items) => items.lock().clone(),
        Value::Tuple(items) => items.to_vec(),
        Value::Str(s) => s.chars().map(|c| Value::str(c.to_string())).collect(),
        Value::Dict(d) => d.lock().keys(),
        Value::Set(s) => s.lock().values(),
        Value::Range(r) => return Ok(ValueIter::Range { next: r.start, stop: r.stop, step: r.step }),
        other => {
            return Err(ExecError::type_error(format!(
                "'{}' object is not iterable",
                other.type_name()
            )))
        }
    };
    Ok(ValueIter::Items(items.into_iter()))
}

// ── Items ───────────────────────────────────────────────────────────────

/// Resolve a possibly negative index against `len`.
fn normalize_index(index: &Value, len: usize, what: &str) -> Result<Option<usize>, ExecError> {
    let Some(i) = index.as_int() else {
        return Err(ExecError::type_error(format!(
            "{what} indices must be integers or slices, not {}",
            index.type_name()
        )));
    };
    let len = len as i64;
    let i = if i < 0 { i + len } else { i };
    Ok((0..len).contains(&i).then_some(i as usize))
}

fn index_error(what: &str) -> ExecError {
    ExecError::new(ExcType::IndexError, format!("{what} index out of range"))
}

pub(crate) fn get_item(object: &Value, index: &Value) -> Result<Value, ExecError> {
    match object {
        Value::List(items) => {
            let items = items.lock();
            let i = normalize_index(index, items.len(), "list")?.ok_or_else(|| index_error("list"))?;
            Ok(items[i].clone())
        }
        Value::Tuple(items) => {
            let i = normalize_index(index, items.len(), "tuple")?.ok_or_else(|| index_error("tuple"))?;
            Ok(items[i].clone())
        }
        Value::Str(s) => {
            let count = s.chars().count();
            let i = normalize_index(index, count, "string")?.ok_or_else(|| index_error("string"))?;
            Ok(s.chars().nth(i).map(|c| Value::str(c.to_string())).unwrap_or(Value::None))
        }
        Value::Range(r) => {
            let i = normalize_index(index, r.len(), "range")?
                .ok_or_else(|| ExecError::new(ExcType::IndexError, "range object index out of range"))?;
            Ok(r.get(i).map(Value::Int).unwrap_or(Value::None))
        }
        Value::Dict(d) => {
            let found = d.lock().get(index)?;
            found.ok_or_else(|| key_error(index))
        }
        other => Err(ExecError::type_error(format!(
            "'{}' object is not subscriptable",
            other.type_name()
        ))),
    }
}

pub(crate) fn set_item(object: &Value, index: Value, value: Value) -> Result<(), ExecError> {
    match object {
        Value::List(items) => {
            let mut items = items.lock();
            let i = normalize_index(&index, items.len(), "list")?
                .ok_or_else(|| ExecError::new(ExcType::IndexError, "list assignment index out of range"))?;
            items[i] = value;
            Ok(())
        }
        Value::Dict(d) => d.lock().insert(index, value),
        other => Err(ExecError::type_error(format!(
            "'{}' object does not support item assignment",
            other.type_name()
        ))),
    }
}

/// Indices selected by `[lower:upper:step]` on a sequence of `len` items.
pub(crate) fn slice_indices(
    len: usize,
    lower: &Value,
    upper: &Value,
    step: &Value,
) -> Result<Vec<usize>, ExecError> {
    let bound = |v: &Value| -> Result<Option<i64>, ExecError> {
        match v {
            Value::None => Ok(None),
            other => other.as_int().map(Some).ok_or_else(|| {
                ExecError::type_error(
                    "slice indices must be integers or None or have an __index__ method",
                )
            }),
        }
    };
    let step = bound(step)?.unwrap_or(1);
    if step == 0 {
        return Err(ExecError::value_error("slice step cannot be zero"));
    }
    let len = len as i64;
    let clamp = |v: i64, low: i64, high: i64| {
        let v = if v < 0 { v + len } else { v };
        v.clamp(low, high)
    };
    let mut out = Vec::new();
    if step > 0 {
        let start = bound(lower)?.map_or(0, |v| clamp(v, 0, len));
        let stop = bound(upper)?.map_or(len, |v| clamp(v, 0, len));
        let mut i = start;
        while i < stop {
            out.push(i as usize);
            i += step;
        }
    } else {
        let start = bound(lower)?.map_or(len - 1, |v| clamp(v, -1, len - 1));
        let stop = bound(upper)?.map_or(-1, |v| clamp(v, -1, len - 1));
        let mut i = start;
        while i > stop {
            out.push(i as usize);
            i += step;
        }
    }
    Ok(out)
}

fn get_slice(object: &Value, lower: &Value, upper: &Value, step: &Value) -> Result<Value, ExecError> {
    match object {
        Value::List(items) => {
            let items = items.lock().clone();
            let picked = slice_indices(items.len(), lower, upper, step)?;
            Ok(Value::list(picked.into_iter().map(|i| items[i].clone()).collect()))
        }
        Value::Tuple(items) => {
            let picked = slice_indices(items.len(), lower, upper, step)?;
            Ok(Value::tuple(picked.into_iter().map(|i| items[i].clone()).collect()))
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let picked = slice_indices(chars.len(), lower, upper, step)?;
            Ok(Value::str(picked.into_iter().map(|i| chars[i]).collect::<String>()))
        }
        Value::Range(r) => {
            let picked = slice_indices(r.len(), lower, upper, step)?;
            Ok(Value::list(picked.into_iter().filter_map(|i| r.get(i)).map(Value::Int).collect()))
        }
        other => Err(ExecError::type_error(format!(
            "'{}' object is not subscriptable",
            other.type_name()
        ))),
    }
}

fn set_slice(
    object: &Value,
    lower: &Value,
    upper: &Value,
    step: &Value,
    value: &Value,
) -> Result<(), ExecError> {
    let Value::List(items) = object else {
        return Err(ExecError::type_error(format!(
            "'{}' object does not support item assignment",
            object.type_name()
        )));
    };
    let replacement: Vec<Value> = iterate(value)?.collect();
    let mut items = items.lock();
    let picked = slice_indices(items.len(), lower, upper, step)?;
    if !matches!(step, Value::None) && step.as_int() != Some(1) {
        if picked.len() != replacement.len() {
            return Err(ExecError::value_error(format!(
                "attempt to assign sequence of size {} to extended slice of size {}",
                replacement.len(),
                picked.len()
            )));
        }
        for (i, item) in picked.into_iter().zip(replacement) {
            items[i] = item;
        }
        return Ok(());
    }
    let start = match picked.first() {
        Some(&first) => first,
        None => {
            let len = items.len() as i64;
            match lower.as_int() {
                Some(v) if v < 0 => (v + len).max(0) as usize,
                Some(v) => (v as usize).min(items.len()),
                None => 0,
            }
        }
    };
    let end = start + picked.len();
    items.splice(start..end, replacement);
    Ok(())
}

// ── Attributes ──────────────────────────────────────────────────────────

pub(crate) fn get_attr(object: &Value, attr: &str) -> Result<Value, ExecError> {
    let bound = || {
        Value::BoundMethod(Arc::new(BoundMethod { receiver: object.clone(), name: attr.to_string() }))
    };
    match object {
        Value::Module(ModuleKind::Sys) => match attr {
            "stdout" => Ok(Value::Stream(Stream::Stdout)),
            "stderr" => Ok(Value::Stream(Stream::Stderr)),
            "argv" => Ok(Value::list(vec![Value::str("")])),
            "maxsize" => Ok(Value::Int(i64::MAX)),
            "version" => Ok(Value::str(concat!("3.11 (algo-script ", env!("CARGO_PKG_VERSION"), ")"))),
            _ => Err(no_module_attr("sys", attr)),
        },
        Value::Module(ModuleKind::Math) => match attr {
            "pi" => Ok(Value::Float(std::f64::consts::PI)),
            "e" => Ok(Value::Float(std::f64::consts::E)),
            "tau" => Ok(Value::Float(std::f64::consts::TAU)),
            "inf" => Ok(Value::Float(f64::INFINITY)),
            "nan" => Ok(Value::Float(f64::NAN)),
            name if methods::MATH_FUNCTIONS.contains(&name) => Ok(bound()),
            _ => Err(no_module_attr("math", attr)),
        },
        Value::Exception(exc) if attr == "args" => Ok(Value::tuple(exc.args.clone())),
        Value::Function(f) if attr == "__name__" => Ok(Value::str(f.name())),
        Value::ExceptionType(t) if attr == "__name__" => Ok(Value::str(t.name())),
        Value::Builtin(b) if attr == "__name__" => Ok(Value::str(b.name())),
        _ if methods::has_method(object, attr) => Ok(bound()),
        other => Err(ExecError::new(
            ExcType::AttributeError,
            format!("'{}' object has no attribute '{attr}'", other.type_name()),
        )),
    }
}

fn no_module_attr(module: &str, attr: &str) -> ExecError {
    ExecError::new(ExcType::AttributeError, format!("module '{module}' has no attribute '{attr}'"))
}

/// `KeyError(key)` for dict-like lookups.
pub(crate) fn key_error(key: &Value) -> ExecError {
    ExecError::Exception(Arc::new(Exception { kind: ExcType::KeyError, args: vec![key.clone()] }))
}
