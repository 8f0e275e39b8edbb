// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime values.
//!
//! Containers are shared (`Arc<Mutex<_>>`) to give Python reference
//! semantics. Locks are never held across an `.await` or while calling
//! back into the interpreter.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use super::builtins::Builtin;
use super::error::{ExcType, ExecError, Exception};
use super::format;
use super::scope::Frame;
use crate::ast::{Expr, Stmt};

/// Result of calling into host code.
pub type HostResult = Result<Value, ExecError>;

/// Future returned by an asynchronous host function.
pub type HostFuture = Pin<Box<dyn Future<Output = HostResult> + Send>>;

type SyncCall = Arc<dyn Fn(Vec<Value>) -> HostResult + Send + Sync>;
type AsyncCall = Arc<dyn Fn(Vec<Value>) -> HostFuture + Send + Sync>;

#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Arc<Mutex<Vec<Value>>>),
    Tuple(Arc<[Value]>),
    Dict(Arc<Mutex<Dict>>),
    Set(Arc<Mutex<Set>>),
    Range(Range),
    Function(Arc<Function>),
    Builtin(Builtin),
    BoundMethod(Arc<BoundMethod>),
    Host(HostFn),
    /// A coroutine object: an `async def` call or an async host call that
    /// has not been awaited yet.
    Awaitable(Awaitable),
    ExceptionType(ExcType),
    Exception(Arc<Exception>),
    Module(ModuleKind),
    /// `sys.stdout` / `sys.stderr`
    Stream(Stream),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(Arc::from(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(Mutex::new(items)))
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Arc::from(items))
    }

    pub fn dict(dict: Dict) -> Self {
        Value::Dict(Arc::new(Mutex::new(dict)))
    }

    pub fn set(set: Set) -> Self {
        Value::Set(Arc::new(Mutex::new(set)))
    }

    /// Wrap a synchronous host closure as a callable value.
    pub fn host_fn<F>(name: &str, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> HostResult + Send + Sync + 'static,
    {
        Value::Host(HostFn { name: Arc::from(name), call: HostCall::Sync(Arc::new(f)) })
    }

    /// Wrap an asynchronous host closure as a callable value.
    ///
    /// Calling it from a script yields a coroutine object; the closure only
    /// runs when that object is awaited.
    pub fn host_async_fn<F, Fut>(name: &str, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HostResult> + Send + 'static,
    {
        let call: AsyncCall = Arc::new(move |args| Box::pin(f(args)));
        Value::Host(HostFn { name: Arc::from(name), call: HostCall::Async(call) })
    }

    /// Python type name, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Set(_) => "set",
            Value::Range(_) => "range",
            Value::Function(_) => "function",
            Value::Builtin(b) if b.is_type() => "type",
            Value::Builtin(_) | Value::Host(_) => "builtin_function_or_method",
            Value::BoundMethod(_) => "builtin_function_or_method",
            Value::Awaitable(_) => "coroutine",
            Value::ExceptionType(_) => "type",
            Value::Exception(e) => e.kind.name(),
            Value::Module(_) => "module",
            Value::Stream(_) => "TextIOWrapper",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.lock().is_empty(),
            Value::Tuple(items) => !items.is_empty(),
            Value::Dict(d) => !d.lock().is_empty(),
            Value::Set(s) => !s.lock().is_empty(),
            Value::Range(r) => r.len() > 0,
            _ => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of ints and bools.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Float view of any real number.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            other => other.as_int().map(|n| n as f64),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::repr(self))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::to_str(self))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

// ── Hashing ─────────────────────────────────────────────────────────────

/// Hashable projection of a value; equal Python values map to equal keys
/// (`1`, `1.0` and `True` collide as they do in Python).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    None,
    Int(i64),
    Float(u64),
    Str(Arc<str>),
    Tuple(Vec<HashKey>),
    Range(i64, i64, i64),
    /// Identity-hashed objects (functions, types, modules).
    Ident(usize),
    Named(&'static str),
}

impl HashKey {
    pub fn of(value: &Value) -> Result<HashKey, ExecError> {
        Ok(match value {
            Value::None => HashKey::None,
            Value::Bool(b) => HashKey::Int(i64::from(*b)),
            Value::Int(n) => HashKey::Int(*n),
            Value::Float(f) => {
                if f.fract() == 0.0 && f.abs() < 9.2e18 {
                    HashKey::Int(*f as i64)
                } else {
                    HashKey::Float(f.to_bits())
                }
            }
            Value::Str(s) => HashKey::Str(s.clone()),
            Value::Tuple(items) => {
                HashKey::Tuple(items.iter().map(HashKey::of).collect::<Result<_, _>>()?)
            }
            Value::Range(r) => HashKey::Range(r.start, r.stop, r.step),
            Value::Function(f) => HashKey::Ident(Arc::as_ptr(f) as usize),
            Value::Builtin(b) => HashKey::Named(b.name()),
            Value::ExceptionType(t) => HashKey::Named(t.name()),
            Value::Module(m) => HashKey::Named(m.name()),
            Value::List(_) | Value::Dict(_) | Value::Set(_) => {
                return Err(ExecError::type_error(format!(
                    "unhashable type: '{}'",
                    value.type_name()
                )))
            }
            Value::BoundMethod(m) => HashKey::Ident(Arc::as_ptr(m) as usize),
            Value::Host(h) => HashKey::Named(h.kind_tag()),
            Value::Awaitable(a) => HashKey::Ident(Arc::as_ptr(&a.pending) as usize),
            Value::Exception(e) => HashKey::Ident(Arc::as_ptr(e) as usize),
            Value::Stream(s) => HashKey::Named(s.name()),
        })
    }
}

/// Insertion-ordered Python dict.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    entries: IndexMap<HashKey, (Value, Value)>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Result<Option<Value>, ExecError> {
        Ok(self.entries.get(&HashKey::of(key)?).map(|(_, v)| v.clone()))
    }

    pub fn contains(&self, key: &Value) -> Result<bool, ExecError> {
        Ok(self.entries.contains_key(&HashKey::of(key)?))
    }

    /// Insert or overwrite; an existing key keeps its position and its
    /// original key object.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<(), ExecError> {
        let hash = HashKey::of(&key)?;
        match self.entries.get_mut(&hash) {
            Some(entry) => entry.1 = value,
            None => {
                self.entries.insert(hash, (key, value));
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, key: &Value) -> Result<Option<Value>, ExecError> {
        Ok(self.entries.shift_remove(&HashKey::of(key)?).map(|(_, v)| v))
    }

    pub fn pop_last(&mut self) -> Option<(Value, Value)> {
        self.entries.pop().map(|(_, entry)| entry)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> Vec<Value> {
        self.entries.values().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.entries.values().map(|(_, v)| v.clone()).collect()
    }

    pub fn items(&self) -> Vec<(Value, Value)> {
        self.entries.values().cloned().collect()
    }
}

/// Insertion-ordered Python set.
#[derive(Debug, Clone, Default)]
pub struct Set {
    items: IndexMap<HashKey, Value>,
}

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Result<Self, ExecError> {
        let mut set = Set::new();
        for value in values {
            set.add(value)?;
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &Value) -> Result<bool, ExecError> {
        Ok(self.items.contains_key(&HashKey::of(value)?))
    }

    pub fn add(&mut self, value: Value) -> Result<(), ExecError> {
        let hash = HashKey::of(&value)?;
        self.items.entry(hash).or_insert(value);
        Ok(())
    }

    pub fn remove(&mut self, value: &Value) -> Result<bool, ExecError> {
        Ok(self.items.shift_remove(&HashKey::of(value)?).is_some())
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.items.shift_remove_index(0).map(|(_, v)| v)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn values(&self) -> Vec<Value> {
        self.items.values().cloned().collect()
    }
}

// ── Callables and other objects ─────────────────────────────────────────

/// `range(start, stop, step)`; `step` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl Range {
    pub fn len(&self) -> usize {
        let span = if self.step > 0 {
            self.stop.saturating_sub(self.start)
        } else {
            self.start.saturating_sub(self.stop)
        };
        if span <= 0 {
            return 0;
        }
        let step = self.step.unsigned_abs();
        ((span.unsigned_abs() + step - 1) / step) as usize
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        if index >= self.len() {
            return None;
        }
        Some(self.start + self.step * index as i64)
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> {
        let range = *self;
        (0..range.len()).map(move |i| range.start + range.step * i as i64)
    }
}

/// A user-defined function or lambda.
pub struct Function {
    pub(crate) name: String,
    pub(crate) params: Vec<(String, Option<Value>)>,
    pub(crate) body: FunctionBody,
    pub(crate) is_async: bool,
    /// Enclosing function frames, innermost last.
    pub(crate) closure: Vec<Frame>,
    /// Names declared `global` in the body.
    pub(crate) global_names: Arc<HashSet<String>>,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.name
    }
}

pub(crate) enum FunctionBody {
    Block(Arc<Vec<Stmt>>),
    Lambda(Arc<Expr>),
}

/// `obj.method` bound to its receiver.
pub struct BoundMethod {
    pub(crate) receiver: Value,
    pub(crate) name: String,
}

/// A host-provided callable.
#[derive(Clone)]
pub struct HostFn {
    pub(crate) name: Arc<str>,
    pub(crate) call: HostCall,
}

impl HostFn {
    pub fn name(&self) -> &str {
        &self.name
    }

    fn kind_tag(&self) -> &'static str {
        match self.call {
            HostCall::Sync(_) => "host_fn",
            HostCall::Async(_) => "host_async_fn",
        }
    }
}

#[derive(Clone)]
pub(crate) enum HostCall {
    Sync(SyncCall),
    Async(AsyncCall),
}

/// A pending coroutine; awaiting it consumes the pending work.
#[derive(Clone)]
pub struct Awaitable {
    pub(crate) name: Arc<str>,
    pub(crate) pending: Arc<Mutex<Option<Pending>>>,
}

impl Awaitable {
    pub(crate) fn new(name: &str, pending: Pending) -> Self {
        Self { name: Arc::from(name), pending: Arc::new(Mutex::new(Some(pending))) }
    }

    /// Take the work out; `None` if this coroutine was already awaited.
    pub(crate) fn take(&self) -> Option<Pending> {
        self.pending.lock().take()
    }
}

pub(crate) enum Pending {
    Host { call: AsyncCall, args: Vec<Value> },
    Call { func: Arc<Function>, frame: Frame },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Sys,
    Math,
}

impl ModuleKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sys" => Some(ModuleKind::Sys),
            "math" => Some(ModuleKind::Math),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModuleKind::Sys => "sys",
            ModuleKind::Math => "math",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    pub fn name(&self) -> &'static str {
        match self {
            Stream::Stdout => "<stdout>",
            Stream::Stderr => "<stderr>",
        }
    }

    /// Global the interpreter writes this stream's text to.
    pub fn sink_global(&self) -> &'static str {
        match self {
            Stream::Stdout => "__stdout__",
            Stream::Stderr => "__stderr__",
        }
    }
}
