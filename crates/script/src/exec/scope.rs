// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Name resolution: local, enclosing, global and builtin scopes.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use super::builtins::Builtin;
use super::error::{ExcType, ExecError};
use super::value::Value;

/// One namespace of bindings, shared between a scope and the closures
/// created in it.
pub type Frame = Arc<Mutex<HashMap<String, Value>>>;

pub fn new_frame() -> Frame {
    Arc::new(Mutex::new(HashMap::new()))
}

/// The scopes visible to executing code.
#[derive(Clone)]
pub struct Scope {
    /// Function (or comprehension) locals; `None` at module level.
    pub(crate) locals: Option<Frame>,
    /// Frames of enclosing functions, innermost last.
    pub(crate) enclosing: Vec<Frame>,
    pub(crate) globals: Frame,
    /// Names declared `global` in the current function.
    pub(crate) global_names: Arc<HashSet<String>>,
}

impl Scope {
    pub fn module(globals: Frame) -> Self {
        Self { locals: None, enclosing: Vec::new(), globals, global_names: Arc::default() }
    }

    /// Scope for a function body running in `locals`.
    pub fn function(
        locals: Frame,
        enclosing: Vec<Frame>,
        globals: Frame,
        global_names: Arc<HashSet<String>>,
    ) -> Self {
        Self { locals: Some(locals), enclosing, globals, global_names }
    }

    /// A nested scope for a comprehension: reads fall through to `self`,
    /// loop targets stay private.
    pub fn child(&self) -> Self {
        let mut enclosing = self.enclosing.clone();
        if let Some(locals) = &self.locals {
            enclosing.push(locals.clone());
        }
        Self {
            locals: Some(new_frame()),
            enclosing,
            globals: self.globals.clone(),
            global_names: self.global_names.clone(),
        }
    }

    /// Frames a closure defined here captures.
    pub fn closure(&self) -> Vec<Frame> {
        let mut frames = self.enclosing.clone();
        if let Some(locals) = &self.locals {
            frames.push(locals.clone());
        }
        frames
    }

    pub fn lookup(&self, name: &str) -> Result<Value, ExecError> {
        if !self.global_names.contains(name) {
            if let Some(value) = self.locals.as_ref().and_then(|f| f.lock().get(name).cloned()) {
                return Ok(value);
            }
            for frame in self.enclosing.iter().rev() {
                if let Some(value) = frame.lock().get(name).cloned() {
                    return Ok(value);
                }
            }
        }
        if let Some(value) = self.globals.lock().get(name).cloned() {
            return Ok(value);
        }
        if let Some(builtin) = builtin_value(name) {
            return Ok(builtin);
        }
        Err(ExecError::new(ExcType::NameError, format!("name '{name}' is not defined")))
    }

    pub fn assign(&self, name: &str, value: Value) {
        self.target_frame(name).lock().insert(name.to_string(), value);
    }

    /// Remove a binding (`except ... as name` cleanup).
    pub fn unbind(&self, name: &str) {
        self.target_frame(name).lock().remove(name);
    }

    fn target_frame(&self, name: &str) -> &Frame {
        match &self.locals {
            Some(locals) if !self.global_names.contains(name) => locals,
            _ => &self.globals,
        }
    }
}

/// Builtin functions, types and exception classes by name.
pub fn builtin_value(name: &str) -> Option<Value> {
    if let Some(builtin) = Builtin::from_name(name) {
        return Some(Value::Builtin(builtin));
    }
    ExcType::from_name(name).map(Value::ExceptionType)
}
