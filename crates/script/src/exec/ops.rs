// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operators: arithmetic, comparison, membership and identity.

use std::cmp::Ordering;
use std::sync::Arc;

use super::error::{ExcType, ExecError};
use super::format::percent_format;
use super::value::Value;
use crate::ast::{BinOp, CmpOp, UnaryOp};

const MAX_COMPARE_DEPTH: usize = 64;

/// Largest sequence (in elements, or bytes for `str`) that repetition and
/// padding will build.
pub const MAX_SEQUENCE_LEN: usize = 1 << 24;

fn overflow() -> ExecError {
    ExecError::new(ExcType::OverflowError, "integer overflow")
}

fn zero_division(message: &str) -> ExecError {
    ExecError::new(ExcType::ZeroDivisionError, message)
}

fn unsupported(op: BinOp, left: &Value, right: &Value) -> ExecError {
    ExecError::type_error(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'",
        op.symbol(),
        left.type_name(),
        right.type_name()
    ))
}

/// Both operands as integers (bools count), if possible.
fn ints(left: &Value, right: &Value) -> Option<(i64, i64)> {
    Some((left.as_int()?, right.as_int()?))
}

/// Both operands as floats when at least one is a float.
fn floats(left: &Value, right: &Value) -> Option<(f64, f64)> {
    match (left, right) {
        (Value::Float(_), _) | (_, Value::Float(_)) => Some((left.as_float()?, right.as_float()?)),
        _ => None,
    }
}

pub fn binary(op: BinOp, left: &Value, right: &Value) -> Result<Value, ExecError> {
    match op {
        BinOp::Add => add(left, right),
        BinOp::Sub => {
            if let Some((a, b)) = ints(left, right) {
                return a.checked_sub(b).map(Value::Int).ok_or_else(overflow);
            }
            if let Some((a, b)) = floats(left, right) {
                return Ok(Value::Float(a - b));
            }
            if let (Value::Set(a), Value::Set(b)) = (left, right) {
                let (a, b) = (a.lock().clone(), b.lock().clone());
                let mut out = super::value::Set::new();
                for item in a.values() {
                    if !b.contains(&item)? {
                        out.add(item)?;
                    }
                }
                return Ok(Value::set(out));
            }
            Err(unsupported(op, left, right))
        }
        BinOp::Mul => mul(left, right),
        BinOp::Div => {
            let (Some(a), Some(b)) = (left.as_float(), right.as_float()) else {
                return Err(unsupported(op, left, right));
            };
            if b == 0.0 {
                return Err(zero_division("division by zero"));
            }
            Ok(Value::Float(a / b))
        }
        BinOp::FloorDiv => {
            if let Some((a, b)) = ints(left, right) {
                if b == 0 {
                    return Err(zero_division("integer division or modulo by zero"));
                }
                return floor_div(a, b).map(Value::Int).ok_or_else(overflow);
            }
            if let Some((a, b)) = floats(left, right) {
                if b == 0.0 {
                    return Err(zero_division("float floor division by zero"));
                }
                return Ok(Value::Float((a / b).floor()));
            }
            Err(unsupported(op, left, right))
        }
        BinOp::Mod => {
            if let Value::Str(template) = left {
                return percent_format(template, right).map(Value::str);
            }
            if let Some((a, b)) = ints(left, right) {
                if b == 0 {
                    return Err(zero_division("integer modulo by zero"));
                }
                return floor_mod(a, b).map(Value::Int).ok_or_else(overflow);
            }
            if let Some((a, b)) = floats(left, right) {
                if b == 0.0 {
                    return Err(zero_division("float modulo"));
                }
                let r = a % b;
                let r = if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r };
                return Ok(Value::Float(r));
            }
            Err(unsupported(op, left, right))
        }
        BinOp::Pow => pow(left, right),
    }
}

fn add(left: &Value, right: &Value) -> Result<Value, ExecError> {
    if let Some((a, b)) = ints(left, right) {
        return a.checked_add(b).map(Value::Int).ok_or_else(overflow);
    }
    if let Some((a, b)) = floats(left, right) {
        return Ok(Value::Float(a + b));
    }
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::str(format!("{a}{b}"))),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.lock().clone();
            items.extend(b.lock().iter().cloned());
            Ok(Value::list(items))
        }
        (Value::Tuple(a), Value::Tuple(b)) => {
            Ok(Value::tuple(a.iter().chain(b.iter()).cloned().collect()))
        }
        (Value::Str(_) | Value::List(_), other) => Err(ExecError::type_error(format!(
            "can only concatenate {} (not \"{}\") to {}",
            left.type_name(),
            other.type_name(),
            left.type_name()
        ))),
        _ => Err(unsupported(BinOp::Add, left, right)),
    }
}

fn mul(left: &Value, right: &Value) -> Result<Value, ExecError> {
    if let Some((a, b)) = ints(left, right) {
        return a.checked_mul(b).map(Value::Int).ok_or_else(overflow);
    }
    if let Some((a, b)) = floats(left, right) {
        return Ok(Value::Float(a * b));
    }
    let (seq, count) = match (left, right) {
        (seq, Value::Int(n)) | (Value::Int(n), seq) => (seq, *n),
        (seq, Value::Bool(b)) | (Value::Bool(b), seq) => (seq, i64::from(*b)),
        _ => return Err(unsupported(BinOp::Mul, left, right)),
    };
    let count = usize::try_from(count).unwrap_or(0);
    match seq {
        Value::Str(s) => {
            let addressable = s.len().checked_mul(count).and_then(|n| isize::try_from(n).ok());
            if addressable.is_none() {
                return Err(ExecError::new(ExcType::OverflowError, "repeated string is too long"));
            }
            repeated_len(s.len(), count)?;
            Ok(Value::str(s.repeat(count)))
        }
        Value::List(items) => {
            let items = items.lock().clone();
            Ok(Value::list(repeat(&items, count)?))
        }
        Value::Tuple(items) => Ok(Value::tuple(repeat(items, count)?)),
        _ => Err(unsupported(BinOp::Mul, left, right)),
    }
}

/// Length of `len * count`, refused with `MemoryError` past
/// [`MAX_SEQUENCE_LEN`].
pub fn repeated_len(len: usize, count: usize) -> Result<usize, ExecError> {
    match len.checked_mul(count) {
        Some(total) if total <= MAX_SEQUENCE_LEN => Ok(total),
        _ => Err(ExecError::new(ExcType::MemoryError, "")),
    }
}

fn repeat(items: &[Value], count: usize) -> Result<Vec<Value>, ExecError> {
    let mut out = Vec::with_capacity(repeated_len(items.len(), count)?);
    if items.is_empty() {
        return Ok(out);
    }
    for _ in 0..count {
        out.extend(items.iter().cloned());
    }
    Ok(out)
}

fn pow(left: &Value, right: &Value) -> Result<Value, ExecError> {
    if let Some((a, b)) = ints(left, right) {
        if b >= 0 {
            let exp = u32::try_from(b).map_err(|_| overflow())?;
            return a.checked_pow(exp).map(Value::Int).ok_or_else(overflow);
        }
        if a == 0 {
            return Err(zero_division("0.0 cannot be raised to a negative power"));
        }
        return Ok(Value::Float((a as f64).powf(b as f64)));
    }
    let (Some(a), Some(b)) = (left.as_float(), right.as_float()) else {
        return Err(unsupported(BinOp::Pow, left, right));
    };
    if a == 0.0 && b < 0.0 {
        return Err(zero_division("0.0 cannot be raised to a negative power"));
    }
    Ok(Value::Float(a.powf(b)))
}

/// Python integer floor division; `None` on overflow.
pub fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Python integer modulo: the result takes the sign of the divisor.
pub fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(r + b)
    } else {
        Some(r)
    }
}

pub fn unary(op: UnaryOp, operand: &Value) -> Result<Value, ExecError> {
    match (op, operand) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Pos, Value::Float(f)) => Ok(Value::Float(*f)),
        (UnaryOp::Neg, v) if v.as_int().is_some() => {
            v.as_int().unwrap_or_default().checked_neg().map(Value::Int).ok_or_else(overflow)
        }
        (UnaryOp::Pos, v) if v.as_int().is_some() => Ok(Value::Int(v.as_int().unwrap_or_default())),
        (op, v) => {
            let symbol = if op == UnaryOp::Neg { "-" } else { "+" };
            Err(ExecError::type_error(format!(
                "bad operand type for unary {symbol}: '{}'",
                v.type_name()
            )))
        }
    }
}

// ── Comparison ──────────────────────────────────────────────────────────

pub fn compare(op: CmpOp, left: &Value, right: &Value) -> Result<bool, ExecError> {
    match op {
        CmpOp::Eq => Ok(equals(left, right)),
        CmpOp::NotEq => Ok(!equals(left, right)),
        CmpOp::Lt => Ok(order(op, left, right)? == Ordering::Less),
        CmpOp::LtE => Ok(order(op, left, right)? != Ordering::Greater),
        CmpOp::Gt => Ok(order(op, left, right)? == Ordering::Greater),
        CmpOp::GtE => Ok(order(op, left, right)? != Ordering::Less),
        CmpOp::In => contains(right, left),
        CmpOp::NotIn => contains(right, left).map(|found| !found),
        CmpOp::Is => Ok(identical(left, right)),
        CmpOp::IsNot => Ok(!identical(left, right)),
    }
}

/// `left == right`
pub fn equals(left: &Value, right: &Value) -> bool {
    equals_at(left, right, 0)
}

fn equals_at(left: &Value, right: &Value, depth: usize) -> bool {
    if depth > MAX_COMPARE_DEPTH {
        return false;
    }
    let seq_eq = |a: &[Value], b: &[Value]| {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equals_at(x, y, depth + 1))
    };
    match (left, right) {
        (Value::None, Value::None) => true,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Float(_), _) | (_, Value::Float(_)) => match (left.as_float(), right.as_float()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        (Value::Int(_) | Value::Bool(_), Value::Int(_) | Value::Bool(_)) => left.as_int() == right.as_int(),
        (Value::List(a), Value::List(b)) => {
            if Arc::ptr_eq(a, b) {
                return true;
            }
            let (a, b) = (a.lock().clone(), b.lock().clone());
            seq_eq(&a, &b)
        }
        (Value::Tuple(a), Value::Tuple(b)) => seq_eq(a, b),
        (Value::Dict(a), Value::Dict(b)) => {
            if Arc::ptr_eq(a, b) {
                return true;
            }
            let (a, b) = (a.lock().clone(), b.lock().clone());
            a.len() == b.len()
                && a.items().iter().all(|(k, v)| match b.get(k) {
                    Ok(Some(other)) => equals_at(v, &other, depth + 1),
                    _ => false,
                })
        }
        (Value::Set(a), Value::Set(b)) => {
            let (a, b) = (a.lock().clone(), b.lock().clone());
            a.len() == b.len() && a.values().iter().all(|v| b.contains(v).unwrap_or(false))
        }
        (Value::Range(a), Value::Range(b)) => a == b,
        (Value::Builtin(a), Value::Builtin(b)) => a == b,
        (Value::ExceptionType(a), Value::ExceptionType(b)) => a == b,
        (Value::Module(a), Value::Module(b)) => a == b,
        (Value::Stream(a), Value::Stream(b)) => a == b,
        _ => identical(left, right),
    }
}

/// `left is right`
pub fn identical(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::None, Value::None) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
        (Value::Str(a), Value::Str(b)) => Arc::ptr_eq(a, b) || a == b,
        (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
        (Value::Tuple(a), Value::Tuple(b)) => Arc::ptr_eq(a, b),
        (Value::Dict(a), Value::Dict(b)) => Arc::ptr_eq(a, b),
        (Value::Set(a), Value::Set(b)) => Arc::ptr_eq(a, b),
        (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
        (Value::BoundMethod(a), Value::BoundMethod(b)) => Arc::ptr_eq(a, b),
        (Value::Exception(a), Value::Exception(b)) => Arc::ptr_eq(a, b),
        (Value::Awaitable(a), Value::Awaitable(b)) => Arc::ptr_eq(&a.pending, &b.pending),
        (Value::Builtin(a), Value::Builtin(b)) => a == b,
        (Value::ExceptionType(a), Value::ExceptionType(b)) => a == b,
        (Value::Module(a), Value::Module(b)) => a == b,
        (Value::Stream(a), Value::Stream(b)) => a == b,
        _ => false,
    }
}

/// Total order used by `<`, `sorted`, `min` and `max`.
pub fn order(op: CmpOp, left: &Value, right: &Value) -> Result<Ordering, ExecError> {
    order_at(op, left, right, 0)
}

fn order_at(op: CmpOp, left: &Value, right: &Value, depth: usize) -> Result<Ordering, ExecError> {
    let not_supported = || {
        ExecError::type_error(format!(
            "'{}' not supported between instances of '{}' and '{}'",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ))
    };
    if depth > MAX_COMPARE_DEPTH {
        return Err(ExecError::new(ExcType::RecursionError, "maximum recursion depth exceeded in comparison"));
    }
    if let Some((a, b)) = ints(left, right) {
        return Ok(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (left.as_float(), right.as_float()) {
        return a.partial_cmp(&b).ok_or_else(not_supported);
    }
    let seq_order = |a: &[Value], b: &[Value]| -> Result<Ordering, ExecError> {
        for (x, y) in a.iter().zip(b) {
            if !equals(x, y) {
                return order_at(op, x, y, depth + 1);
            }
        }
        Ok(a.len().cmp(&b.len()))
    };
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        (Value::List(a), Value::List(b)) => {
            let (a, b) = (a.lock().clone(), b.lock().clone());
            seq_order(&a, &b)
        }
        (Value::Tuple(a), Value::Tuple(b)) => seq_order(a, b),
        _ => Err(not_supported()),
    }
}

/// `item in container`
pub fn contains(container: &Value, item: &Value) -> Result<bool, ExecError> {
    match container {
        Value::Str(s) => match item {
            Value::Str(needle) => Ok(s.contains(&**needle)),
            other => Err(ExecError::type_error(format!(
                "'in <string>' requires string as left operand, not {}",
                other.type_name()
            ))),
        },
        Value::List(items) => {
            let items = items.lock().clone();
            Ok(items.iter().any(|v| equals(v, item)))
        }
        Value::Tuple(items) => Ok(items.iter().any(|v| equals(v, item))),
        Value::Dict(d) => d.lock().contains(item),
        Value::Set(s) => s.lock().contains(item),
        Value::Range(r) => {
            let n = match item {
                Value::Float(f) if f.fract() == 0.0 => *f as i64,
                other => match other.as_int() {
                    Some(n) => n,
                    None => return Ok(false),
                },
            };
            let offset = if r.step > 0 {
                (r.start..r.stop).contains(&n).then(|| n - r.start)
            } else {
                (n > r.stop && n <= r.start).then(|| r.start - n)
            };
            Ok(offset.is_some_and(|d| d % r.step.abs() == 0))
        }
        other => Err(ExecError::type_error(format!(
            "argument of type '{}' is not iterable",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
#[path = "../exec_tests/ops.rs"]
mod tests;
