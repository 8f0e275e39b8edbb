// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Methods of builtin types and streams, and the `math` module functions.

use super::builtins::{
    arity, expect_int, expect_str, float_to_int, kwarg, no_kwargs, sort_values, update_dict,
};
use super::call::Kwargs;
use super::error::{ExcType, ExecError};
use super::eval::{iterate, key_error};
use super::format::{format_value, repr, to_str};
use super::ops;
use super::run::Machine;
use super::value::{ModuleKind, Set, Value};

const STR_METHODS: &[&str] = &[
    "upper", "lower", "strip", "lstrip", "rstrip", "split", "join", "replace", "startswith",
    "endswith", "find", "index", "count", "isdigit", "isnumeric", "isalpha", "isalnum", "isspace",
    "isupper", "islower", "title", "capitalize", "swapcase", "format", "center", "ljust", "rjust",
    "zfill", "splitlines",
];
const LIST_METHODS: &[&str] = &[
    "append", "extend", "insert", "pop", "remove", "index", "count", "sort", "reverse", "clear",
    "copy",
];
const TUPLE_METHODS: &[&str] = &["index", "count"];
const DICT_METHODS: &[&str] =
    &["get", "keys", "values", "items", "pop", "popitem", "setdefault", "update", "clear", "copy"];
const SET_METHODS: &[&str] = &[
    "add", "remove", "discard", "pop", "clear", "copy", "union", "intersection", "difference",
];
const STREAM_METHODS: &[&str] = &["write", "flush"];

/// Functions exposed by `import math`.
pub(crate) const MATH_FUNCTIONS: &[&str] = &[
    "sqrt", "floor", "ceil", "trunc", "gcd", "log", "log10", "log2", "fabs", "isqrt",
    "factorial", "pow", "exp", "sin", "cos", "tan", "hypot",
];

pub(crate) fn has_method(receiver: &Value, name: &str) -> bool {
    let table: &[&str] = match receiver {
        Value::Str(_) => STR_METHODS,
        Value::List(_) => LIST_METHODS,
        Value::Tuple(_) => TUPLE_METHODS,
        Value::Dict(_) => DICT_METHODS,
        Value::Set(_) => SET_METHODS,
        Value::Stream(_) => STREAM_METHODS,
        Value::Float(_) => &["is_integer"],
        Value::Int(_) => &["bit_length"],
        _ => &[],
    };
    table.contains(&name)
}

pub(crate) async fn call(
    machine: &Machine,
    receiver: &Value,
    name: &str,
    args: Vec<Value>,
    mut kwargs: Kwargs,
) -> Result<Value, ExecError> {
    match receiver {
        Value::List(items) if name == "sort" => {
            no_positional("sort", &args)?;
            let key = kwarg(&mut kwargs, "key").filter(|k| !k.is_none());
            let reverse = kwarg(&mut kwargs, "reverse").is_some_and(|r| r.is_truthy());
            no_kwargs("sort", &kwargs)?;
            let snapshot = items.lock().clone();
            let sorted = sort_values(machine, snapshot, key, reverse).await?;
            *items.lock() = sorted;
            Ok(Value::None)
        }
        Value::Str(s) if name == "format" => str_format(s, &args, &kwargs).map(Value::str),
        Value::Stream(stream) => {
            no_kwargs(name, &kwargs)?;
            match name {
                "write" => {
                    arity("write", &args, 1, 1)?;
                    let text = expect_str("write", &args[0])?.to_string();
                    let len = text.chars().count() as i64;
                    machine.write_stream(*stream, text).await?;
                    Ok(Value::Int(len))
                }
                _ => Ok(Value::None),
            }
        }
        Value::Module(ModuleKind::Math) => {
            no_kwargs(name, &kwargs)?;
            math(name, &args)
        }
        _ => {
            no_kwargs(name, &kwargs)?;
            call_sync(receiver, name, &args)
        }
    }
}

fn no_positional(name: &str, args: &[Value]) -> Result<(), ExecError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ExecError::type_error(format!("{name}() takes no positional arguments")))
    }
}

fn no_attribute(receiver: &Value, name: &str) -> ExecError {
    ExecError::new(
        ExcType::AttributeError,
        format!("'{}' object has no attribute '{name}'", receiver.type_name()),
    )
}

fn call_sync(receiver: &Value, name: &str, args: &[Value]) -> Result<Value, ExecError> {
    match receiver {
        Value::Str(s) => str_method(s, name, args),
        Value::List(_) => list_method(receiver, name, args),
        Value::Tuple(items) => match name {
            "index" => {
                arity(name, args, 1, 1)?;
                position(items, &args[0], "tuple.index(x): x not in tuple")
            }
            "count" => {
                arity(name, args, 1, 1)?;
                Ok(Value::Int(items.iter().filter(|v| ops::equals(v, &args[0])).count() as i64))
            }
            _ => Err(no_attribute(receiver, name)),
        },
        Value::Dict(_) => dict_method(receiver, name, args),
        Value::Set(_) => set_method(receiver, name, args),
        Value::Float(f) if name == "is_integer" => {
            arity(name, args, 0, 0)?;
            Ok(Value::Bool(f.is_finite() && f.fract() == 0.0))
        }
        Value::Int(n) if name == "bit_length" => {
            arity(name, args, 0, 0)?;
            Ok(Value::Int(i64::from(64 - n.unsigned_abs().leading_zeros())))
        }
        _ => Err(no_attribute(receiver, name)),
    }
}

fn position(items: &[Value], needle: &Value, missing: &str) -> Result<Value, ExecError> {
    items
        .iter()
        .position(|v| ops::equals(v, needle))
        .map(|i| Value::Int(i as i64))
        .ok_or_else(|| ExecError::value_error(missing))
}

// ── str ─────────────────────────────────────────────────────────────────

fn str_method(s: &str, name: &str, args: &[Value]) -> Result<Value, ExecError> {
    let text = |v: String| -> Result<Value, ExecError> { Ok(Value::str(v)) };
    match name {
        "upper" => text(s.to_uppercase()),
        "lower" => text(s.to_lowercase()),
        "swapcase" => text(
            s.chars()
                .map(|c| if c.is_uppercase() { c.to_lowercase().collect::<String>() } else { c.to_uppercase().collect() })
                .collect(),
        ),
        "strip" | "lstrip" | "rstrip" => {
            arity(name, args, 0, 1)?;
            let chars: Option<Vec<char>> = match args.first() {
                None | Some(Value::None) => None,
                Some(v) => Some(expect_str(name, v)?.chars().collect()),
            };
            let matcher = |c: char| match &chars {
                Some(set) => set.contains(&c),
                None => c.is_whitespace(),
            };
            let out = match name {
                "strip" => s.trim_matches(matcher),
                "lstrip" => s.trim_start_matches(matcher),
                _ => s.trim_end_matches(matcher),
            };
            text(out.to_string())
        }
        "split" => {
            arity(name, args, 0, 2)?;
            let maxsplit = match args.get(1) {
                Some(v) => expect_int(v)?,
                None => -1,
            };
            let parts = match args.first() {
                None | Some(Value::None) => split_whitespace(s, maxsplit),
                Some(sep) => {
                    let sep = expect_str(name, sep)?;
                    if sep.is_empty() {
                        return Err(ExecError::value_error("empty separator"));
                    }
                    match usize::try_from(maxsplit) {
                        Ok(n) => s.splitn(n + 1, sep).map(str::to_string).collect(),
                        Err(_) => s.split(sep).map(str::to_string).collect(),
                    }
                }
            };
            Ok(Value::list(parts.into_iter().map(Value::str).collect()))
        }
        "splitlines" => {
            arity(name, args, 0, 0)?;
            Ok(Value::list(s.lines().map(Value::str).collect()))
        }
        "join" => {
            arity(name, args, 1, 1)?;
            let mut parts = Vec::new();
            for (i, item) in iterate(&args[0])?.enumerate() {
                match item {
                    Value::Str(part) => parts.push(part.to_string()),
                    other => {
                        return Err(ExecError::type_error(format!(
                            "sequence item {i}: expected str instance, {} found",
                            other.type_name()
                        )))
                    }
                }
            }
            text(parts.join(s))
        }
        "replace" => {
            arity(name, args, 2, 3)?;
            let old = expect_str(name, &args[0])?;
            let new = expect_str(name, &args[1])?;
            match args.get(2).map(expect_int).transpose()?.and_then(|n| usize::try_from(n).ok()) {
                Some(count) => text(s.replacen(old, new, count)),
                None => text(s.replace(old, new)),
            }
        }
        "startswith" | "endswith" => {
            arity(name, args, 1, 1)?;
            let candidates: Vec<Value> = match &args[0] {
                Value::Tuple(items) => items.to_vec(),
                other => vec![other.clone()],
            };
            for candidate in &candidates {
                let affix = expect_str(name, candidate)?;
                let hit = if name == "startswith" { s.starts_with(affix) } else { s.ends_with(affix) };
                if hit {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }
        "find" | "index" => {
            arity(name, args, 1, 1)?;
            let needle = expect_str(name, &args[0])?;
            match s.find(needle) {
                Some(byte) => Ok(Value::Int(s[..byte].chars().count() as i64)),
                None if name == "find" => Ok(Value::Int(-1)),
                None => Err(ExecError::value_error("substring not found")),
            }
        }
        "count" => {
            arity(name, args, 1, 1)?;
            let needle = expect_str(name, &args[0])?;
            let n = if needle.is_empty() { s.chars().count() + 1 } else { s.matches(needle).count() };
            Ok(Value::Int(n as i64))
        }
        "isdigit" | "isnumeric" => Ok(Value::Bool(!s.is_empty() && s.chars().all(char::is_numeric))),
        "isalpha" => Ok(Value::Bool(!s.is_empty() && s.chars().all(char::is_alphabetic))),
        "isalnum" => Ok(Value::Bool(!s.is_empty() && s.chars().all(char::is_alphanumeric))),
        "isspace" => Ok(Value::Bool(!s.is_empty() && s.chars().all(char::is_whitespace))),
        "isupper" => Ok(Value::Bool(
            s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase),
        )),
        "islower" => Ok(Value::Bool(
            s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase),
        )),
        "title" => {
            let mut out = String::with_capacity(s.len());
            let mut previous_cased = false;
            for c in s.chars() {
                if previous_cased {
                    out.extend(c.to_lowercase());
                } else {
                    out.extend(c.to_uppercase());
                }
                previous_cased = c.is_alphabetic();
            }
            text(out)
        }
        "capitalize" => {
            let mut chars = s.chars();
            let out = match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
                None => String::new(),
            };
            text(out)
        }
        "center" | "ljust" | "rjust" => {
            arity(name, args, 1, 2)?;
            let width = usize::try_from(expect_int(&args[0])?).unwrap_or(0);
            ops::repeated_len(1, width)?;
            let fill = match args.get(1) {
                Some(v) => {
                    let f = expect_str(name, v)?;
                    let mut chars = f.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => c,
                        _ => {
                            return Err(ExecError::type_error(
                                "The fill character must be exactly one character long",
                            ))
                        }
                    }
                }
                None => ' ',
            };
            let len = s.chars().count();
            if len >= width {
                return text(s.to_string());
            }
            let margin = width - len;
            let left = match name {
                "ljust" => 0,
                "rjust" => margin,
                _ => margin / 2 + (margin & width & 1),
            };
            let pad = |n: usize| std::iter::repeat(fill).take(n).collect::<String>();
            text(format!("{}{s}{}", pad(left), pad(margin - left)))
        }
        "zfill" => {
            arity(name, args, 1, 1)?;
            let width = usize::try_from(expect_int(&args[0])?).unwrap_or(0);
            ops::repeated_len(1, width)?;
            let len = s.chars().count();
            if len >= width {
                return text(s.to_string());
            }
            let zeros = "0".repeat(width - len);
            match s.chars().next() {
                Some(sign @ ('+' | '-')) => text(format!("{sign}{zeros}{}", &s[1..])),
                _ => text(format!("{zeros}{s}")),
            }
        }
        _ => Err(no_attribute(&Value::str(s), name)),
    }
}

/// `str.split()` with no separator: runs of whitespace, no empty parts.
fn split_whitespace(s: &str, maxsplit: i64) -> Vec<String> {
    let Ok(max) = usize::try_from(maxsplit) else {
        return s.split_whitespace().map(str::to_string).collect();
    };
    let mut parts = Vec::new();
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        if parts.len() == max {
            parts.push(rest.to_string());
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                parts.push(rest[..end].to_string());
                rest = rest[end..].trim_start();
            }
            None => {
                parts.push(rest.to_string());
                break;
            }
        }
    }
    parts
}

/// `template.format(*args, **kwargs)`
fn str_format(template: &str, args: &[Value], kwargs: &Kwargs) -> Result<String, ExecError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut auto_index = 0usize;
    let mut manual = false;

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(ExecError::value_error("Single '}' encountered in format string")),
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => field.push(c),
                        None => {
                            return Err(ExecError::value_error(
                                "Single '{' encountered in format string",
                            ))
                        }
                    }
                }
                let (head, spec) = match field.split_once(':') {
                    Some((head, spec)) => (head, spec),
                    None => (field.as_str(), ""),
                };
                let (field_name, conversion) = match head.split_once('!') {
                    Some((name, conv)) => (name, conv.chars().next()),
                    None => (head, None),
                };
                let value = if field_name.is_empty() {
                    if manual {
                        return Err(ExecError::value_error(
                            "cannot switch from manual field specification to automatic field numbering",
                        ));
                    }
                    auto_index += 1;
                    positional(args, auto_index - 1)?
                } else if let Ok(i) = field_name.parse::<usize>() {
                    manual = true;
                    positional(args, i)?
                } else {
                    kwargs
                        .iter()
                        .find(|(k, _)| k == field_name)
                        .map(|(_, v)| v.clone())
                        .ok_or_else(|| key_error(&Value::str(field_name)))?
                };
                let value = match conversion {
                    Some('r' | 'a') => Value::str(repr(&value)),
                    Some('s') => Value::str(to_str(&value)),
                    Some(other) => {
                        return Err(ExecError::value_error(format!(
                            "Unknown conversion specifier {other}"
                        )))
                    }
                    None => value,
                };
                out.push_str(&format_value(&value, spec)?);
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

fn positional(args: &[Value], i: usize) -> Result<Value, ExecError> {
    args.get(i).cloned().ok_or_else(|| {
        ExecError::new(
            ExcType::IndexError,
            format!("Replacement index {i} out of range for positional args tuple"),
        )
    })
}

// ── list ────────────────────────────────────────────────────────────────

fn list_method(receiver: &Value, name: &str, args: &[Value]) -> Result<Value, ExecError> {
    let Value::List(items) = receiver else {
        return Err(no_attribute(receiver, name));
    };
    match name {
        "append" => {
            arity(name, args, 1, 1)?;
            items.lock().push(args[0].clone());
            Ok(Value::None)
        }
        "extend" => {
            arity(name, args, 1, 1)?;
            let extra: Vec<Value> = iterate(&args[0])?.collect();
            items.lock().extend(extra);
            Ok(Value::None)
        }
        "insert" => {
            arity(name, args, 2, 2)?;
            let mut items = items.lock();
            let len = items.len() as i64;
            let i = expect_int(&args[0])?;
            let i = if i < 0 { (i + len).max(0) } else { i.min(len) };
            items.insert(i as usize, args[1].clone());
            Ok(Value::None)
        }
        "pop" => {
            arity(name, args, 0, 1)?;
            let mut items = items.lock();
            if items.is_empty() {
                return Err(ExecError::new(ExcType::IndexError, "pop from empty list"));
            }
            let len = items.len() as i64;
            let i = match args.first() {
                Some(v) => expect_int(v)?,
                None => -1,
            };
            let i = if i < 0 { i + len } else { i };
            if !(0..len).contains(&i) {
                return Err(ExecError::new(ExcType::IndexError, "pop index out of range"));
            }
            Ok(items.remove(i as usize))
        }
        "remove" => {
            arity(name, args, 1, 1)?;
            let mut items = items.lock();
            match items.iter().position(|v| ops::equals(v, &args[0])) {
                Some(i) => {
                    items.remove(i);
                    Ok(Value::None)
                }
                None => Err(ExecError::value_error("list.remove(x): x not in list")),
            }
        }
        "index" => {
            arity(name, args, 1, 1)?;
            let snapshot = items.lock().clone();
            position(&snapshot, &args[0], &format!("{} is not in list", repr(&args[0])))
        }
        "count" => {
            arity(name, args, 1, 1)?;
            let snapshot = items.lock().clone();
            Ok(Value::Int(snapshot.iter().filter(|v| ops::equals(v, &args[0])).count() as i64))
        }
        "reverse" => {
            arity(name, args, 0, 0)?;
            items.lock().reverse();
            Ok(Value::None)
        }
        "clear" => {
            arity(name, args, 0, 0)?;
            items.lock().clear();
            Ok(Value::None)
        }
        "copy" => {
            arity(name, args, 0, 0)?;
            Ok(Value::list(items.lock().clone()))
        }
        _ => Err(no_attribute(receiver, name)),
    }
}

// ── dict ────────────────────────────────────────────────────────────────

fn dict_method(receiver: &Value, name: &str, args: &[Value]) -> Result<Value, ExecError> {
    let Value::Dict(dict) = receiver else {
        return Err(no_attribute(receiver, name));
    };
    match name {
        "get" => {
            arity(name, args, 1, 2)?;
            let found = dict.lock().get(&args[0])?;
            Ok(found.or_else(|| args.get(1).cloned()).unwrap_or(Value::None))
        }
        "keys" => Ok(Value::list(dict.lock().keys())),
        "values" => Ok(Value::list(dict.lock().values())),
        "items" => Ok(Value::list(
            dict.lock().items().into_iter().map(|(k, v)| Value::tuple(vec![k, v])).collect(),
        )),
        "pop" => {
            arity(name, args, 1, 2)?;
            let removed = dict.lock().remove(&args[0])?;
            match (removed, args.get(1)) {
                (Some(value), _) => Ok(value),
                (None, Some(default)) => Ok(default.clone()),
                (None, None) => Err(key_error(&args[0])),
            }
        }
        "popitem" => {
            arity(name, args, 0, 0)?;
            dict.lock()
                .pop_last()
                .map(|(k, v)| Value::tuple(vec![k, v]))
                .ok_or_else(|| key_error(&Value::str("popitem(): dictionary is empty")))
        }
        "setdefault" => {
            arity(name, args, 1, 2)?;
            let mut dict = dict.lock();
            if let Some(existing) = dict.get(&args[0])? {
                return Ok(existing);
            }
            let value = args.get(1).cloned().unwrap_or(Value::None);
            dict.insert(args[0].clone(), value.clone())?;
            Ok(value)
        }
        "update" => {
            arity(name, args, 0, 1)?;
            if let Some(source) = args.first() {
                let mut merged = dict.lock().clone();
                update_dict(&mut merged, source)?;
                *dict.lock() = merged;
            }
            Ok(Value::None)
        }
        "clear" => {
            dict.lock().clear();
            Ok(Value::None)
        }
        "copy" => Ok(Value::dict(dict.lock().clone())),
        _ => Err(no_attribute(receiver, name)),
    }
}

// ── set ─────────────────────────────────────────────────────────────────

fn set_method(receiver: &Value, name: &str, args: &[Value]) -> Result<Value, ExecError> {
    let Value::Set(set) = receiver else {
        return Err(no_attribute(receiver, name));
    };
    match name {
        "add" => {
            arity(name, args, 1, 1)?;
            set.lock().add(args[0].clone())?;
            Ok(Value::None)
        }
        "remove" => {
            arity(name, args, 1, 1)?;
            if set.lock().remove(&args[0])? {
                Ok(Value::None)
            } else {
                Err(key_error(&args[0]))
            }
        }
        "discard" => {
            arity(name, args, 1, 1)?;
            set.lock().remove(&args[0])?;
            Ok(Value::None)
        }
        "pop" => set
            .lock()
            .pop()
            .ok_or_else(|| key_error(&Value::str("pop from an empty set"))),
        "clear" => {
            set.lock().clear();
            Ok(Value::None)
        }
        "copy" => Ok(Value::set(set.lock().clone())),
        "union" | "intersection" | "difference" => {
            let mut result = set.lock().clone();
            for other in args {
                let other = Set::from_values(iterate(other)?)?;
                result = match name {
                    "union" => {
                        let mut merged = result;
                        for item in other.values() {
                            merged.add(item)?;
                        }
                        merged
                    }
                    "intersection" => {
                        let mut kept = Set::new();
                        for item in result.values() {
                            if other.contains(&item)? {
                                kept.add(item)?;
                            }
                        }
                        kept
                    }
                    _ => {
                        let mut kept = Set::new();
                        for item in result.values() {
                            if !other.contains(&item)? {
                                kept.add(item)?;
                            }
                        }
                        kept
                    }
                };
            }
            Ok(Value::set(result))
        }
        _ => Err(no_attribute(receiver, name)),
    }
}

// ── math ────────────────────────────────────────────────────────────────

fn math(name: &str, args: &[Value]) -> Result<Value, ExecError> {
    let real = |v: &Value| {
        v.as_float().ok_or_else(|| {
            ExecError::type_error(format!("must be real number, not {}", v.type_name()))
        })
    };
    let domain = || ExecError::value_error("math domain error");
    let unary = |f: fn(f64) -> f64| -> Result<Value, ExecError> {
        arity(name, args, 1, 1)?;
        Ok(Value::Float(f(real(&args[0])?)))
    };
    match name {
        "sqrt" => {
            arity(name, args, 1, 1)?;
            let x = real(&args[0])?;
            if x < 0.0 {
                return Err(domain());
            }
            Ok(Value::Float(x.sqrt()))
        }
        "floor" | "ceil" | "trunc" => {
            arity(name, args, 1, 1)?;
            if let Value::Int(n) = &args[0] {
                return Ok(Value::Int(*n));
            }
            let x = real(&args[0])?;
            let rounded = match name {
                "floor" => x.floor(),
                "ceil" => x.ceil(),
                _ => x.trunc(),
            };
            float_to_int(rounded).map(Value::Int)
        }
        "gcd" => {
            let mut acc: i64 = 0;
            for arg in args {
                let mut b = expect_int(arg)?.abs();
                let mut a = acc;
                while b != 0 {
                    (a, b) = (b, a % b);
                }
                acc = a;
            }
            Ok(Value::Int(acc))
        }
        "log" => {
            arity(name, args, 1, 2)?;
            let x = real(&args[0])?;
            if x <= 0.0 {
                return Err(domain());
            }
            match args.get(1) {
                Some(base) => {
                    let base = real(base)?;
                    if base <= 0.0 || base == 1.0 {
                        return Err(domain());
                    }
                    Ok(Value::Float(x.ln() / base.ln()))
                }
                None => Ok(Value::Float(x.ln())),
            }
        }
        "log10" | "log2" => {
            arity(name, args, 1, 1)?;
            let x = real(&args[0])?;
            if x <= 0.0 {
                return Err(domain());
            }
            Ok(Value::Float(if name == "log10" { x.log10() } else { x.log2() }))
        }
        "fabs" => unary(f64::abs),
        "exp" => unary(f64::exp),
        "sin" => unary(f64::sin),
        "cos" => unary(f64::cos),
        "tan" => unary(f64::tan),
        "isqrt" => {
            arity(name, args, 1, 1)?;
            let n = expect_int(&args[0])?;
            if n < 0 {
                return Err(ExecError::value_error("isqrt() argument must be nonnegative"));
            }
            let mut root = (n as f64).sqrt() as i64;
            while root.checked_mul(root).map_or(true, |sq| sq > n) {
                root -= 1;
            }
            while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
                root += 1;
            }
            Ok(Value::Int(root))
        }
        "factorial" => {
            arity(name, args, 1, 1)?;
            let n = expect_int(&args[0])?;
            if n < 0 {
                return Err(ExecError::value_error("factorial() not defined for negative values"));
            }
            let mut acc: i64 = 1;
            for k in 2..=n {
                acc = acc
                    .checked_mul(k)
                    .ok_or_else(|| ExecError::new(ExcType::OverflowError, "integer overflow"))?;
            }
            Ok(Value::Int(acc))
        }
        "pow" => {
            arity(name, args, 2, 2)?;
            Ok(Value::Float(real(&args[0])?.powf(real(&args[1])?)))
        }
        "hypot" => {
            let mut sum = 0.0;
            for arg in args {
                let x = real(arg)?;
                sum += x * x;
            }
            Ok(Value::Float(sum.sqrt()))
        }
        _ => Err(ExecError::new(
            ExcType::AttributeError,
            format!("module 'math' has no attribute '{name}'"),
        )),
    }
}
