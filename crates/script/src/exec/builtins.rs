// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builtin functions and types.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::call::Kwargs;
use super::error::{ExcType, ExecError};
use super::eval::iterate;
use super::format::{repr, to_str};
use super::ops;
use super::run::Machine;
use super::value::{Dict, HashKey, Range, Set, Stream, Value};
use crate::ast::{BinOp, CmpOp};

macro_rules! builtins {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// A builtin function or type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Builtin {
            $($variant,)*
            /// A type that can be named (`type(f)`) but not called.
            Class(&'static str),
        }

        impl Builtin {
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Builtin::$variant),)*
                    _ => None,
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Builtin::$variant => $name,)*
                    Builtin::Class(name) => *name,
                }
            }
        }
    };
}

builtins! {
    Abs => "abs",
    All => "all",
    Any => "any",
    Bin => "bin",
    Bool => "bool",
    Callable => "callable",
    Chr => "chr",
    Dict => "dict",
    Divmod => "divmod",
    Enumerate => "enumerate",
    Filter => "filter",
    Float => "float",
    Hash => "hash",
    Hex => "hex",
    Input => "input",
    Int => "int",
    Isinstance => "isinstance",
    Len => "len",
    List => "list",
    Map => "map",
    Max => "max",
    Min => "min",
    Oct => "oct",
    Ord => "ord",
    Pow => "pow",
    Print => "print",
    Range => "range",
    Repr => "repr",
    Reversed => "reversed",
    Round => "round",
    Set => "set",
    Sorted => "sorted",
    Str => "str",
    Sum => "sum",
    Tuple => "tuple",
    Type => "type",
    Zip => "zip",
}

impl Builtin {
    /// Is this a class (so `repr` shows `<class '...'>`)?
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Builtin::Bool
                | Builtin::Dict
                | Builtin::Float
                | Builtin::Int
                | Builtin::List
                | Builtin::Range
                | Builtin::Set
                | Builtin::Str
                | Builtin::Tuple
                | Builtin::Type
                | Builtin::Class(_)
        )
    }
}

// ── Argument helpers ────────────────────────────────────────────────────

/// Check the positional argument count.
pub(crate) fn arity(name: &str, args: &[Value], min: usize, max: usize) -> Result<(), ExecError> {
    let given = args.len();
    if (min..=max).contains(&given) {
        return Ok(());
    }
    let message = if min == max {
        let plural = if min == 1 { "" } else { "s" };
        format!("{name}() takes exactly {min} argument{plural} ({given} given)")
    } else if given < min {
        format!("{name} expected at least {min} argument{}, got {given}", if min == 1 { "" } else { "s" })
    } else {
        format!("{name} expected at most {max} argument{}, got {given}", if max == 1 { "" } else { "s" })
    };
    Err(ExecError::type_error(message))
}

/// Remove and return a keyword argument.
pub(crate) fn kwarg(kwargs: &mut Kwargs, key: &str) -> Option<Value> {
    let i = kwargs.iter().position(|(k, _)| k == key)?;
    Some(kwargs.remove(i).1)
}

/// Fail on any keyword argument left unconsumed.
pub(crate) fn no_kwargs(name: &str, kwargs: &Kwargs) -> Result<(), ExecError> {
    match kwargs.first() {
        Some((key, _)) => Err(ExecError::type_error(format!(
            "'{key}' is an invalid keyword argument for {name}()"
        ))),
        None => Ok(()),
    }
}

pub(crate) fn expect_int(value: &Value) -> Result<i64, ExecError> {
    value.as_int().ok_or_else(|| {
        ExecError::type_error(format!(
            "'{}' object cannot be interpreted as an integer",
            value.type_name()
        ))
    })
}

pub(crate) fn expect_str<'a>(name: &str, value: &'a Value) -> Result<&'a str, ExecError> {
    value.as_str().ok_or_else(|| {
        ExecError::type_error(format!("{name}() argument must be str, not {}", value.type_name()))
    })
}

/// Optional argument at `i`, treating `None` as absent.
fn arg(args: &[Value], i: usize) -> Option<&Value> {
    args.get(i).filter(|v| !v.is_none())
}

// ── Dispatch ────────────────────────────────────────────────────────────

pub(crate) async fn call(
    machine: &Machine,
    builtin: Builtin,
    args: Vec<Value>,
    mut kwargs: Kwargs,
) -> Result<Value, ExecError> {
    let name = builtin.name();
    match builtin {
        Builtin::Print => return print(machine, args, kwargs).await,
        Builtin::Min => return extremum(machine, "min", args, kwargs, Ordering::Less).await,
        Builtin::Max => return extremum(machine, "max", args, kwargs, Ordering::Greater).await,
        Builtin::Sorted => {
            arity(name, &args, 1, 1)?;
            let key = kwarg(&mut kwargs, "key").filter(|k| !k.is_none());
            let reverse = kwarg(&mut kwargs, "reverse").is_some_and(|r| r.is_truthy());
            no_kwargs(name, &kwargs)?;
            let items = iterate(&args[0])?.collect();
            return Ok(Value::list(sort_values(machine, items, key, reverse).await?));
        }
        Builtin::Map => {
            no_kwargs(name, &kwargs)?;
            if args.len() < 2 {
                return Err(ExecError::type_error("map() must have at least two arguments."));
            }
            let func = args[0].clone();
            let columns = columns(&args[1..])?;
            let mut out = Vec::with_capacity(columns.len());
            for row in columns {
                out.push(machine.call(func.clone(), row, Vec::new()).await?);
            }
            return Ok(Value::list(out));
        }
        Builtin::Filter => {
            no_kwargs(name, &kwargs)?;
            arity(name, &args, 2, 2)?;
            let mut out = Vec::new();
            for item in iterate(&args[1])? {
                let keep = match &args[0] {
                    Value::None => item.is_truthy(),
                    func => machine.call(func.clone(), vec![item.clone()], Vec::new()).await?.is_truthy(),
                };
                if keep {
                    out.push(item);
                }
            }
            return Ok(Value::list(out));
        }
        Builtin::Input => {
            no_kwargs(name, &kwargs)?;
            arity(name, &args, 0, 1)?;
            if let Some(prompt) = args.first() {
                machine.write_stream(Stream::Stdout, to_str(prompt)).await?;
            }
            return Err(ExecError::new(ExcType::EOFError, "EOF when reading a line"));
        }
        _ => {}
    }

    let start = match builtin {
        Builtin::Sum | Builtin::Enumerate => kwarg(&mut kwargs, "start"),
        _ => None,
    };
    if builtin != Builtin::Dict {
        no_kwargs(name, &kwargs)?;
    }
    call_sync(builtin, args, kwargs, start)
}

/// Builtins that never call back into the interpreter.
fn call_sync(
    builtin: Builtin,
    args: Vec<Value>,
    kwargs: Kwargs,
    start: Option<Value>,
) -> Result<Value, ExecError> {
    let name = builtin.name();
    match builtin {
        Builtin::Len => {
            arity(name, &args, 1, 1)?;
            let n = match &args[0] {
                Value::Str(s) => s.chars().count(),
                Value::List(items) => items.lock().len(),
                Value::Tuple(items) => items.len(),
                Value::Dict(d) => d.lock().len(),
                Value::Set(s) => s.lock().len(),
                Value::Range(r) => r.len(),
                other => {
                    return Err(ExecError::type_error(format!(
                        "object of type '{}' has no len()",
                        other.type_name()
                    )))
                }
            };
            Ok(Value::Int(n as i64))
        }
        Builtin::Range => {
            arity(name, &args, 1, 3)?;
            let ints = args.iter().map(expect_int).collect::<Result<Vec<_>, _>>()?;
            let (start, stop, step) = match ints.as_slice() {
                [stop] => (0, *stop, 1),
                [start, stop] => (*start, *stop, 1),
                [start, stop, step] => (*start, *stop, *step),
                _ => (0, 0, 1),
            };
            if step == 0 {
                return Err(ExecError::value_error("range() arg 3 must not be zero"));
            }
            Ok(Value::Range(Range { start, stop, step }))
        }
        Builtin::Str => {
            arity(name, &args, 0, 1)?;
            Ok(Value::str(args.first().map(to_str).unwrap_or_default()))
        }
        Builtin::Repr => {
            arity(name, &args, 1, 1)?;
            Ok(Value::str(repr(&args[0])))
        }
        Builtin::Int => {
            arity(name, &args, 0, 2)?;
            match args.as_slice() {
                [] => Ok(Value::Int(0)),
                [value] => to_int(value, None),
                [value, base] => to_int(value, Some(expect_int(base)?)),
                _ => Ok(Value::Int(0)),
            }
        }
        Builtin::Float => {
            arity(name, &args, 0, 1)?;
            match args.first() {
                None => Ok(Value::Float(0.0)),
                Some(value) => to_float(value).map(Value::Float),
            }
        }
        Builtin::Bool => {
            arity(name, &args, 0, 1)?;
            Ok(Value::Bool(args.first().is_some_and(Value::is_truthy)))
        }
        Builtin::List => {
            arity(name, &args, 0, 1)?;
            let items = match args.first() {
                Some(it) => iterate(it)?.collect(),
                None => Vec::new(),
            };
            Ok(Value::list(items))
        }
        Builtin::Tuple => {
            arity(name, &args, 0, 1)?;
            match args.first() {
                Some(Value::Tuple(t)) => Ok(Value::Tuple(t.clone())),
                Some(it) => Ok(Value::tuple(iterate(it)?.collect())),
                None => Ok(Value::tuple(Vec::new())),
            }
        }
        Builtin::Set => {
            arity(name, &args, 0, 1)?;
            let items: Vec<Value> = match args.first() {
                Some(it) => iterate(it)?.collect(),
                None => Vec::new(),
            };
            Ok(Value::set(Set::from_values(items)?))
        }
        Builtin::Dict => {
            arity(name, &args, 0, 1)?;
            let mut dict = Dict::new();
            if let Some(source) = args.first() {
                update_dict(&mut dict, source)?;
            }
            for (key, value) in kwargs {
                dict.insert(Value::str(key), value)?;
            }
            Ok(Value::dict(dict))
        }
        Builtin::Abs => {
            arity(name, &args, 1, 1)?;
            match &args[0] {
                Value::Float(f) => Ok(Value::Float(f.abs())),
                v => match v.as_int() {
                    Some(n) => n
                        .checked_abs()
                        .map(Value::Int)
                        .ok_or_else(|| ExecError::new(ExcType::OverflowError, "integer overflow")),
                    None => Err(ExecError::type_error(format!(
                        "bad operand type for abs(): '{}'",
                        v.type_name()
                    ))),
                },
            }
        }
        Builtin::Sum => {
            arity(name, &args, 1, 2)?;
            let mut total = start.or_else(|| args.get(1).cloned()).unwrap_or(Value::Int(0));
            if matches!(total, Value::Str(_)) {
                return Err(ExecError::type_error(
                    "sum() can't sum strings [use ''.join(seq) instead]",
                ));
            }
            for item in iterate(&args[0])? {
                total = ops::binary(BinOp::Add, &total, &item)?;
            }
            Ok(total)
        }
        Builtin::Reversed => {
            arity(name, &args, 1, 1)?;
            if matches!(args[0], Value::Set(_)) {
                return Err(ExecError::type_error("'set' object is not reversible"));
            }
            let mut items: Vec<Value> = iterate(&args[0])?.collect();
            items.reverse();
            Ok(Value::list(items))
        }
        Builtin::Enumerate => {
            arity(name, &args, 1, 2)?;
            let start = match start.as_ref().or(args.get(1)) {
                Some(v) => expect_int(v)?,
                None => 0,
            };
            let items = iterate(&args[0])?
                .enumerate()
                .map(|(i, item)| Value::tuple(vec![Value::Int(start + i as i64), item]))
                .collect();
            Ok(Value::list(items))
        }
        Builtin::Zip => Ok(Value::list(columns(&args)?.into_iter().map(Value::tuple).collect())),
        Builtin::Any => {
            arity(name, &args, 1, 1)?;
            Ok(Value::Bool(iterate(&args[0])?.any(|v| v.is_truthy())))
        }
        Builtin::All => {
            arity(name, &args, 1, 1)?;
            Ok(Value::Bool(iterate(&args[0])?.all(|v| v.is_truthy())))
        }
        Builtin::Round => {
            arity(name, &args, 1, 2)?;
            round(&args[0], arg(&args, 1))
        }
        Builtin::Type => {
            arity(name, &args, 1, 1)?;
            Ok(type_of(&args[0]))
        }
        Builtin::Isinstance => {
            arity(name, &args, 2, 2)?;
            is_instance(&args[0], &args[1]).map(Value::Bool)
        }
        Builtin::Callable => {
            arity(name, &args, 1, 1)?;
            let callable = match &args[0] {
                Value::Function(_) | Value::BoundMethod(_) | Value::Host(_) | Value::ExceptionType(_) => true,
                Value::Builtin(b) => !matches!(b, Builtin::Class(_)),
                _ => false,
            };
            Ok(Value::Bool(callable))
        }
        Builtin::Hash => {
            arity(name, &args, 1, 1)?;
            match HashKey::of(&args[0])? {
                HashKey::Int(n) => Ok(Value::Int(n)),
                key => {
                    let mut hasher = DefaultHasher::new();
                    key.hash(&mut hasher);
                    Ok(Value::Int(hasher.finish() as i64))
                }
            }
        }
        Builtin::Ord => {
            arity(name, &args, 1, 1)?;
            let s = expect_str(name, &args[0])?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Int(c as i64)),
                _ => Err(ExecError::type_error(format!(
                    "ord() expected a character, but string of length {} found",
                    s.chars().count()
                ))),
            }
        }
        Builtin::Chr => {
            arity(name, &args, 1, 1)?;
            let n = expect_int(&args[0])?;
            u32::try_from(n)
                .ok()
                .and_then(char::from_u32)
                .map(|c| Value::str(c.to_string()))
                .ok_or_else(|| ExecError::value_error("chr() arg not in range(0x110000)"))
        }
        Builtin::Divmod => {
            arity(name, &args, 2, 2)?;
            let q = ops::binary(BinOp::FloorDiv, &args[0], &args[1])?;
            let r = ops::binary(BinOp::Mod, &args[0], &args[1])?;
            Ok(Value::tuple(vec![q, r]))
        }
        Builtin::Pow => {
            arity(name, &args, 2, 3)?;
            match arg(&args, 2) {
                None => ops::binary(BinOp::Pow, &args[0], &args[1]),
                Some(modulus) => mod_pow(expect_int(&args[0])?, expect_int(&args[1])?, expect_int(modulus)?),
            }
        }
        Builtin::Hex | Builtin::Oct | Builtin::Bin => {
            arity(name, &args, 1, 1)?;
            let n = expect_int(&args[0])?;
            let sign = if n < 0 { "-" } else { "" };
            let abs = n.unsigned_abs();
            let digits = match builtin {
                Builtin::Hex => format!("0x{abs:x}"),
                Builtin::Oct => format!("0o{abs:o}"),
                _ => format!("0b{abs:b}"),
            };
            Ok(Value::str(format!("{sign}{digits}")))
        }
        Builtin::Class(class) => Err(ExecError::type_error(format!("cannot create '{class}' instances"))),
        Builtin::Print
        | Builtin::Min
        | Builtin::Max
        | Builtin::Sorted
        | Builtin::Map
        | Builtin::Filter
        | Builtin::Input => Err(ExecError::new(
            ExcType::RuntimeError,
            format!("{name}() dispatched out of order"),
        )),
    }
}

// ── Implementations ─────────────────────────────────────────────────────

async fn print(machine: &Machine, args: Vec<Value>, mut kwargs: Kwargs) -> Result<Value, ExecError> {
    let text_option = |kwargs: &mut Kwargs, key: &str, default: &str| match kwarg(kwargs, key) {
        None | Some(Value::None) => Ok(default.to_string()),
        Some(Value::Str(s)) => Ok(s.to_string()),
        Some(other) => Err(ExecError::type_error(format!(
            "{key} must be None or a string, not {}",
            other.type_name()
        ))),
    };
    let sep = text_option(&mut kwargs, "sep", " ")?;
    let end = text_option(&mut kwargs, "end", "\n")?;
    let stream = match kwarg(&mut kwargs, "file") {
        None | Some(Value::None) => Stream::Stdout,
        Some(Value::Stream(stream)) => stream,
        Some(other) => {
            return Err(ExecError::new(
                ExcType::AttributeError,
                format!("'{}' object has no attribute 'write'", other.type_name()),
            ))
        }
    };
    kwarg(&mut kwargs, "flush");
    no_kwargs("print", &kwargs)?;

    let mut text = args.iter().map(to_str).collect::<Vec<_>>().join(&sep);
    text.push_str(&end);
    machine.write_stream(stream, text).await?;
    Ok(Value::None)
}

impl Machine {
    /// Send text to the sink bound to the stream's global; unbound sinks
    /// discard it.
    pub(crate) async fn write_stream(&self, stream: Stream, text: String) -> Result<(), ExecError> {
        let sink = self.globals.lock().get(stream.sink_global()).cloned();
        if let Some(sink) = sink {
            let result = self.call(sink, vec![Value::str(text)], Vec::new()).await?;
            if let Value::Awaitable(_) = result {
                self.await_value(result).await?;
            }
        }
        Ok(())
    }
}

async fn extremum(
    machine: &Machine,
    name: &str,
    args: Vec<Value>,
    mut kwargs: Kwargs,
    want: Ordering,
) -> Result<Value, ExecError> {
    let key = kwarg(&mut kwargs, "key").filter(|k| !k.is_none());
    let default = kwarg(&mut kwargs, "default");
    no_kwargs(name, &kwargs)?;
    if args.is_empty() {
        return Err(ExecError::type_error(format!("{name} expected at least 1 argument, got 0")));
    }
    let items: Vec<Value> = if args.len() == 1 { iterate(&args[0])?.collect() } else { args };
    let op = if want == Ordering::Less { CmpOp::Lt } else { CmpOp::Gt };

    let mut best: Option<(Value, Value)> = None;
    for item in items {
        let k = match &key {
            Some(key) => machine.call(key.clone(), vec![item.clone()], Vec::new()).await?,
            None => item.clone(),
        };
        let replace = match &best {
            None => true,
            Some((_, best_key)) => ops::order(op, &k, best_key)? == want,
        };
        if replace {
            best = Some((item, k));
        }
    }
    match (best, default) {
        (Some((item, _)), _) => Ok(item),
        (None, Some(default)) => Ok(default),
        (None, None) => Err(ExecError::value_error(format!("{name}() arg is an empty sequence"))),
    }
}

/// Stable sort, optionally by key; `reverse` keeps equal items in order.
pub(crate) async fn sort_values(
    machine: &Machine,
    items: Vec<Value>,
    key: Option<Value>,
    reverse: bool,
) -> Result<Vec<Value>, ExecError> {
    let mut keyed = Vec::with_capacity(items.len());
    for item in items {
        let k = match &key {
            Some(key) => machine.call(key.clone(), vec![item.clone()], Vec::new()).await?,
            None => item.clone(),
        };
        keyed.push((k, item));
    }
    let mut error = None;
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = ops::order(CmpOp::Lt, a, b).unwrap_or_else(|e| {
            error.get_or_insert(e);
            Ordering::Equal
        });
        if reverse { ordering.reverse() } else { ordering }
    });
    match error {
        Some(err) => Err(err),
        None => Ok(keyed.into_iter().map(|(_, item)| item).collect()),
    }
}

/// Rows of a zip over `iterables`, truncated to the shortest.
fn columns(iterables: &[Value]) -> Result<Vec<Vec<Value>>, ExecError> {
    let lists = iterables
        .iter()
        .map(|it| iterate(it).map(|items| items.collect::<Vec<_>>()))
        .collect::<Result<Vec<_>, _>>()?;
    let len = lists.iter().map(Vec::len).min().unwrap_or(0);
    Ok((0..len).map(|i| lists.iter().map(|l| l[i].clone()).collect()).collect())
}

/// Merge a mapping or an iterable of pairs into `dict`.
pub(crate) fn update_dict(dict: &mut Dict, source: &Value) -> Result<(), ExecError> {
    if let Value::Dict(other) = source {
        let items = other.lock().items();
        for (k, v) in items {
            dict.insert(k, v)?;
        }
        return Ok(());
    }
    for (i, pair) in iterate(source)?.enumerate() {
        let items: Vec<Value> = iterate(&pair)
            .map_err(|_| {
                ExecError::type_error(format!(
                    "cannot convert dictionary update sequence element #{i} to a sequence"
                ))
            })?
            .collect();
        let [key, value] = <[Value; 2]>::try_from(items).map_err(|items| {
            ExecError::value_error(format!(
                "dictionary update sequence element #{i} has length {}; 2 is required",
                items.len()
            ))
        })?;
        dict.insert(key, value)?;
    }
    Ok(())
}

pub(crate) fn type_of(value: &Value) -> Value {
    let builtin = match value {
        Value::Bool(_) => Builtin::Bool,
        Value::Int(_) => Builtin::Int,
        Value::Float(_) => Builtin::Float,
        Value::Str(_) => Builtin::Str,
        Value::List(_) => Builtin::List,
        Value::Tuple(_) => Builtin::Tuple,
        Value::Dict(_) => Builtin::Dict,
        Value::Set(_) => Builtin::Set,
        Value::Range(_) => Builtin::Range,
        Value::Exception(exc) => return Value::ExceptionType(exc.kind),
        Value::ExceptionType(_) => Builtin::Type,
        Value::Builtin(b) if b.is_type() => Builtin::Type,
        other => Builtin::Class(other.type_name()),
    };
    Value::Builtin(builtin)
}

fn is_instance(value: &Value, class: &Value) -> Result<bool, ExecError> {
    match class {
        Value::Tuple(classes) => {
            for class in classes.iter() {
                if is_instance(value, class)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Value::ExceptionType(kind) => {
            Ok(matches!(value, Value::Exception(exc) if exc.kind.is_subclass_of(*kind)))
        }
        Value::Builtin(Builtin::Int) => Ok(matches!(value, Value::Int(_) | Value::Bool(_))),
        Value::Builtin(b) if b.is_type() => Ok(ops::equals(&type_of(value), class)),
        _ => Err(ExecError::type_error(
            "isinstance() arg 2 must be a type, a tuple of types, or a union",
        )),
    }
}

fn to_int(value: &Value, base: Option<i64>) -> Result<Value, ExecError> {
    match (value, base) {
        (Value::Str(s), base) => parse_int(s, base.unwrap_or(10)).map(Value::Int),
        (Value::Float(f), None) => float_to_int(*f).map(Value::Int),
        (v, None) if v.as_int().is_some() => Ok(Value::Int(v.as_int().unwrap_or_default())),
        (_, Some(_)) => Err(ExecError::type_error("int() can't convert non-string with explicit base")),
        (other, None) => Err(ExecError::type_error(format!(
            "int() argument must be a string, a bytes-like object or a real number, not '{}'",
            other.type_name()
        ))),
    }
}

pub(crate) fn float_to_int(f: f64) -> Result<i64, ExecError> {
    if f.is_nan() {
        return Err(ExecError::value_error("cannot convert float NaN to integer"));
    }
    if f.is_infinite() {
        return Err(ExecError::new(ExcType::OverflowError, "cannot convert float infinity to integer"));
    }
    let t = f.trunc();
    if t < i64::MIN as f64 || t >= i64::MAX as f64 {
        return Err(ExecError::new(ExcType::OverflowError, "integer overflow"));
    }
    Ok(t as i64)
}

fn parse_int(text: &str, base: i64) -> Result<i64, ExecError> {
    let invalid = || {
        ExecError::value_error(format!(
            "invalid literal for int() with base {base}: {}",
            super::format::str_repr(text)
        ))
    };
    if base != 0 && !(2..=36).contains(&base) {
        return Err(ExecError::value_error("int() base must be >= 2 and <= 36, or 0"));
    }
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let lower = digits.to_ascii_lowercase();
    let (radix, digits, prefixed) = match (base, lower.get(..2)) {
        (0 | 16, Some("0x")) => (16, &lower[2..], true),
        (0 | 8, Some("0o")) => (8, &lower[2..], true),
        (0 | 2, Some("0b")) => (2, &lower[2..], true),
        (0, _) => (10, lower.as_str(), false),
        (b, _) => (b as u32, lower.as_str(), false),
    };
    let digits = if prefixed { digits.strip_prefix('_').unwrap_or(digits) } else { digits };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(invalid());
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    let magnitude = u64::from_str_radix(&cleaned, radix).map_err(|_| invalid())?;
    let value = if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    };
    value.ok_or_else(|| ExecError::new(ExcType::OverflowError, "integer overflow"))
}

pub(crate) fn to_float(value: &Value) -> Result<f64, ExecError> {
    match value {
        Value::Str(s) => {
            let trimmed = s.trim();
            let lower = trimmed.to_ascii_lowercase();
            let unsigned = lower.trim_start_matches(['+', '-']);
            let negative = lower.starts_with('-');
            let special = match unsigned {
                "inf" | "infinity" => Some(f64::INFINITY),
                "nan" => Some(f64::NAN),
                _ => None,
            };
            if let Some(f) = special {
                return Ok(if negative { -f } else { f });
            }
            let valid = !trimmed.is_empty()
                && !trimmed.starts_with('_')
                && !trimmed.ends_with('_')
                && !trimmed.contains("__")
                && unsigned.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | '+' | '-' | '_'));
            let cleaned: String = trimmed.chars().filter(|c| *c != '_').collect();
            match cleaned.parse::<f64>() {
                Ok(f) if valid => Ok(f),
                _ => Err(ExecError::value_error(format!(
                    "could not convert string to float: {}",
                    super::format::str_repr(s)
                ))),
            }
        }
        other => other.as_float().ok_or_else(|| {
            ExecError::type_error(format!(
                "float() argument must be a string or a real number, not '{}'",
                other.type_name()
            ))
        }),
    }
}

/// Round half to even.
pub(crate) fn round_half_even(x: f64) -> f64 {
    let rounded = x.round();
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        rounded
    }
}

fn round(value: &Value, ndigits: Option<&Value>) -> Result<Value, ExecError> {
    let ndigits = ndigits.map(expect_int).transpose()?;
    match (value, ndigits) {
        (Value::Float(f), None) => float_to_int(round_half_even(*f)).map(Value::Int),
        (Value::Float(f), Some(nd)) => {
            let nd = nd.clamp(-308, 308) as i32;
            let scale = 10f64.powi(nd);
            let scaled = f * scale;
            if !scaled.is_finite() {
                return Ok(Value::Float(*f));
            }
            Ok(Value::Float(round_half_even(scaled) / scale))
        }
        (v, nd) if v.as_int().is_some() => {
            let n = v.as_int().unwrap_or_default();
            match nd {
                Some(nd) if nd < 0 => {
                    let scale = 10f64.powi((-nd).min(18) as i32);
                    Ok(Value::Int((round_half_even(n as f64 / scale) * scale) as i64))
                }
                _ => Ok(Value::Int(n)),
            }
        }
        (other, _) => Err(ExecError::type_error(format!(
            "type {} doesn't define __round__ method",
            other.type_name()
        ))),
    }
}

fn mod_pow(base: i64, exp: i64, modulus: i64) -> Result<Value, ExecError> {
    if modulus == 0 {
        return Err(ExecError::value_error("pow() 3rd argument cannot be 0"));
    }
    if exp < 0 {
        return Err(ExecError::value_error("base is not invertible for the given modulus"));
    }
    let m = i128::from(modulus);
    let mut result: i128 = 1 % m;
    let mut b = i128::from(base).rem_euclid(m);
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        e >>= 1;
    }
    let result = if result != 0 && (result < 0) != (m < 0) { result + m } else { result };
    Ok(Value::Int(result as i64))
}
