// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `repr()`/`str()` rendering, format specs and `%` formatting.

use super::error::ExecError;
use super::ops::MAX_SEQUENCE_LEN;
use super::value::Value;

/// Containers nested deeper than this render as `...`.
const MAX_REPR_DEPTH: usize = 64;

/// `repr(value)`
pub fn repr(value: &Value) -> String {
    let mut out = String::new();
    write_repr(&mut out, value, 0);
    out
}

/// `str(value)`
pub fn to_str(value: &Value) -> String {
    match value {
        Value::Str(s) => s.to_string(),
        Value::Exception(exc) => exc.message(),
        other => repr(other),
    }
}

fn write_repr(out: &mut String, value: &Value, depth: usize) {
    if depth > MAX_REPR_DEPTH {
        out.push_str("...");
        return;
    }
    match value {
        Value::None => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Float(f) => out.push_str(&float_repr(*f)),
        Value::Str(s) => out.push_str(&str_repr(s)),
        Value::List(items) => {
            let items = items.lock().clone();
            write_seq(out, "[", "]", &items, depth);
        }
        Value::Tuple(items) => {
            if items.len() == 1 {
                out.push('(');
                write_repr(out, &items[0], depth + 1);
                out.push_str(",)");
            } else {
                write_seq(out, "(", ")", items, depth);
            }
        }
        Value::Set(set) => {
            let items = set.lock().values();
            if items.is_empty() {
                out.push_str("set()");
            } else {
                write_seq(out, "{", "}", &items, depth);
            }
        }
        Value::Dict(dict) => {
            let items = dict.lock().items();
            out.push('{');
            for (i, (k, v)) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(out, k, depth + 1);
                out.push_str(": ");
                write_repr(out, v, depth + 1);
            }
            out.push('}');
        }
        Value::Range(r) => {
            if r.step == 1 {
                out.push_str(&format!("range({}, {})", r.start, r.stop));
            } else {
                out.push_str(&format!("range({}, {}, {})", r.start, r.stop, r.step));
            }
        }
        Value::Function(f) => out.push_str(&format!("<function {}>", f.name())),
        Value::Builtin(b) if b.is_type() => out.push_str(&format!("<class '{}'>", b.name())),
        Value::Builtin(b) => out.push_str(&format!("<built-in function {}>", b.name())),
        Value::Host(h) => out.push_str(&format!("<built-in function {}>", h.name())),
        Value::BoundMethod(m) => out.push_str(&format!(
            "<built-in method {} of {} object>",
            m.name,
            m.receiver.type_name()
        )),
        Value::Awaitable(a) => out.push_str(&format!("<coroutine object {}>", a.name)),
        Value::ExceptionType(t) => out.push_str(&format!("<class '{}'>", t.name())),
        Value::Exception(exc) => {
            out.push_str(exc.kind.name());
            if exc.args.len() == 1 {
                out.push('(');
                write_repr(out, &exc.args[0], depth + 1);
                out.push(')');
            } else {
                write_seq(out, "(", ")", &exc.args, depth);
            }
        }
        Value::Module(m) => out.push_str(&format!("<module '{}' (built-in)>", m.name())),
        Value::Stream(s) => out.push_str(&format!(
            "<_io.TextIOWrapper name='{}' mode='w' encoding='utf-8'>",
            s.name()
        )),
    }
}

fn write_seq(out: &mut String, open: &str, close: &str, items: &[Value], depth: usize) {
    out.push_str(open);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_repr(out, item, depth + 1);
    }
    out.push_str(close);
}

/// Python's float repr: shortest round-trip digits, exponent form outside
/// `1e-4 <= |f| < 1e16`.
pub fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        return python_exponent(&format!("{f:e}"));
    }
    if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

/// Rewrite Rust's `1.5e-7` exponent style as Python's `1.5e-07`.
fn python_exponent(rust: &str) -> String {
    match rust.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => rust.to_string(),
    }
}

/// Quote a string the way Python's `repr` does.
pub fn str_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

// ── Format spec mini-language ───────────────────────────────────────────

#[derive(Debug, Default)]
struct FormatSpec {
    fill: Option<char>,
    align: Option<char>,
    sign: Option<char>,
    alternate: bool,
    width: usize,
    grouping: Option<char>,
    precision: Option<usize>,
    kind: Option<char>,
}

fn parse_spec(spec: &str) -> Result<FormatSpec, ExecError> {
    let chars: Vec<char> = spec.chars().collect();
    let mut out = FormatSpec::default();
    let mut i = 0;
    let is_align = |c: char| matches!(c, '<' | '>' | '^' | '=');

    if chars.len() >= 2 && is_align(chars[1]) {
        out.fill = Some(chars[0]);
        out.align = Some(chars[1]);
        i = 2;
    } else if chars.first().copied().is_some_and(is_align) {
        out.align = Some(chars[0]);
        i = 1;
    }
    if let Some(&c @ ('+' | '-' | ' ')) = chars.get(i) {
        out.sign = Some(c);
        i += 1;
    }
    if chars.get(i) == Some(&'#') {
        out.alternate = true;
        i += 1;
    }
    if chars.get(i) == Some(&'0') {
        if out.fill.is_none() {
            out.fill = Some('0');
            out.align.get_or_insert('=');
        }
        i += 1;
    }
    let start = i;
    while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
        i += 1;
    }
    if i > start {
        out.width = digits(&chars[start..i], spec)?;
    }
    if let Some(&c @ (',' | '_')) = chars.get(i) {
        out.grouping = Some(c);
        i += 1;
    }
    if chars.get(i) == Some(&'.') {
        i += 1;
        let start = i;
        while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
        }
        if i == start {
            return Err(ExecError::value_error("Format specifier missing precision"));
        }
        out.precision = Some(digits(&chars[start..i], spec)?);
    }
    if let Some(&c) = chars.get(i) {
        out.kind = Some(c);
        i += 1;
    }
    if i != chars.len() {
        return Err(ExecError::value_error("Invalid format specifier"));
    }
    Ok(out)
}

fn digits(chars: &[char], spec: &str) -> Result<usize, ExecError> {
    let n: usize = chars
        .iter()
        .collect::<String>()
        .parse()
        .map_err(|_| ExecError::value_error(format!("Invalid format specifier '{spec}'")))?;
    if n > MAX_SEQUENCE_LEN {
        return Err(ExecError::value_error("Too many decimal digits in format string"));
    }
    Ok(n)
}

/// `format(value, spec)`, as used by f-string fields and `str.format`.
pub fn format_value(value: &Value, spec: &str) -> Result<String, ExecError> {
    if spec.is_empty() {
        return Ok(to_str(value));
    }
    let spec = parse_spec(spec)?;
    let unknown = |code: char| {
        ExecError::value_error(format!(
            "Unknown format code '{code}' for object of type '{}'",
            value.type_name()
        ))
    };

    let (sign, body, numeric) = match (value, spec.kind) {
        (Value::Str(s), None | Some('s')) => {
            let text = match spec.precision {
                Some(p) => s.chars().take(p).collect(),
                None => s.to_string(),
            };
            (String::new(), text, false)
        }
        (Value::Str(_), Some(code)) => return Err(unknown(code)),
        (Value::Int(_) | Value::Bool(_), None | Some('d' | 'x' | 'X' | 'o' | 'b' | 'c')) => {
            let n = value.as_int().unwrap_or_default();
            let (sign, body) = format_int(n, &spec)?;
            (sign, body, true)
        }
        (Value::Int(_) | Value::Bool(_) | Value::Float(_), Some('f' | 'F' | 'e' | 'E' | 'g' | 'G' | '%'))
        | (Value::Float(_), None) => {
            let f = value.as_float().unwrap_or_default();
            let (sign, body) = format_float(f, &spec);
            (sign, body, true)
        }
        (_, None) => (String::new(), to_str(value), false),
        (_, Some(code)) => return Err(unknown(code)),
    };

    let sign = match (sign.as_str(), spec.sign) {
        ("-", _) => "-".to_string(),
        (_, Some('+')) if numeric => "+".to_string(),
        (_, Some(' ')) if numeric => " ".to_string(),
        _ => String::new(),
    };
    let default_align = if numeric { '>' } else { '<' };
    Ok(pad(&sign, &body, spec.fill.unwrap_or(' '), spec.align.unwrap_or(default_align), spec.width))
}

fn format_int(n: i64, spec: &FormatSpec) -> Result<(String, String), ExecError> {
    if spec.precision.is_some() {
        return Err(ExecError::value_error("Precision not allowed in integer format specifier"));
    }
    let sign = if n < 0 { "-" } else { "" }.to_string();
    let abs = n.unsigned_abs();
    let body = match spec.kind {
        Some('x') => prefixed(spec.alternate, "0x", format!("{abs:x}")),
        Some('X') => prefixed(spec.alternate, "0X", format!("{abs:X}")),
        Some('o') => prefixed(spec.alternate, "0o", format!("{abs:o}")),
        Some('b') => prefixed(spec.alternate, "0b", format!("{abs:b}")),
        Some('c') => {
            let c = u32::try_from(n)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| ExecError::new(super::ExcType::OverflowError, "%c arg not in range(0x110000)"))?;
            return Ok((String::new(), c.to_string()));
        }
        _ => group(&abs.to_string(), spec.grouping),
    };
    Ok((sign, body))
}

fn prefixed(alternate: bool, prefix: &str, digits: String) -> String {
    if alternate {
        format!("{prefix}{digits}")
    } else {
        digits
    }
}

fn format_float(f: f64, spec: &FormatSpec) -> (String, String) {
    let sign = if f.is_sign_negative() { "-" } else { "" };
    let abs = f.abs();
    if !abs.is_finite() {
        let text = if abs.is_nan() { "nan" } else { "inf" };
        let text = if matches!(spec.kind, Some('F' | 'E' | 'G')) { text.to_uppercase() } else { text.to_string() };
        return (sign.to_string(), text);
    }
    let body = match spec.kind {
        Some('f' | 'F') => fixed(abs, spec.precision.unwrap_or(6), spec.grouping),
        Some('%') => format!("{}%", fixed(abs * 100.0, spec.precision.unwrap_or(6), spec.grouping)),
        Some('e') => exponent(abs, spec.precision.unwrap_or(6)),
        Some('E') => exponent(abs, spec.precision.unwrap_or(6)).to_uppercase(),
        Some('g') => general(abs, spec.precision.unwrap_or(6), spec.alternate),
        Some('G') => general(abs, spec.precision.unwrap_or(6), spec.alternate).to_uppercase(),
        _ => match spec.precision {
            Some(p) => general(abs, p, spec.alternate),
            None => {
                let repr = float_repr(abs);
                match spec.grouping {
                    Some(sep) if !repr.contains('e') => {
                        let (int, frac) = repr.split_once('.').unwrap_or((&repr, ""));
                        let int = group(int, Some(sep));
                        if frac.is_empty() { int } else { format!("{int}.{frac}") }
                    }
                    _ => repr,
                }
            }
        },
    };
    (sign.to_string(), body)
}

fn fixed(abs: f64, precision: usize, grouping: Option<char>) -> String {
    let text = format!("{abs:.precision$}");
    match text.split_once('.') {
        Some((int, frac)) => format!("{}.{}", group(int, grouping), frac),
        None => group(&text, grouping),
    }
}

fn exponent(abs: f64, precision: usize) -> String {
    python_exponent(&format!("{abs:.precision$e}"))
}

/// The `g` presentation type.
fn general(abs: f64, precision: usize, alternate: bool) -> String {
    let precision = precision.max(1);
    if abs == 0.0 {
        return if alternate { format!("{:.*}", precision - 1, 0.0) } else { "0".to_string() };
    }
    let rounded = format!("{:.*e}", precision - 1, abs);
    let exp: i32 = rounded.split_once('e').and_then(|(_, e)| e.parse().ok()).unwrap_or(0);
    if exp < -4 || exp >= precision as i32 {
        let text = python_exponent(&rounded);
        if alternate {
            text
        } else {
            match text.split_once('e') {
                Some((mantissa, e)) => format!("{}e{}", trim_zeros(mantissa), e),
                None => text,
            }
        }
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        let text = format!("{abs:.decimals$}");
        if alternate { text } else { trim_zeros(&text).to_string() }
    }
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Insert a thousands separator into a run of digits.
fn group(digits: &str, sep: Option<char>) -> String {
    let Some(sep) = sep else {
        return digits.to_string();
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

fn pad(sign: &str, body: &str, fill: char, align: char, width: usize) -> String {
    let len = sign.chars().count() + body.chars().count();
    if len >= width {
        return format!("{sign}{body}");
    }
    let padding = width - len;
    let fill_n = |n: usize| std::iter::repeat(fill).take(n).collect::<String>();
    match align {
        '<' => format!("{sign}{body}{}", fill_n(padding)),
        '^' => format!("{}{sign}{body}{}", fill_n(padding / 2), fill_n(padding - padding / 2)),
        '=' => format!("{sign}{}{body}", fill_n(padding)),
        _ => format!("{}{sign}{body}", fill_n(padding)),
    }
}

// ── printf-style formatting ─────────────────────────────────────────────

/// `template % args`
pub fn percent_format(template: &str, args: &Value) -> Result<String, ExecError> {
    let args: Vec<Value> = match args {
        Value::Tuple(items) => items.to_vec(),
        other => vec![other.clone()],
    };
    let mut args = args.into_iter();
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let mut flags = String::new();
        while let Some(&f @ ('-' | '+' | ' ' | '0' | '#')) = chars.peek() {
            flags.push(f);
            chars.next();
        }
        let mut width = String::new();
        while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
            width.push(d);
            chars.next();
        }
        let mut precision = None;
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut p = String::new();
            while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                p.push(d);
                chars.next();
            }
            precision = Some(p);
        }
        let Some(code) = chars.next() else {
            return Err(ExecError::value_error("incomplete format"));
        };
        if code == '%' {
            out.push('%');
            continue;
        }

        let arg = args
            .next()
            .ok_or_else(|| ExecError::type_error("not enough arguments for format string"))?;
        let mut spec = String::new();
        let zero_pad = flags.contains('0') && !flags.contains('-') && code != 's' && code != 'r';
        if !width.is_empty() && !zero_pad {
            spec.push(if flags.contains('-') { '<' } else { '>' });
        }
        if flags.contains('+') {
            spec.push('+');
        } else if flags.contains(' ') {
            spec.push(' ');
        }
        if flags.contains('#') {
            spec.push('#');
        }
        if zero_pad {
            spec.push('0');
        }
        spec.push_str(&width);

        let text = match code {
            's' => format_value(&Value::str(to_str(&arg)), &with_precision(&spec, &precision, 's'))?,
            'r' | 'a' => format_value(&Value::str(repr(&arg)), &with_precision(&spec, &precision, 's'))?,
            'd' | 'i' | 'u' => {
                let n = match &arg {
                    Value::Float(f) => Value::Int(f.trunc() as i64),
                    Value::Int(_) | Value::Bool(_) => arg.clone(),
                    other => {
                        return Err(ExecError::type_error(format!(
                            "%{code} format: a real number is required, not {}",
                            other.type_name()
                        )))
                    }
                };
                format_value(&n, &format!("{spec}d"))?
            }
            'f' | 'F' | 'e' | 'E' | 'g' | 'G' => {
                if arg.as_float().is_none() {
                    return Err(ExecError::type_error(format!(
                        "must be real number, not {}",
                        arg.type_name()
                    )));
                }
                let p = precision.as_deref().unwrap_or("6");
                format_value(&arg, &format!("{spec}.{p}{code}"))?
            }
            'x' | 'X' | 'o' => {
                if arg.as_int().is_none() {
                    return Err(ExecError::type_error(format!(
                        "%{code} format: an integer is required, not {}",
                        arg.type_name()
                    )));
                }
                format_value(&arg, &format!("{spec}{code}"))?
            }
            'c' => match &arg {
                Value::Str(s) if s.chars().count() == 1 => s.to_string(),
                other => format_value(other, "c")?,
            },
            other => {
                return Err(ExecError::value_error(format!(
                    "unsupported format character '{other}'"
                )))
            }
        };
        out.push_str(&text);
    }

    if args.next().is_some() {
        return Err(ExecError::type_error("not all arguments converted during string formatting"));
    }
    Ok(out)
}

fn with_precision(spec: &str, precision: &Option<String>, code: char) -> String {
    match precision {
        Some(p) => format!("{spec}.{p}{code}"),
        None => format!("{spec}{code}"),
    }
}

#[cfg(test)]
#[path = "../exec_tests/format.rs"]
mod tests;
