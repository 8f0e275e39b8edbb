// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Splitting f-string bodies into literal text and replacement fields.

use super::Parser;
use crate::ast::{walk_expr, Expr, FStringPart, Fold};
use crate::parse_error::ParseError;
use crate::token::Span;

/// Split the (escape-processed) body of an f-string token.
///
/// Replacement fields are parsed as standalone expressions; every node in
/// them takes the span of the whole string token.
pub(super) fn split(body: &str, span: Span) -> Result<Vec<FStringPart>, ParseError> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = body.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        let next = chars.peek().map(|&(_, c)| c);
        match ch {
            '{' if next == Some('{') => {
                chars.next();
                literal.push('{');
            }
            '}' if next == Some('}') => {
                chars.next();
                literal.push('}');
            }
            '}' => return Err(error("single '}' is not allowed", span)),
            '{' => {
                let end = find_field_end(body, i + 1).ok_or_else(|| error("expecting '}'", span))?;
                let field = parse_field(&body[i + 1..end], span)?;
                if let Some(debug) = field.debug_text {
                    literal.push_str(&debug);
                }
                if !literal.is_empty() {
                    parts.push(FStringPart::Literal(std::mem::take(&mut literal)));
                }
                parts.push(field.part);
                while chars.peek().is_some_and(|&(j, _)| j <= end) {
                    chars.next();
                }
            }
            c => literal.push(c),
        }
    }

    if !literal.is_empty() {
        parts.push(FStringPart::Literal(literal));
    }
    Ok(parts)
}

struct Field {
    part: FStringPart,
    /// `x=` in `f"{x=}"`, emitted as literal text before the value.
    debug_text: Option<String>,
}

fn parse_field(text: &str, span: Span) -> Result<Field, ParseError> {
    let (expr_end, marker) = scan_top_level(text, |c, next| match c {
        '!' => next != Some('='),
        ':' => true,
        _ => false,
    });
    let mut expr_text = &text[..expr_end];
    let rest = &text[expr_end..];

    let mut debug_text = None;
    let trimmed = expr_text.trim_end();
    if trimmed.ends_with('=') && !["==", "!=", "<=", ">="].iter().any(|op| trimmed.ends_with(op)) {
        debug_text = Some(expr_text.to_string());
        expr_text = &trimmed[..trimmed.len() - 1];
    }

    let (conversion, format_spec) = match marker {
        Some('!') => {
            let mut rest_chars = rest[1..].chars();
            let conversion = rest_chars.next();
            if !matches!(conversion, Some('r' | 's' | 'a')) {
                return Err(error("invalid conversion character: expected 's', 'r', or 'a'", span));
            }
            let after = rest_chars.as_str();
            match after.strip_prefix(':') {
                Some(spec) => (conversion, Some(spec.to_string())),
                None if after.is_empty() => (conversion, None),
                None => return Err(error("expecting '}'", span)),
            }
        }
        Some(_) => (None, Some(rest[1..].to_string())),
        None => (None, None),
    };

    if format_spec.as_deref().is_some_and(|s| s.contains('{')) {
        return Err(ParseError::Unsupported {
            feature: "nested replacement fields in a format spec".to_string(),
            span,
        });
    }
    if expr_text.trim().is_empty() {
        return Err(error("valid expression required before '}'", span));
    }

    let value = Parser::parse_expression(expr_text.trim()).map_err(|e| match e {
        ParseError::Unsupported { feature, .. } => ParseError::Unsupported { feature, span },
        other => error(&other.to_string(), span),
    })?;
    let value = Respan(span).fold_expr(value);

    let conversion = match (conversion, &debug_text, &format_spec) {
        (None, Some(_), None) => Some('r'),
        (conversion, _, _) => conversion,
    };

    Ok(Field {
        part: FStringPart::Field { value: Box::new(value), conversion, format_spec },
        debug_text,
    })
}

/// Byte index of the `}` closing a field that starts at `from`.
fn find_field_end(body: &str, from: usize) -> Option<usize> {
    let (end, marker) = scan_top_level(&body[from..], |c, _| c == '}');
    marker.map(|_| from + end)
}

/// Find the first top-level character (outside brackets and quotes) for
/// which `stop` returns true. Returns its index and the character, or
/// `(text.len(), None)`.
fn scan_top_level(text: &str, stop: impl Fn(char, Option<char>) -> bool) -> (usize, Option<char>) {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' if depth > 0 => depth -= 1,
            _ if depth == 0 && stop(c, chars.peek().map(|&(_, n)| n)) => return (i, Some(c)),
            _ => {}
        }
    }
    (text.len(), None)
}

fn error(message: &str, span: Span) -> ParseError {
    ParseError::InvalidSyntax { message: format!("f-string: {message}"), span }
}

/// Point every node of a field expression at the enclosing string token.
struct Respan(Span);

impl Fold for Respan {
    fn fold_expr(&mut self, expr: Expr) -> Expr {
        let mut expr = walk_expr(self, expr);
        expr.span = self.0;
        expr
    }
}
