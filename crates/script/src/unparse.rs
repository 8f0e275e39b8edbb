// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Regenerate source text from a syntax tree.
//!
//! Output is canonical rather than faithful: four-space indentation,
//! single-quoted strings where possible, and only the parentheses that
//! precedence requires. Re-parsing the output yields an equivalent tree.

use std::fmt::Write;

use crate::ast::*;
use crate::exec::{float_repr, str_repr};

/// Binding strength, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Tuple,
    Test,
    Or,
    And,
    Not,
    Cmp,
    Arith,
    Term,
    Factor,
    Power,
    Await,
    Atom,
}

impl Prec {
    fn next(self) -> Prec {
        match self {
            Prec::Tuple => Prec::Test,
            Prec::Test => Prec::Or,
            Prec::Or => Prec::And,
            Prec::And => Prec::Not,
            Prec::Not => Prec::Cmp,
            Prec::Cmp => Prec::Arith,
            Prec::Arith => Prec::Term,
            Prec::Term => Prec::Factor,
            Prec::Factor => Prec::Power,
            Prec::Power => Prec::Await,
            Prec::Await | Prec::Atom => Prec::Atom,
        }
    }
}

fn binop_prec(op: BinOp) -> Prec {
    match op {
        BinOp::Add | BinOp::Sub => Prec::Arith,
        BinOp::Mul | BinOp::Div | BinOp::FloorDiv | BinOp::Mod => Prec::Term,
        BinOp::Pow => Prec::Power,
    }
}

/// Render a module as source text, one statement per line.
pub fn unparse(module: &Module) -> String {
    let mut out = Unparser::default();
    out.body(&module.body);
    out.finish()
}

/// Render a single expression.
pub fn unparse_expr(expr: &Expr) -> String {
    let mut out = Unparser::default();
    out.expr(expr, Prec::Tuple);
    out.finish()
}

#[derive(Default)]
struct Unparser {
    out: String,
    indent: usize,
}

impl Unparser {
    fn finish(self) -> String {
        self.out
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Start a new line at the current indentation.
    fn line(&mut self) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    fn body(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    /// `:` followed by an indented block; empty blocks become `pass`.
    fn block(&mut self, stmts: &[Stmt]) {
        self.push(":");
        self.indent += 1;
        if stmts.is_empty() {
            self.line();
            self.push("pass");
        } else {
            self.body(stmts);
        }
        self.indent -= 1;
    }

    fn else_block(&mut self, orelse: &[Stmt]) {
        if !orelse.is_empty() {
            self.line();
            self.push("else");
            self.block(orelse);
        }
    }

    // ── Statements ──────────────────────────────────────────────────────

    fn stmt(&mut self, stmt: &Stmt) {
        self.line();
        match &stmt.kind {
            StmtKind::Expr(value) => self.expr(value, Prec::Tuple),
            StmtKind::Assign { targets, value } => {
                for target in targets {
                    self.expr(target, Prec::Tuple);
                    self.push(" = ");
                }
                self.expr(value, Prec::Tuple);
            }
            StmtKind::AugAssign { target, op, value } => {
                self.expr(target, Prec::Tuple);
                let _ = write!(self.out, " {}= ", op.symbol());
                self.expr(value, Prec::Tuple);
            }
            StmtKind::AnnAssign { target, annotation, value } => {
                self.expr(target, Prec::Atom);
                self.push(": ");
                self.expr(annotation, Prec::Test);
                if let Some(value) = value {
                    self.push(" = ");
                    self.expr(value, Prec::Tuple);
                }
            }
            StmtKind::If { test, body, orelse } => self.if_chain("if", test, body, orelse),
            StmtKind::While { test, body, orelse } => {
                self.push("while ");
                self.expr(test, Prec::Test);
                self.block(body);
                self.else_block(orelse);
            }
            StmtKind::For { target, iter, body, orelse } => {
                self.push("for ");
                self.expr(target, Prec::Tuple);
                self.push(" in ");
                self.expr(iter, Prec::Tuple);
                self.block(body);
                self.else_block(orelse);
            }
            StmtKind::Break => self.push("break"),
            StmtKind::Continue => self.push("continue"),
            StmtKind::Pass => self.push("pass"),
            StmtKind::FunctionDef(def) => self.function_def(def),
            StmtKind::Return(value) => {
                self.push("return");
                if let Some(value) = value {
                    self.push(" ");
                    self.expr(value, Prec::Tuple);
                }
            }
            StmtKind::Raise(exc) => {
                self.push("raise");
                if let Some(exc) = exc {
                    self.push(" ");
                    self.expr(exc, Prec::Test);
                }
            }
            StmtKind::Try(t) => self.try_stmt(t),
            StmtKind::Assert { test, msg } => {
                self.push("assert ");
                self.expr(test, Prec::Test);
                if let Some(msg) = msg {
                    self.push(", ");
                    self.expr(msg, Prec::Test);
                }
            }
            StmtKind::Import(aliases) => {
                self.push("import ");
                let rendered: Vec<String> = aliases
                    .iter()
                    .map(|a| match &a.asname {
                        Some(asname) => format!("{} as {asname}", a.name),
                        None => a.name.clone(),
                    })
                    .collect();
                self.push(&rendered.join(", "));
            }
            StmtKind::Global(names) => {
                self.push("global ");
                self.push(&names.join(", "));
            }
        }
    }

    /// `if`/`elif` chains: an `else` holding a lone `if` becomes `elif`.
    fn if_chain(&mut self, keyword: &str, test: &Expr, body: &[Stmt], orelse: &[Stmt]) {
        self.push(keyword);
        self.push(" ");
        self.expr(test, Prec::Test);
        self.block(body);
        if let [Stmt { kind: StmtKind::If { test, body, orelse }, .. }] = orelse {
            self.line();
            self.if_chain("elif", test, body, orelse);
        } else {
            self.else_block(orelse);
        }
    }

    fn function_def(&mut self, def: &FunctionDef) {
        if def.is_async {
            self.push("async ");
        }
        let _ = write!(self.out, "def {}(", def.name);
        self.params(&def.params);
        self.push(")");
        if let Some(returns) = &def.returns {
            self.push(" -> ");
            self.expr(returns, Prec::Test);
        }
        self.block(&def.body);
    }

    fn params(&mut self, params: &[Param]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push(&param.name);
            match (&param.annotation, &param.default) {
                (Some(annotation), default) => {
                    self.push(": ");
                    self.expr(annotation, Prec::Test);
                    if let Some(default) = default {
                        self.push(" = ");
                        self.expr(default, Prec::Test);
                    }
                }
                (None, Some(default)) => {
                    self.push("=");
                    self.expr(default, Prec::Test);
                }
                (None, None) => {}
            }
        }
    }

    fn try_stmt(&mut self, t: &Try) {
        self.push("try");
        self.block(&t.body);
        for handler in &t.handlers {
            self.line();
            self.push("except");
            if let Some(kind) = &handler.kind {
                self.push(" ");
                self.expr(kind, Prec::Test);
                if let Some(name) = &handler.name {
                    let _ = write!(self.out, " as {name}");
                }
            }
            self.block(&handler.body);
        }
        self.else_block(&t.orelse);
        if !t.finalbody.is_empty() {
            self.line();
            self.push("finally");
            self.block(&t.finalbody);
        }
    }

    // ── Expressions ─────────────────────────────────────────────────────

    /// Render `expr`, parenthesized when it binds looser than `level`.
    fn expr(&mut self, expr: &Expr, level: Prec) {
        match &expr.kind {
            ExprKind::Name(name) => self.push(name),
            ExprKind::Constant(constant) => self.constant(constant),
            ExprKind::FString(parts) => self.fstring(parts),
            ExprKind::List(items) => {
                self.push("[");
                self.items(items);
                self.push("]");
            }
            ExprKind::Tuple(items) => {
                let parens = items.is_empty() || level > Prec::Tuple;
                if parens {
                    self.push("(");
                }
                self.items(items);
                if items.len() == 1 {
                    self.push(",");
                }
                if parens {
                    self.push(")");
                }
            }
            ExprKind::Set(items) => {
                if items.is_empty() {
                    self.push("set()");
                } else {
                    self.push("{");
                    self.items(items);
                    self.push("}");
                }
            }
            ExprKind::Dict(pairs) => {
                self.push("{");
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.expr(key, Prec::Test);
                    self.push(": ");
                    self.expr(value, Prec::Test);
                }
                self.push("}");
            }
            ExprKind::ListComp { elt, generators } => {
                self.push("[");
                self.expr(elt, Prec::Test);
                self.generators(generators);
                self.push("]");
            }
            ExprKind::SetComp { elt, generators } => {
                self.push("{");
                self.expr(elt, Prec::Test);
                self.generators(generators);
                self.push("}");
            }
            ExprKind::DictComp { key, value, generators } => {
                self.push("{");
                self.expr(key, Prec::Test);
                self.push(": ");
                self.expr(value, Prec::Test);
                self.generators(generators);
                self.push("}");
            }
            ExprKind::GeneratorExp { elt, generators } => {
                self.push("(");
                self.expr(elt, Prec::Test);
                self.generators(generators);
                self.push(")");
            }
            ExprKind::Attribute { value, attr } => {
                self.primary(value);
                self.push(".");
                self.push(attr);
            }
            ExprKind::Subscript { value, index } => {
                self.primary(value);
                self.push("[");
                self.expr(index, Prec::Tuple);
                self.push("]");
            }
            ExprKind::Slice { lower, upper, step } => {
                if let Some(lower) = lower {
                    self.expr(lower, Prec::Test);
                }
                self.push(":");
                if let Some(upper) = upper {
                    self.expr(upper, Prec::Test);
                }
                if let Some(step) = step {
                    self.push(":");
                    self.expr(step, Prec::Test);
                }
            }
            ExprKind::Call { func, args, keywords } => {
                self.primary(func);
                self.push("(");
                self.items(args);
                for (i, keyword) in keywords.iter().enumerate() {
                    if i > 0 || !args.is_empty() {
                        self.push(", ");
                    }
                    let _ = write!(self.out, "{}=", keyword.arg);
                    self.expr(&keyword.value, Prec::Test);
                }
                self.push(")");
            }
            ExprKind::UnaryOp { op, operand } => {
                let (prec, text) = match op {
                    UnaryOp::Not => (Prec::Not, "not "),
                    UnaryOp::Neg => (Prec::Factor, "-"),
                    UnaryOp::Pos => (Prec::Factor, "+"),
                };
                self.wrap(level > prec, |u| {
                    u.push(text);
                    u.expr(operand, prec);
                });
            }
            ExprKind::BinOp { left, op, right } => {
                let prec = binop_prec(*op);
                // `**` is right-associative and its right side is a factor.
                let (left_level, right_level) = match op {
                    BinOp::Pow => (Prec::Await, Prec::Factor),
                    _ => (prec, prec.next()),
                };
                self.wrap(level > prec, |u| {
                    u.expr(left, left_level);
                    let _ = write!(u.out, " {} ", op.symbol());
                    u.expr(right, right_level);
                });
            }
            ExprKind::BoolOp { op, values } => {
                let (prec, text) = match op {
                    BoolOp::And => (Prec::And, " and "),
                    BoolOp::Or => (Prec::Or, " or "),
                };
                self.wrap(level > prec, |u| {
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            u.push(text);
                        }
                        u.expr(value, prec.next());
                    }
                });
            }
            ExprKind::Compare { left, ops, comparators } => {
                self.wrap(level > Prec::Cmp, |u| {
                    u.expr(left, Prec::Arith);
                    for (op, right) in ops.iter().zip(comparators) {
                        let _ = write!(u.out, " {} ", op.symbol());
                        u.expr(right, Prec::Arith);
                    }
                });
            }
            ExprKind::IfExp { test, body, orelse } => {
                self.wrap(level > Prec::Test, |u| {
                    u.expr(body, Prec::Or);
                    u.push(" if ");
                    u.expr(test, Prec::Or);
                    u.push(" else ");
                    u.expr(orelse, Prec::Test);
                });
            }
            ExprKind::Lambda { params, body } => {
                self.wrap(level > Prec::Test, |u| {
                    u.push("lambda");
                    if !params.is_empty() {
                        u.push(" ");
                        u.params(params);
                    }
                    u.push(": ");
                    u.expr(body, Prec::Test);
                });
            }
            ExprKind::Await(value) => {
                self.wrap(level > Prec::Await, |u| {
                    u.push("await ");
                    u.expr(value, Prec::Atom);
                });
            }
        }
    }

    /// The value of an attribute, subscript or call.
    fn primary(&mut self, value: &Expr) {
        // `1.real` would lex as a float.
        if matches!(value.kind, ExprKind::Constant(Constant::Int(_))) {
            self.wrap(true, |u| u.expr(value, Prec::Atom));
        } else {
            self.expr(value, Prec::Atom);
        }
    }

    fn wrap(&mut self, parens: bool, render: impl FnOnce(&mut Self)) {
        if parens {
            self.push("(");
        }
        render(self);
        if parens {
            self.push(")");
        }
    }

    fn items(&mut self, items: &[Expr]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(item, Prec::Test);
        }
    }

    fn generators(&mut self, generators: &[Comprehension]) {
        for generator in generators {
            self.push(" for ");
            self.expr(&generator.target, Prec::Tuple);
            self.push(" in ");
            self.expr(&generator.iter, Prec::Or);
            for cond in &generator.ifs {
                self.push(" if ");
                self.expr(cond, Prec::Or);
            }
        }
    }

    fn constant(&mut self, constant: &Constant) {
        match constant {
            Constant::None => self.push("None"),
            Constant::Bool(true) => self.push("True"),
            Constant::Bool(false) => self.push("False"),
            Constant::Int(n) => {
                let _ = write!(self.out, "{n}");
            }
            Constant::Float(f) if f.is_infinite() => self.push("1e309"),
            Constant::Float(f) => self.push(&float_repr(*f)),
            Constant::Str(s) => self.push(&str_repr(s)),
        }
    }

    /// f-strings pick the first quote style not used by any field.
    fn fstring(&mut self, parts: &[FStringPart]) {
        let fields: Vec<String> = parts
            .iter()
            .filter_map(|part| match part {
                FStringPart::Field { value, .. } => Some(unparse_field(value)),
                FStringPart::Literal(_) => None,
            })
            .collect();
        let quote = ["'", "\"", "'''", "\"\"\""]
            .into_iter()
            .find(|q| fields.iter().all(|f| !f.contains(q)))
            .unwrap_or("'");

        let mut fields = fields.into_iter();
        self.push("f");
        self.push(quote);
        for part in parts {
            match part {
                FStringPart::Literal(text) => self.fstring_literal(text, quote),
                FStringPart::Field { conversion, format_spec, .. } => {
                    let rendered = fields.next().unwrap_or_default();
                    self.push("{");
                    // `{{` would read as an escaped brace.
                    if rendered.starts_with('{') {
                        self.push(" ");
                    }
                    self.push(&rendered);
                    if let Some(conversion) = conversion {
                        let _ = write!(self.out, "!{conversion}");
                    }
                    if let Some(spec) = format_spec {
                        let _ = write!(self.out, ":{spec}");
                    }
                    self.push("}");
                }
            }
        }
        self.push(quote);
    }

    fn fstring_literal(&mut self, text: &str, quote: &str) {
        let quote_char = quote.chars().next().unwrap_or('\'');
        for c in text.chars() {
            match c {
                '{' => self.push("{{"),
                '}' => self.push("}}"),
                '\\' => self.push("\\\\"),
                '\n' => self.push("\\n"),
                '\r' => self.push("\\r"),
                '\t' => self.push("\\t"),
                c if c == quote_char => {
                    self.out.push('\\');
                    self.out.push(c);
                }
                c => self.out.push(c),
            }
        }
    }
}

/// Field expressions bind tighter than `test` so a top-level `:` from a
/// lambda or conditional cannot be mistaken for a format spec.
fn unparse_field(value: &Expr) -> String {
    let mut out = Unparser::default();
    out.expr(value, Prec::Or);
    out.finish()
}

#[cfg(test)]
#[path = "unparse_tests.rs"]
mod tests;
