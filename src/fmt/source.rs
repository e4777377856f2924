//! Pretty printer for Fissure source code
//!
//! This module provides Display implementations for the syntax tree. The
//! output is canonical: two spaces per block level, one statement per line,
//! and parentheses only where precedence requires them. Parsing the output
//! again yields a tree that formats identically.

use std::fmt::{self, Display};

use crate::ast::{
    MemberDeclaration, MessageHandlerDeclaration, Parameter, Program, StructDeclaration,
    expression::{
        BinOpKind, BinaryOp, BlockExpression, Expression, IfExpression, MessageCreation, UnaryOp,
        UnaryOpKind,
    },
    pattern::Pattern,
    statement::{Path, Statement},
    types::TypeExpression,
};

const INDENT: &str = "  ";

/// Loosest to tightest. `if` sits below everything else.
const PREC_IF: u8 = 0;
const PREC_APPLICATION: u8 = 1;
const PREC_UNARY: u8 = 9;
const PREC_PROPERTY: u8 = 10;

struct Formatter {
    buffer: String,
    indent_level: usize,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn at_line_start(&self) -> bool {
        self.buffer.is_empty() || self.buffer.ends_with('\n')
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
    }

    /// Text written at the start of a line is indented to the current level,
    /// so code following an indented block continues where it belongs.
    fn write_str(&mut self, s: &str) {
        if !s.is_empty() && self.at_line_start() {
            self.write_indent();
        }
        self.buffer.push_str(s);
    }

    fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    /// Ends the current line unless a nested block already did.
    fn end_line(&mut self) {
        if !self.at_line_start() {
            self.write_newline();
        }
    }

    fn finish(self) -> String {
        self.buffer
    }
}

fn render(f: &mut fmt::Formatter<'_>, body: impl FnOnce(&mut Formatter)) -> fmt::Result {
    let mut formatter = Formatter::new();
    body(&mut formatter);
    f.write_str(formatter.finish().trim_end_matches('\n'))
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        for (i, declaration) in self.struct_declarations.iter().enumerate() {
            if i > 0 {
                formatter.write_newline();
            }
            format_struct(declaration, &mut formatter);
        }
        write!(f, "{}", formatter.finish())
    }
}

impl Display for StructDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, |fmt| format_struct(self, fmt))
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, |fmt| format_statement(self, fmt))
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, |fmt| format_expression(self, fmt, PREC_IF))
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, |fmt| format_pattern(self, fmt))
    }
}

impl Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, |fmt| format_type(self, fmt))
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, |fmt| format_path(self, fmt))
    }
}

fn format_struct(declaration: &StructDeclaration, fmt: &mut Formatter) {
    fmt.write_str("struct ");
    fmt.write_str(&declaration.name);
    fmt.write_str(":");
    fmt.write_newline();

    fmt.indent();
    for member in &declaration.member_declarations {
        format_member(member, fmt);
    }
    for handler in &declaration.message_handler_declarations {
        format_handler(handler, fmt);
    }
    fmt.dedent();
}

fn format_member(member: &MemberDeclaration, fmt: &mut Formatter) {
    fmt.write_str(&member.name);
    fmt.write_str(" :: ");
    format_type(&member.type_expression, fmt);
    fmt.write_newline();
}

fn format_handler(handler: &MessageHandlerDeclaration, fmt: &mut Formatter) {
    fmt.write_str(&handler.name);
    fmt.write_str("(");
    for (i, parameter) in handler.parameters.iter().enumerate() {
        if i > 0 {
            fmt.write_str(", ");
        }
        format_parameter(parameter, fmt);
    }
    fmt.write_str(")");
    format_body(&handler.body, fmt);
}

fn format_parameter(parameter: &Parameter, fmt: &mut Formatter) {
    fmt.write_str(&parameter.name);
    if let Some(type_expression) = &parameter.type_expression {
        fmt.write_str(" :: ");
        format_type(type_expression, fmt);
    }
}

/// `:` followed by the statements one level deeper. Leaves the formatter at
/// the start of a fresh line.
fn format_body(body: &BlockExpression, fmt: &mut Formatter) {
    fmt.write_str(":");
    fmt.write_newline();
    fmt.indent();
    for statement in &body.statements {
        format_statement(statement, fmt);
    }
    fmt.dedent();
}

fn format_statement(statement: &Statement, fmt: &mut Formatter) {
    match statement {
        Statement::Let(binding) => {
            fmt.write_str("let ");
            format_pattern(&binding.pattern, fmt);
            fmt.write_str(" = ");
            format_expression(&binding.value, fmt, PREC_IF);
        }
        Statement::Assign(assign) => {
            format_path(&assign.path, fmt);
            fmt.write_str(" = ");
            format_expression(&assign.value, fmt, PREC_IF);
        }
        Statement::For(for_loop) => {
            fmt.write_str("for ");
            format_pattern(&for_loop.pattern, fmt);
            fmt.write_str(" in ");
            format_leading(&for_loop.iterable, fmt, PREC_IF);
            format_body(&for_loop.body, fmt);
        }
        Statement::While(while_loop) => {
            fmt.write_str("while ");
            format_leading(&while_loop.condition, fmt, PREC_IF);
            format_body(&while_loop.body, fmt);
        }
        Statement::Expression(statement) => {
            format_expression(&statement.expression, fmt, PREC_IF);
        }
    }
    fmt.end_line();
}

fn format_path(path: &Path, fmt: &mut Formatter) {
    match path {
        Path::Identifier(identifier) => fmt.write_str(&identifier.name),
        Path::Property(property) => {
            format_path(&property.inner, fmt);
            fmt.write_str(".");
            fmt.write_str(&property.name);
        }
    }
}

fn format_type(type_expression: &TypeExpression, fmt: &mut Formatter) {
    match type_expression {
        TypeExpression::Identifier(named) => {
            fmt.write_str(&named.name);
            if !named.type_arguments.is_empty() {
                fmt.write_str("<");
                for (i, argument) in named.type_arguments.iter().enumerate() {
                    if i > 0 {
                        fmt.write_str(", ");
                    }
                    format_type(argument, fmt);
                }
                fmt.write_str(">");
            }
        }
        TypeExpression::List(list) => {
            fmt.write_str("[");
            format_type(&list.inner, fmt);
            fmt.write_str("]");
        }
        TypeExpression::Tuple(tuple) => {
            fmt.write_str("(");
            for (i, inner) in tuple.inners.iter().enumerate() {
                if i > 0 {
                    fmt.write_str(", ");
                }
                format_type(inner, fmt);
            }
            if tuple.inners.len() == 1 {
                fmt.write_str(",");
            }
            fmt.write_str(")");
        }
        TypeExpression::Variadic(variadic) => {
            fmt.write_str("..");
            format_type(&variadic.inner, fmt);
        }
    }
}

fn format_pattern(pattern: &Pattern, fmt: &mut Formatter) {
    match pattern {
        Pattern::Identifier(identifier) => fmt.write_str(&identifier.name),
        Pattern::Ignore(_) => fmt.write_str("_"),
        Pattern::List(list) => {
            fmt.write_str("[");
            format_patterns(&list.patterns, fmt);
            fmt.write_str("]");
        }
        Pattern::Tuple(tuple) => {
            fmt.write_str("(");
            format_patterns(&tuple.patterns, fmt);
            if tuple.patterns.len() == 1 {
                fmt.write_str(",");
            }
            fmt.write_str(")");
        }
        Pattern::Variadic(variadic) => {
            fmt.write_str("..");
            if let Some(inner) = &variadic.inner {
                format_pattern(inner, fmt);
            }
        }
    }
}

fn format_patterns(patterns: &[Pattern], fmt: &mut Formatter) {
    for (i, pattern) in patterns.iter().enumerate() {
        if i > 0 {
            fmt.write_str(", ");
        }
        format_pattern(pattern, fmt);
    }
}

fn format_expression(expr: &Expression, fmt: &mut Formatter, precedence: u8) {
    match expr {
        Expression::Identifier(identifier) => fmt.write_str(&identifier.name),
        Expression::String(s) => {
            fmt.write_str("\"");
            fmt.write_str(&escape(&s.value, '"'));
            fmt.write_str("\"");
        }
        Expression::Int(int) => fmt.write_str(&int.value.to_string()),
        Expression::Float(float) => fmt.write_str(&float_literal(float.value)),
        Expression::Bool(b) => fmt.write_str(if b.value { "true" } else { "false" }),
        Expression::Char(c) => {
            fmt.write_str("'");
            fmt.write_str(&escape(&c.value.to_string(), '\''));
            fmt.write_str("'");
        }
        Expression::Tuple(tuple) => {
            fmt.write_str("(");
            format_arguments(&tuple.elements, fmt);
            if tuple.elements.len() == 1 {
                fmt.write_str(",");
            }
            fmt.write_str(")");
        }
        Expression::List(list) => {
            fmt.write_str("[");
            format_arguments(&list.elements, fmt);
            fmt.write_str("]");
        }
        Expression::Block(block) => {
            fmt.write_str("do");
            format_body(block, fmt);
        }
        Expression::ObjectCreation(creation) => {
            fmt.write_str("new ");
            format_type(&creation.type_expression, fmt);
        }
        Expression::MessageCreation(message) => format_message(message, fmt),
        Expression::PropertyAccess(access) => {
            parenthesize(fmt, precedence > PREC_PROPERTY, |fmt| {
                format_leading(&access.root, fmt, PREC_PROPERTY);
                fmt.write_str(".");
                fmt.write_str(&access.name);
            });
        }
        Expression::Unary(unop) => format_unary_op(unop, fmt, precedence),
        Expression::Binary(binop) => format_binary_op(binop, fmt, precedence),
        Expression::MessageApplication(application) => {
            parenthesize(fmt, precedence > PREC_APPLICATION, |fmt| {
                format_leading(&application.receiver, fmt, PREC_APPLICATION);
                fmt.write_str(" ");
                // `f -x` would read as a subtraction
                if starts_with_minus(&application.message) {
                    parenthesize(fmt, true, |fmt| {
                        format_expression(&application.message, fmt, PREC_IF)
                    });
                } else {
                    format_expression(&application.message, fmt, PREC_APPLICATION + 1);
                }
            });
        }
        Expression::If(if_expr) => {
            parenthesize(fmt, precedence > PREC_IF, |fmt| format_if(if_expr, fmt));
        }
    }
}

/// Formats an expression that more code follows on the same line. One that
/// ends in an indented block is parenthesized, so the closing parenthesis
/// carries the line on.
fn format_leading(expr: &Expression, fmt: &mut Formatter, precedence: u8) {
    if ends_with_block(expr) {
        parenthesize(fmt, true, |fmt| format_expression(expr, fmt, PREC_IF));
    } else {
        format_expression(expr, fmt, precedence);
    }
}

fn ends_with_block(expr: &Expression) -> bool {
    match expr {
        Expression::Block(_) | Expression::If(_) => true,
        Expression::Binary(binop) => ends_with_block(&binop.right),
        Expression::Unary(unop) => ends_with_block(&unop.operand),
        Expression::MessageApplication(application) => ends_with_block(&application.message),
        _ => false,
    }
}

fn parenthesize(fmt: &mut Formatter, needed: bool, body: impl FnOnce(&mut Formatter)) {
    if needed {
        fmt.write_str("(");
    }
    body(fmt);
    if needed {
        fmt.write_str(")");
    }
}

fn format_arguments(elements: &[Expression], fmt: &mut Formatter) {
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            fmt.write_str(", ");
        }
        format_expression(element, fmt, PREC_IF);
    }
}

fn format_message(message: &MessageCreation, fmt: &mut Formatter) {
    fmt.write_str("{");
    fmt.write_str(&message.header);
    for (i, argument) in message.arguments.iter().enumerate() {
        fmt.write_str(if i > 0 { ", " } else { " " });
        fmt.write_str(&argument.key);
        fmt.write_str(": ");
        format_expression(&argument.value, fmt, PREC_IF);
    }
    fmt.write_str("}");
}

fn format_if(if_expr: &IfExpression, fmt: &mut Formatter) {
    fmt.write_str("if ");
    format_leading(&if_expr.condition, fmt, PREC_IF);
    format_body(&if_expr.body, fmt);
    for else_if in &if_expr.else_ifs {
        fmt.write_str("else if ");
        format_leading(&else_if.condition, fmt, PREC_IF);
        format_body(&else_if.body, fmt);
    }
    if let Some(else_body) = &if_expr.else_body {
        fmt.write_str("else");
        format_body(else_body, fmt);
    }
}

fn format_binary_op(binop: &BinaryOp, fmt: &mut Formatter, parent_prec: u8) {
    let op_prec = binop_precedence(binop.op);
    // comparisons do not chain, so neither side may be another comparison
    let left_prec = if chains(binop.op) { op_prec } else { op_prec + 1 };

    parenthesize(fmt, op_prec < parent_prec, |fmt| {
        format_leading(&binop.left, fmt, left_prec);
        fmt.write_str(" ");
        fmt.write_str(binop_symbol(binop.op));
        fmt.write_str(" ");
        format_expression(&binop.right, fmt, op_prec + 1);
    });
}

fn format_unary_op(unop: &UnaryOp, fmt: &mut Formatter, parent_prec: u8) {
    parenthesize(fmt, PREC_UNARY < parent_prec, |fmt| {
        fmt.write_str(unop_symbol(unop.op));
        format_expression(&unop.operand, fmt, PREC_PROPERTY);
    });
}

fn starts_with_minus(expr: &Expression) -> bool {
    match expr {
        Expression::Unary(unop) => unop.op == UnaryOpKind::Neg,
        Expression::Binary(binop) => starts_with_minus(&binop.left),
        Expression::MessageApplication(application) => starts_with_minus(&application.receiver),
        _ => false,
    }
}

fn escape(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Floats always carry a fractional part so they lex as floats again.
fn float_literal(value: f64) -> String {
    let mut text = value.to_string();
    if !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }
    text
}

fn chains(kind: BinOpKind) -> bool {
    !matches!(
        kind,
        BinOpKind::Eq
            | BinOpKind::NotEq
            | BinOpKind::Lt
            | BinOpKind::Gt
            | BinOpKind::LtEq
            | BinOpKind::GtEq
    )
}

fn binop_precedence(kind: BinOpKind) -> u8 {
    match kind {
        BinOpKind::Xor => 2,
        BinOpKind::Or => 3,
        BinOpKind::And => 4,
        BinOpKind::Eq | BinOpKind::NotEq => 5,
        BinOpKind::Lt | BinOpKind::Gt | BinOpKind::LtEq | BinOpKind::GtEq => 6,
        BinOpKind::Add | BinOpKind::Sub => 7,
        BinOpKind::Mul | BinOpKind::Div | BinOpKind::IntDiv => 8,
    }
}

fn binop_symbol(kind: BinOpKind) -> &'static str {
    match kind {
        BinOpKind::Add => "+",
        BinOpKind::Sub => "-",
        BinOpKind::Mul => "*",
        BinOpKind::Div => "/",
        BinOpKind::IntDiv => "//",
        BinOpKind::Eq => "==",
        BinOpKind::NotEq => "!=",
        BinOpKind::Lt => "<",
        BinOpKind::Gt => ">",
        BinOpKind::LtEq => "<=",
        BinOpKind::GtEq => ">=",
        BinOpKind::And => "and",
        BinOpKind::Or => "or",
        BinOpKind::Xor => "xor",
    }
}

fn unop_symbol(kind: UnaryOpKind) -> &'static str {
    match kind {
        UnaryOpKind::Neg => "-",
        UnaryOpKind::Not => "!",
    }
}
