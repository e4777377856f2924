//! Expression parsers for the Fissure language
//!
//! One function per precedence level, loosest first. Every level is a
//! memoized rule, so the backtracking between `if`, juxtaposition and the
//! operator levels never re-parses the same operand twice.

use crate::ast::Located;
use crate::ast::expression::{
    Argument, BinOpKind, BinaryOp, BlockExpression, ElseIf, Expression, IfExpression,
    ListConstruction, MessageApplication, MessageCreation, ObjectCreation, PropertyAccess,
    TupleConstruction, UnaryOp, UnaryOpKind,
};
use crate::lexer::{Token, TokenKind};

use crate::parser::combinators::{
    BoxedParser, choice, comma_separated, many, optional, rule, same_line, token,
};
use crate::parser::memo::Rule;
use crate::parser::outcome::Outcome;
use crate::parser::state::{ParseState, Parser};

use super::literal::{ident, literal};
use super::statement::indented_body;
use super::types::type_expression;

type OperatorTable = &'static [(TokenKind, BinOpKind)];

const XOR: OperatorTable = &[(TokenKind::Xor, BinOpKind::Xor)];
const OR: OperatorTable = &[(TokenKind::Or, BinOpKind::Or)];
const AND: OperatorTable = &[(TokenKind::And, BinOpKind::And)];
const EQUALITY: OperatorTable = &[
    (TokenKind::Equal, BinOpKind::Eq),
    (TokenKind::NotEqual, BinOpKind::NotEq),
];
const RELATION: OperatorTable = &[
    (TokenKind::GreaterThan, BinOpKind::Gt),
    (TokenKind::GreaterThanOrEqual, BinOpKind::GtEq),
    (TokenKind::LessThan, BinOpKind::Lt),
    (TokenKind::LessThanOrEqual, BinOpKind::LtEq),
];
const ADDITIVE: OperatorTable = &[
    (TokenKind::Plus, BinOpKind::Add),
    (TokenKind::Minus, BinOpKind::Sub),
];
const MULTIPLICATIVE: OperatorTable = &[
    (TokenKind::Star, BinOpKind::Mul),
    (TokenKind::Slash, BinOpKind::Div),
    (TokenKind::DoubleSlash, BinOpKind::IntDiv),
];

/// expression := if_expression | application
pub fn expression() -> BoxedParser<Expression> {
    rule(Rule::Expression, || if_expression() | application())
}

/// if_expression := "if" expression! body! ("else" "if" expression! body!)* ("else" body!)?
pub fn if_expression() -> BoxedParser<Expression> {
    rule(Rule::IfExpression, || {
        let else_if = (aligned_else() - token(TokenKind::If)
            + expression().fatal()
            + indented_body().fatal())
        .map(|((else_token, condition), body)| ElseIf {
            condition,
            body,
            location: else_token.location,
        });
        let else_clause = aligned_else() * indented_body().fatal();

        (token(TokenKind::If)
            + expression().fatal()
            + indented_body().fatal()
            + many(else_if)
            + optional(else_clause))
        .map(|((((if_token, condition), body), else_ifs), else_body)| {
            Expression::If(IfExpression {
                condition: Box::new(condition),
                body,
                else_ifs,
                else_body,
                location: if_token.location,
            })
        })
    })
}

/// An `else` starts a line in the column of the enclosing block, which
/// keeps it with the right `if` when ifs nest.
fn aligned_else() -> BoxedParser<Token> {
    let keyword = token(TokenKind::Else);
    BoxedParser::new(move |state: &mut ParseState| {
        let found = state.peek();
        if found.location.column() != Some(state.indent_level()) {
            return Outcome::recoverable(
                found.location.clone(),
                format!("expected 'else' in column {}", state.indent_level()),
            );
        }
        keyword.parse(state)
    })
}

/// application := xor xor*
///
/// Juxtaposition sends the right operand as a message to the left one and
/// associates to the left: `a b c` is `(a b) c`.
pub fn application() -> BoxedParser<Expression> {
    rule(Rule::Application, || {
        (xor_expression() + many(same_line(xor_expression()))).map(|(receiver, messages)| {
            messages.into_iter().fold(receiver, |receiver, message| {
                let location = receiver.location().clone();
                Expression::MessageApplication(MessageApplication {
                    receiver: Box::new(receiver),
                    message: Box::new(message),
                    location,
                })
            })
        })
    })
}

fn operator(table: OperatorTable) -> BoxedParser<BinOpKind> {
    same_line(choice(
        table
            .iter()
            .map(|&(kind, op)| token(kind).map(move |_| op))
            .collect(),
    ))
}

fn binary(left: Expression, op: BinOpKind, right: Expression) -> Expression {
    let location = left.location().clone();
    Expression::Binary(BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
        location,
    })
}

/// operand (op operand!)*
fn left_associative(
    operand: fn() -> BoxedParser<Expression>,
    table: OperatorTable,
) -> BoxedParser<Expression> {
    (operand() + many(operator(table) + operand().fatal())).map(|(first, rest)| {
        rest.into_iter()
            .fold(first, |left, (op, right)| binary(left, op, right))
    })
}

/// operand (op operand!)?
fn non_associative(
    operand: fn() -> BoxedParser<Expression>,
    table: OperatorTable,
) -> BoxedParser<Expression> {
    (operand() + optional(operator(table) + operand().fatal())).map(|(left, rest)| match rest {
        Some((op, right)) => binary(left, op, right),
        None => left,
    })
}

/// xor := or ("xor" or!)*
pub fn xor_expression() -> BoxedParser<Expression> {
    rule(Rule::Xor, || left_associative(or_expression, XOR))
}

/// or := and ("or" and!)*
pub fn or_expression() -> BoxedParser<Expression> {
    rule(Rule::Or, || left_associative(and_expression, OR))
}

/// and := equality ("and" equality!)*
pub fn and_expression() -> BoxedParser<Expression> {
    rule(Rule::And, || left_associative(equality, AND))
}

/// equality := relation (("==" | "!=") relation!)?
pub fn equality() -> BoxedParser<Expression> {
    rule(Rule::Equality, || non_associative(relation, EQUALITY))
}

/// relation := additive ((">" | ">=" | "<" | "<=") additive!)?
pub fn relation() -> BoxedParser<Expression> {
    rule(Rule::Relation, || non_associative(additive, RELATION))
}

/// additive := multiplicative (("+" | "-") multiplicative!)*
pub fn additive() -> BoxedParser<Expression> {
    rule(Rule::Additive, || left_associative(multiplicative, ADDITIVE))
}

/// multiplicative := unary (("*" | "/" | "//") unary!)*
pub fn multiplicative() -> BoxedParser<Expression> {
    rule(Rule::Multiplicative, || left_associative(unary, MULTIPLICATIVE))
}

fn prefix(kind: TokenKind, op: UnaryOpKind) -> BoxedParser<Expression> {
    (token(kind) + property().fatal()).map(move |(t, operand)| {
        Expression::Unary(UnaryOp {
            op,
            operand: Box::new(operand),
            location: t.location,
        })
    })
}

/// unary := "-" property! | "!" property! | property
pub fn unary() -> BoxedParser<Expression> {
    rule(Rule::Unary, || {
        choice(vec![
            prefix(TokenKind::Minus, UnaryOpKind::Neg),
            prefix(TokenKind::Not, UnaryOpKind::Not),
            property(),
        ])
    })
}

/// property := atom ("." IDENT!)*
pub fn property() -> BoxedParser<Expression> {
    rule(Rule::Property, || {
        (atom() + many(same_line(token(TokenKind::Period)) * ident().fatal())).map(|(root, names)| {
            names.into_iter().fold(root, |root, name| {
                let location = root.location().clone();
                Expression::PropertyAccess(PropertyAccess {
                    root: Box::new(root),
                    name: name.name,
                    location,
                })
            })
        })
    })
}

/// atom := do_block | object_creation | message_creation | tuple | list
///       | literal | "(" expression! ")"!
pub fn atom() -> BoxedParser<Expression> {
    rule(Rule::Atom, || {
        choice(vec![
            do_block(),
            object_creation(),
            message_creation(),
            tuple_construction(),
            list_construction(),
            literal(),
            parenthesized(),
        ])
    })
}

/// do_block := "do" body!
fn do_block() -> BoxedParser<Expression> {
    (token(TokenKind::Do) + indented_body().fatal()).map(|(do_token, body)| {
        Expression::Block(BlockExpression {
            statements: body.statements,
            location: do_token.location,
        })
    })
}

/// object_creation := "new" type!
fn object_creation() -> BoxedParser<Expression> {
    (token(TokenKind::New) + type_expression().fatal_with("expected type")).map(
        |(new, type_expression)| {
            Expression::ObjectCreation(ObjectCreation {
                type_expression,
                location: new.location,
            })
        },
    )
}

/// argument := IDENT ":"! expression!
fn argument() -> BoxedParser<Argument> {
    (ident() - token(TokenKind::Colon).fatal() + expression().fatal()).map(|(key, value)| {
        Argument {
            key: key.name,
            value,
            location: key.location,
        }
    })
}

/// message_creation := "{" IDENT! (argument ("," argument!)*)? "}"!
fn message_creation() -> BoxedParser<Expression> {
    (token(TokenKind::LBrace)
        + ident().fatal()
        + optional(comma_separated(argument()))
        - token(TokenKind::RBrace).fatal())
    .map(|((open, header), arguments)| {
        Expression::MessageCreation(MessageCreation {
            header: header.name,
            arguments: arguments.unwrap_or_default(),
            location: open.location,
        })
    })
}

/// tuple := "(" expression! "," (expression ("," expression!)*)? ")"!
fn tuple_construction() -> BoxedParser<Expression> {
    (token(TokenKind::LParen)
        + expression().fatal()
        + (token(TokenKind::Comma) * optional(comma_separated(expression())))
        - token(TokenKind::RParen).fatal())
    .map(|((open, first), rest)| {
        let mut elements = vec![first];
        elements.extend(rest.unwrap_or_default());
        Expression::Tuple(TupleConstruction {
            elements,
            location: open.location,
        })
    })
}

/// list := "[" (expression ("," expression!)*)? "]"!
fn list_construction() -> BoxedParser<Expression> {
    (token(TokenKind::LBracket) + optional(comma_separated(expression()))
        - token(TokenKind::RBracket).fatal())
    .map(|(open, elements)| {
        Expression::List(ListConstruction {
            elements: elements.unwrap_or_default(),
            location: open.location,
        })
    })
}

/// "(" expression! ")"!
fn parenthesized() -> BoxedParser<Expression> {
    token(TokenKind::LParen) * expression().fatal() - token(TokenKind::RParen).fatal()
}
