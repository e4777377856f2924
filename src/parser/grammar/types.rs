//! Type expression parsers

use crate::ast::types::{IdentifierType, ListType, TupleType, TypeExpression, VariadicType};
use crate::lexer::TokenKind;

use crate::parser::combinators::{BoxedParser, choice, comma_separated, many, optional, rule, token};
use crate::parser::memo::Rule;

use super::literal::ident;

/// type := named_type | list_type | tuple_type | variadic_type
pub fn type_expression() -> BoxedParser<TypeExpression> {
    rule(Rule::TypeExpression, || {
        choice(vec![named_type(), list_type(), tuple_type(), variadic_type()])
    })
}

/// type_arguments := "<" type ("," type)* ">"
///
/// Nothing in here commits, so `a < b` still reaches the comparison rule.
fn type_arguments() -> BoxedParser<Vec<TypeExpression>> {
    let arguments = (type_expression() + many(token(TokenKind::Comma) * type_expression()))
        .map(|(first, rest)| {
            let mut all = vec![first];
            all.extend(rest);
            all
        });
    token(TokenKind::LessThan) * arguments - token(TokenKind::GreaterThan)
}

/// named_type := IDENT type_arguments?
fn named_type() -> BoxedParser<TypeExpression> {
    (ident() + optional(type_arguments())).map(|(name, arguments)| {
        TypeExpression::Identifier(IdentifierType {
            name: name.name,
            type_arguments: arguments.unwrap_or_default(),
            location: name.location,
        })
    })
}

/// list_type := "[" type! "]"!
fn list_type() -> BoxedParser<TypeExpression> {
    (token(TokenKind::LBracket) + type_expression().fatal() - token(TokenKind::RBracket).fatal())
        .map(|(open, inner)| {
            TypeExpression::List(ListType {
                inner: Box::new(inner),
                location: open.location,
            })
        })
}

/// tuple_type := "(" type! ","! (type ("," type!)*)? ")"!
fn tuple_type() -> BoxedParser<TypeExpression> {
    (token(TokenKind::LParen)
        + type_expression().fatal()
        + (token(TokenKind::Comma).fatal() * optional(comma_separated(type_expression())))
        - token(TokenKind::RParen).fatal())
    .map(|((open, first), rest)| {
        let mut inners = vec![first];
        inners.extend(rest.unwrap_or_default());
        TypeExpression::Tuple(TupleType {
            inners,
            location: open.location,
        })
    })
}

/// variadic_type := ".." type!
fn variadic_type() -> BoxedParser<TypeExpression> {
    (token(TokenKind::DoublePeriod) + type_expression().fatal()).map(|(dots, inner)| {
        TypeExpression::Variadic(VariadicType {
            inner: Box::new(inner),
            location: dots.location,
        })
    })
}
