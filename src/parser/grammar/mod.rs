//! Grammar module for the Fissure language
//!
//! This module contains all the parsing rules organized by category:
//! - `literal`: identifiers and literal tokens
//! - `types`: type expressions used by members, parameters and `new`
//! - `pattern`: destructuring patterns for `let` and `for`
//! - `expression`: the operator precedence ladder and atoms
//! - `statement`: statements, assignment paths and indented bodies
//!
//! Declarations (program, structs, members, handlers) live here.

mod expression;
mod literal;
mod pattern;
mod statement;
mod types;

pub use expression::{atom, expression};
pub use literal::ident;
pub use pattern::pattern;
pub use statement::{path, statement, statement_block};
pub use types::type_expression;

use crate::ast::{
    MemberDeclaration, MessageHandlerDeclaration, Parameter, Program, StructDeclaration,
    StructItem,
};
use crate::lexer::{Token, TokenKind};

use super::combinators::{
    BoxedParser, block, choice, comma_separated, many, many1, non_empty, optional, rule, token,
};
use super::memo::Rule;
use super::state::{ParseState, Parser};

use statement::indented_body;

fn line_ends() -> BoxedParser<Vec<Token>> {
    many(token(TokenKind::EndOfLine))
}

/// program := EOL* (struct_declaration EOL*)* EOF!
pub fn program() -> BoxedParser<Program> {
    rule(Rule::Program, || {
        let body = line_ends() * many(struct_declaration() - line_ends())
            - token(TokenKind::EndOfInput).fatal();
        BoxedParser::new(move |state: &mut ParseState| {
            let location = state.peek().location.clone();
            body.parse(state).map(|struct_declarations| Program {
                struct_declarations,
                location,
            })
        })
    })
}

/// struct_declaration := "struct" IDENT! ":"! EOL+! block[struct_item EOL*]!
pub fn struct_declaration() -> BoxedParser<StructDeclaration> {
    rule(Rule::StructDeclaration, || {
        (token(TokenKind::Struct) + ident().fatal() - token(TokenKind::Colon).fatal()
            - many1(token(TokenKind::EndOfLine)).fatal()
            + non_empty(
                block(struct_item()).fatal_with("expected indented struct body"),
                "member or handler declaration",
            )
            .fatal())
        .map(|((struct_token, name), items)| {
            let mut member_declarations = Vec::new();
            let mut message_handler_declarations = Vec::new();
            for item in items {
                match item {
                    StructItem::Member(member) => member_declarations.push(member),
                    StructItem::Handler(handler) => message_handler_declarations.push(handler),
                }
            }
            StructDeclaration {
                name: name.name,
                member_declarations,
                message_handler_declarations,
                location: struct_token.location,
            }
        })
    })
}

/// struct_item := member_declaration | handler_declaration
fn struct_item() -> BoxedParser<StructItem> {
    rule(Rule::StructItem, || {
        choice(vec![
            member_declaration() >> StructItem::Member,
            handler_declaration() >> StructItem::Handler,
        ])
    })
}

/// member_declaration := IDENT "::" type! EOL!
pub fn member_declaration() -> BoxedParser<MemberDeclaration> {
    rule(Rule::MemberDeclaration, || {
        (ident() - token(TokenKind::DoubleColon) + type_expression().fatal_with("expected type")
            - token(TokenKind::EndOfLine).fatal())
        .map(|(name, type_expression)| MemberDeclaration {
            name: name.name,
            type_expression,
            location: name.location,
        })
    })
}

/// handler_declaration := IDENT "("! parameters? ")"! body!
pub fn handler_declaration() -> BoxedParser<MessageHandlerDeclaration> {
    rule(Rule::MessageHandlerDeclaration, || {
        (ident() - token(TokenKind::LParen).fatal() + optional(parameters())
            - token(TokenKind::RParen).fatal()
            + indented_body().fatal())
        .map(|((name, parameters), body)| MessageHandlerDeclaration {
            name: name.name,
            parameters: parameters.unwrap_or_default(),
            body,
            location: name.location,
        })
    })
}

/// parameters := parameter ("," parameter!)*
fn parameters() -> BoxedParser<Vec<Parameter>> {
    rule(Rule::Parameters, || comma_separated(parameter()))
}

/// parameter := IDENT ("::" type!)?
fn parameter() -> BoxedParser<Parameter> {
    let annotation = token(TokenKind::DoubleColon) * type_expression().fatal_with("expected type");
    (ident() + optional(annotation)).map(|(name, type_expression)| Parameter {
        name: name.name,
        type_expression,
        location: name.location,
    })
}
