//! Statement parsers for the Fissure language

use crate::ast::Located;
use crate::ast::expression::BlockExpression;
use crate::ast::statement::{
    Assign, ExpressionStatement, For, IdentifierPath, Let, Path, PropertyPath, Statement, While,
};
use crate::lexer::TokenKind;

use crate::parser::combinators::{
    BoxedParser, block, choice, end_of_statement, many, non_empty, rule, token,
};
use crate::parser::memo::Rule;

use super::expression::expression;
use super::literal::ident;
use super::pattern::pattern;

/// statement := let | assign | for | while | expression_statement
pub fn statement() -> BoxedParser<Statement> {
    rule(Rule::Statement, || {
        choice(vec![
            let_statement(),
            assign_statement(),
            for_statement(),
            while_statement(),
            expression_statement(),
        ])
    })
}

/// statement_block := block[statement EOL*]
pub fn statement_block() -> BoxedParser<Vec<Statement>> {
    rule(Rule::StatementBlock, || {
        non_empty(block(statement()), "statement")
    })
}

/// body := ":"! EOL! statement_block!
///
/// The block takes the location of its colon.
pub fn indented_body() -> BoxedParser<BlockExpression> {
    (token(TokenKind::Colon).fatal() - token(TokenKind::EndOfLine).fatal()
        + statement_block().fatal())
    .map(|(colon, statements)| BlockExpression {
        statements,
        location: colon.location,
    })
}

/// let := "let" pattern! "="! expression! end!
fn let_statement() -> BoxedParser<Statement> {
    (token(TokenKind::Let) + pattern().fatal() - token(TokenKind::Assign).fatal()
        + expression().fatal()
        - end_of_statement().fatal())
    .map(|((let_token, pattern), value)| {
        Statement::Let(Let {
            pattern,
            value,
            location: let_token.location,
        })
    })
}

/// assign := path "=" expression! end!
fn assign_statement() -> BoxedParser<Statement> {
    (path() - token(TokenKind::Assign) + expression().fatal() - end_of_statement().fatal()).map(
        |(path, value)| {
            let location = path.location().clone();
            Statement::Assign(Assign {
                path,
                value,
                location,
            })
        },
    )
}

/// for := "for" pattern! "in"! expression! body!
fn for_statement() -> BoxedParser<Statement> {
    (token(TokenKind::For) + pattern().fatal() - token(TokenKind::In).fatal()
        + expression().fatal()
        + indented_body().fatal())
    .map(|(((for_token, pattern), iterable), body)| {
        Statement::For(For {
            pattern,
            iterable,
            body,
            location: for_token.location,
        })
    })
}

/// while := "while" expression! body!
fn while_statement() -> BoxedParser<Statement> {
    (token(TokenKind::While) + expression().fatal() + indented_body().fatal()).map(
        |((while_token, condition), body)| {
            Statement::While(While {
                condition,
                body,
                location: while_token.location,
            })
        },
    )
}

/// expression_statement := expression end
fn expression_statement() -> BoxedParser<Statement> {
    (expression() - end_of_statement()).map(|expression| {
        let location = expression.location().clone();
        Statement::Expression(ExpressionStatement {
            expression,
            location,
        })
    })
}

/// path := IDENT ("." IDENT!)*
pub fn path() -> BoxedParser<Path> {
    rule(Rule::Path, || {
        (ident() + many(token(TokenKind::Period) * ident().fatal())).map(|(root, names)| {
            let root = Path::Identifier(IdentifierPath {
                name: root.name,
                location: root.location,
            });
            names.into_iter().fold(root, |inner, name| {
                let location = inner.location().clone();
                Path::Property(PropertyPath {
                    inner: Box::new(inner),
                    name: name.name,
                    location,
                })
            })
        })
    })
}
