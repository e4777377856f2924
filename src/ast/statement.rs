use crate::lexer::Location;

use super::expression::{BlockExpression, Expression};
use super::pattern::Pattern;
use super::{Located, located};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(Let),
    Assign(Assign),
    For(For),
    While(While),
    Expression(ExpressionStatement),
}

/// `let pattern = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    pub pattern: Pattern,
    pub value: Expression,
    pub location: Location,
}

/// `a.b.c = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub path: Path,
    pub value: Expression,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub pattern: Pattern,
    pub iterable: Expression,
    pub body: BlockExpression,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expression,
    pub body: BlockExpression,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub location: Location,
}

/// Assignment target: a variable or a (possibly nested) property of one.
#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    Identifier(IdentifierPath),
    Property(PropertyPath),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierPath {
    pub name: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPath {
    pub inner: Box<Path>,
    pub name: String,
    pub location: Location,
}

located!(Let, Assign, For, While, ExpressionStatement, IdentifierPath, PropertyPath);

impl Located for Statement {
    fn location(&self) -> &Location {
        match self {
            Statement::Let(s) => &s.location,
            Statement::Assign(s) => &s.location,
            Statement::For(s) => &s.location,
            Statement::While(s) => &s.location,
            Statement::Expression(s) => &s.location,
        }
    }
}

impl Located for Path {
    fn location(&self) -> &Location {
        match self {
            Path::Identifier(p) => &p.location,
            Path::Property(p) => &p.location,
        }
    }
}
