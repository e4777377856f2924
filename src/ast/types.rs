use crate::lexer::Location;

use super::{Located, located};

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpression {
    Identifier(IdentifierType),
    List(ListType),
    Tuple(TupleType),
    Variadic(VariadicType),
}

/// `Integer`, `Map<String, Integer>`
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierType {
    pub name: String,
    pub type_arguments: Vec<TypeExpression>,
    pub location: Location,
}

/// `[Integer]`
#[derive(Debug, Clone, PartialEq)]
pub struct ListType {
    pub inner: Box<TypeExpression>,
    pub location: Location,
}

/// `(Integer, String)`, `(Integer,)`
#[derive(Debug, Clone, PartialEq)]
pub struct TupleType {
    pub inners: Vec<TypeExpression>,
    pub location: Location,
}

/// `..Integer`
#[derive(Debug, Clone, PartialEq)]
pub struct VariadicType {
    pub inner: Box<TypeExpression>,
    pub location: Location,
}

located!(IdentifierType, ListType, TupleType, VariadicType);

impl Located for TypeExpression {
    fn location(&self) -> &Location {
        match self {
            TypeExpression::Identifier(t) => &t.location,
            TypeExpression::List(t) => &t.location,
            TypeExpression::Tuple(t) => &t.location,
            TypeExpression::Variadic(t) => &t.location,
        }
    }
}
