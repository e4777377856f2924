use crate::lexer::Location;

use super::{Located, located};

/// Destructuring patterns used by `let` and `for`.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Identifier(IdentifierPattern),
    List(ListPattern),
    Tuple(TuplePattern),
    Variadic(VariadicPattern),
    Ignore(IgnorePattern),
}

impl Pattern {
    pub fn is_variadic(&self) -> bool {
        matches!(self, Pattern::Variadic(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierPattern {
    pub name: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPattern {
    pub patterns: Vec<Pattern>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TuplePattern {
    pub patterns: Vec<Pattern>,
    pub location: Location,
}

/// `..rest` binds the remaining elements; a bare `..` discards them.
#[derive(Debug, Clone, PartialEq)]
pub struct VariadicPattern {
    pub inner: Option<Box<Pattern>>,
    pub location: Location,
}

/// `_`
#[derive(Debug, Clone, PartialEq)]
pub struct IgnorePattern {
    pub location: Location,
}

located!(
    IdentifierPattern,
    ListPattern,
    TuplePattern,
    VariadicPattern,
    IgnorePattern,
);

impl Located for Pattern {
    fn location(&self) -> &Location {
        match self {
            Pattern::Identifier(p) => &p.location,
            Pattern::List(p) => &p.location,
            Pattern::Tuple(p) => &p.location,
            Pattern::Variadic(p) => &p.location,
            Pattern::Ignore(p) => &p.location,
        }
    }
}
