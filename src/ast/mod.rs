use crate::lexer::Location;

pub mod expression;
pub mod pattern;
pub mod statement;
pub mod types;

use expression::BlockExpression;
use types::TypeExpression;

/// Anything that remembers the location of its leading token.
pub trait Located {
    fn location(&self) -> &Location;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub struct_declarations: Vec<StructDeclaration>,
    pub location: Location,
}

impl Program {
    pub fn find_struct(&self, name: &str) -> Option<&StructDeclaration> {
        self.struct_declarations.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDeclaration {
    pub name: String,
    pub member_declarations: Vec<MemberDeclaration>,
    pub message_handler_declarations: Vec<MessageHandlerDeclaration>,
    pub location: Location,
}

impl StructDeclaration {
    pub fn find_handler(&self, name: &str) -> Option<&MessageHandlerDeclaration> {
        self.message_handler_declarations
            .iter()
            .find(|h| h.name == name)
    }
}

/// `name :: Type` inside a struct body
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDeclaration {
    pub name: String,
    pub type_expression: TypeExpression,
    pub location: Location,
}

/// `Name(param, param :: Type):` followed by an indented statement block
#[derive(Debug, Clone, PartialEq)]
pub struct MessageHandlerDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: BlockExpression,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_expression: Option<TypeExpression>,
    pub location: Location,
}

/// One of the two kinds of declaration a struct body may hold.
#[derive(Debug, Clone, PartialEq)]
pub enum StructItem {
    Member(MemberDeclaration),
    Handler(MessageHandlerDeclaration),
}

macro_rules! located {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Located for $ty {
                fn location(&self) -> &Location {
                    &self.location
                }
            }
        )*
    };
}

located!(
    Program,
    StructDeclaration,
    MemberDeclaration,
    MessageHandlerDeclaration,
    Parameter,
);

impl Located for StructItem {
    fn location(&self) -> &Location {
        match self {
            StructItem::Member(member) => &member.location,
            StructItem::Handler(handler) => &handler.location,
        }
    }
}

pub(crate) use located;
