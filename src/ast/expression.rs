use num_bigint::BigInt;

use crate::lexer::Location;

use super::statement::Statement;
use super::types::TypeExpression;
use super::{Located, located};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Block(BlockExpression),
    Identifier(Identifier),
    String(StringLiteral),
    Int(IntLiteral),
    Float(FloatLiteral),
    Bool(BoolLiteral),
    Char(CharLiteral),
    Tuple(TupleConstruction),
    List(ListConstruction),
    Binary(BinaryOp),
    Unary(UnaryOp),
    PropertyAccess(PropertyAccess),
    ObjectCreation(ObjectCreation),
    MessageCreation(MessageCreation),
    MessageApplication(MessageApplication),
    If(IfExpression),
}

/// An indented run of statements: a `do:` expression or the body of a
/// handler, loop or conditional branch.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockExpression {
    pub statements: Vec<Statement>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteral {
    pub value: BigInt,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub value: f64,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLiteral {
    pub value: bool,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharLiteral {
    pub value: char,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleConstruction {
    pub elements: Vec<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListConstruction {
    pub elements: Vec<Expression>,
    pub location: Location,
}

/// Binary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Eq,
    NotEq,
    And,
    Or,
    Xor,
}

/// Unary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub op: BinOpKind,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnaryOpKind,
    pub operand: Box<Expression>,
    pub location: Location,
}

/// `root.name`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccess {
    pub root: Box<Expression>,
    pub name: String,
    pub location: Location,
}

/// `new Type`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectCreation {
    pub type_expression: TypeExpression,
    pub location: Location,
}

/// `{Header key: value, ...}`
#[derive(Debug, Clone, PartialEq)]
pub struct MessageCreation {
    pub header: String,
    pub arguments: Vec<Argument>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub key: String,
    pub value: Expression,
    pub location: Location,
}

/// `receiver message`: sends `message` to `receiver`.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageApplication {
    pub receiver: Box<Expression>,
    pub message: Box<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub body: BlockExpression,
    pub else_ifs: Vec<ElseIf>,
    pub else_body: Option<BlockExpression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    pub condition: Expression,
    pub body: BlockExpression,
    pub location: Location,
}

located!(
    BlockExpression,
    Identifier,
    StringLiteral,
    IntLiteral,
    FloatLiteral,
    BoolLiteral,
    CharLiteral,
    TupleConstruction,
    ListConstruction,
    BinaryOp,
    UnaryOp,
    PropertyAccess,
    ObjectCreation,
    MessageCreation,
    Argument,
    MessageApplication,
    IfExpression,
    ElseIf,
);

impl Located for Expression {
    fn location(&self) -> &Location {
        match self {
            Expression::Block(e) => &e.location,
            Expression::Identifier(e) => &e.location,
            Expression::String(e) => &e.location,
            Expression::Int(e) => &e.location,
            Expression::Float(e) => &e.location,
            Expression::Bool(e) => &e.location,
            Expression::Char(e) => &e.location,
            Expression::Tuple(e) => &e.location,
            Expression::List(e) => &e.location,
            Expression::Binary(e) => &e.location,
            Expression::Unary(e) => &e.location,
            Expression::PropertyAccess(e) => &e.location,
            Expression::ObjectCreation(e) => &e.location,
            Expression::MessageCreation(e) => &e.location,
            Expression::MessageApplication(e) => &e.location,
            Expression::If(e) => &e.location,
        }
    }
}
