//! Literal and identifier parsers for the Fissure language

use crate::ast::expression::{
    BoolLiteral, CharLiteral, Expression, FloatLiteral, Identifier, IntLiteral, StringLiteral,
};
use crate::lexer::{Payload, TokenKind};

use crate::parser::combinators::{BoxedParser, choice, token};

/// Parse an identifier
pub fn ident() -> BoxedParser<Identifier> {
    token(TokenKind::Identifier).map(|t| {
        match t.payload {
            Payload::String(name) => Identifier { name, location: t.location },
            _ => unreachable!("identifier token without a name"),
        }
    })
}

pub fn string_literal() -> BoxedParser<StringLiteral> {
    token(TokenKind::String).map(|t| {
        match t.payload {
            Payload::String(value) => StringLiteral { value, location: t.location },
            _ => unreachable!("string token without a value"),
        }
    })
}

pub fn integer() -> BoxedParser<IntLiteral> {
    token(TokenKind::Int).map(|t| {
        match t.payload {
            Payload::Int(value) => IntLiteral { value, location: t.location },
            _ => unreachable!("integer token without a value"),
        }
    })
}

pub fn float() -> BoxedParser<FloatLiteral> {
    token(TokenKind::Float).map(|t| {
        match t.payload {
            Payload::Float(value) => FloatLiteral { value, location: t.location },
            _ => unreachable!("float token without a value"),
        }
    })
}

pub fn boolean() -> BoxedParser<BoolLiteral> {
    token(TokenKind::Bool).map(|t| {
        match t.payload {
            Payload::Bool(value) => BoolLiteral { value, location: t.location },
            _ => unreachable!("boolean token without a value"),
        }
    })
}

pub fn character() -> BoxedParser<CharLiteral> {
    token(TokenKind::Char).map(|t| {
        match t.payload {
            Payload::Char(value) => CharLiteral { value, location: t.location },
            _ => unreachable!("character token without a value"),
        }
    })
}

/// literal := IDENT | STRING | INT | FLOAT | BOOL | CHAR
pub fn literal() -> BoxedParser<Expression> {
    choice(vec![
        ident() >> Expression::Identifier,
        string_literal() >> Expression::String,
        integer() >> Expression::Int,
        float() >> Expression::Float,
        boolean() >> Expression::Bool,
        character() >> Expression::Char,
    ])
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::*;
    use crate::lexer::Token;
    use crate::parser::{Outcome, ParseState, Parser};

    fn parse_literal(input: &str) -> Expression {
        let mut state = ParseState::new(Token::lex(input).unwrap());
        match literal().parse(&mut state) {
            Outcome::Ok(expr) => expr,
            other => panic!("failed to parse {input:?}: {other:?}"),
        }
    }

    #[test]
    fn parses_each_literal_kind() {
        assert!(matches!(parse_literal("foo"), Expression::Identifier(i) if i.name == "foo"));
        assert!(matches!(parse_literal("\"hi\\n\""), Expression::String(s) if s.value == "hi\n"));
        assert!(matches!(parse_literal("0x1F"), Expression::Int(i) if i.value == BigInt::from(31)));
        assert!(matches!(parse_literal("2.5"), Expression::Float(f) if f.value == 2.5));
        assert!(matches!(parse_literal("false"), Expression::Bool(b) if !b.value));
        assert!(matches!(parse_literal("'x'"), Expression::Char(c) if c.value == 'x'));
    }

    #[test]
    fn huge_integers_keep_full_precision() {
        let Expression::Int(i) = parse_literal("123456789012345678901234567890") else {
            panic!("expected integer");
        };
        assert_eq!(i.value.to_string(), "123456789012345678901234567890");
    }
}
