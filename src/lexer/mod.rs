//! Tokenizer for Fissure source text.
//!
//! The raw scan is done by a `logos` lexer; this module then attaches a
//! [`Location`] (file, row, column, byte offset) to every token and appends the
//! terminating [`TokenKind::EndOfInput`] token the parser relies on.

mod error;
mod location;

use std::fmt;
use std::sync::Arc;

use logos::{Lexer, Logos};
use num_bigint::BigInt;

pub use error::{LexError, LexErrorKind};
pub use location::Location;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
#[logos(error = LexErrorKind)]
enum RawToken {
    #[token("\n")]
    EndOfLine,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("=")]
    Assign,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanOrEqual,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanOrEqual,
    #[token("!")]
    Not,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("//")]
    DoubleSlash,
    #[token("*")]
    Star,
    #[token(".")]
    Period,
    #[token("..")]
    DoublePeriod,
    #[token(",")]
    Comma,
    #[token("_", priority = 10)]
    Ignore,

    #[token("struct")]
    Struct,
    #[token("let")]
    Let,
    #[token("do")]
    Do,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("while")]
    While,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("xor")]
    Xor,
    #[token("new")]
    New,

    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*", |lex| lex.slice().to_owned())]
    Identifier(String),

    #[regex(r"[0-9]+", |lex| radix_integer(lex.slice(), 10))]
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| radix_integer(&lex.slice()[2..], 16))]
    #[regex(r"0[bB][01]+", |lex| radix_integer(&lex.slice()[2..], 2))]
    Int(BigInt),

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", float)]
    Float(f64),

    #[regex(r#""([^"\\]|\\[^\n])*""#, string)]
    #[regex(r#""([^"\\]|\\[^\n])*"#, unterminated_string)]
    String(String),

    #[regex(r"'([^'\\]|\\[^\n])'", character)]
    #[token("'", malformed_char)]
    Char(char),
}

fn radix_integer(digits: &str, radix: u32) -> Result<BigInt, LexErrorKind> {
    BigInt::parse_bytes(digits.as_bytes(), radix).ok_or(LexErrorKind::InvalidNumber)
}

fn float(lex: &mut Lexer<RawToken>) -> Result<f64, LexErrorKind> {
    match lex.slice().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LexErrorKind::InvalidNumber),
    }
}

fn string(lex: &mut Lexer<RawToken>) -> Result<String, LexErrorKind> {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}

fn character(lex: &mut Lexer<RawToken>) -> Result<char, LexErrorKind> {
    let slice = lex.slice();
    let unescaped = unescape(&slice[1..slice.len() - 1])?;
    let mut chars = unescaped.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(LexErrorKind::MalformedChar),
    }
}

fn unterminated_string(_: &mut Lexer<RawToken>) -> Result<String, LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

fn malformed_char(_: &mut Lexer<RawToken>) -> Result<char, LexErrorKind> {
    Err(LexErrorKind::MalformedChar)
}

fn unescape(body: &str) -> Result<String, LexErrorKind> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('\\') => '\\',
            Some('\'') => '\'',
            Some('"') => '"',
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            _ => return Err(LexErrorKind::UnknownEscape),
        };
        out.push(escaped);
    }
    Ok(out)
}

/// The closed set of token kinds the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfInput,
    EndOfLine,
    Colon,
    DoubleColon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Assign,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Not,
    Plus,
    Minus,
    Slash,
    DoubleSlash,
    Star,
    Period,
    DoublePeriod,
    Comma,
    Ignore,

    Struct,
    Let,
    Do,
    If,
    Else,
    For,
    In,
    While,
    And,
    Or,
    Xor,
    New,

    Identifier,
    String,
    Int,
    Bool,
    Char,
    Float,
}

impl TokenKind {
    /// Returns a human-readable description of the token kind
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EndOfInput => "end of input",
            TokenKind::EndOfLine => "end of line",
            TokenKind::Colon => "':'",
            TokenKind::DoubleColon => "'::'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Assign => "'='",
            TokenKind::Equal => "'=='",
            TokenKind::NotEqual => "'!='",
            TokenKind::GreaterThan => "'>'",
            TokenKind::GreaterThanOrEqual => "'>='",
            TokenKind::LessThan => "'<'",
            TokenKind::LessThanOrEqual => "'<='",
            TokenKind::Not => "'!'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Slash => "'/'",
            TokenKind::DoubleSlash => "'//'",
            TokenKind::Star => "'*'",
            TokenKind::Period => "'.'",
            TokenKind::DoublePeriod => "'..'",
            TokenKind::Comma => "','",
            TokenKind::Ignore => "'_'",
            TokenKind::Struct => "'struct'",
            TokenKind::Let => "'let'",
            TokenKind::Do => "'do'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::For => "'for'",
            TokenKind::In => "'in'",
            TokenKind::While => "'while'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Xor => "'xor'",
            TokenKind::New => "'new'",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Int => "integer",
            TokenKind::Bool => "boolean",
            TokenKind::Char => "character",
            TokenKind::Float => "float",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Literal data carried by identifier and literal tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    String(String),
    Int(BigInt),
    Float(f64),
    Bool(bool),
    Char(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub location: Location,
    pub kind: TokenKind,
    pub payload: Payload,
}

impl Token {
    pub fn new(location: Location, kind: TokenKind) -> Self {
        Self {
            location,
            kind,
            payload: Payload::None,
        }
    }

    pub fn with_payload(location: Location, kind: TokenKind, payload: Payload) -> Self {
        Self {
            location,
            kind,
            payload,
        }
    }

    /// Lex source text that has no file name of its own.
    pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
        Self::lex_file("<input>", input)
    }

    /// Lex the contents of `file`. The result always ends with exactly one
    /// [`TokenKind::EndOfInput`] token.
    pub fn lex_file(file: &str, input: &str) -> Result<Vec<Token>, LexError> {
        let file: Arc<str> = Arc::from(file);
        let lines = LineIndex::new(input);
        let mut tokens = Vec::new();

        let mut lexer = RawToken::lexer(input);
        while let Some(raw) = lexer.next() {
            let span = lexer.span();
            let location = lines.locate(&file, input, span.start);
            match raw {
                Ok(raw) => tokens.push(Token::from_raw(location, raw)),
                Err(kind) => {
                    return Err(LexError {
                        location,
                        kind,
                        snippet: input[span].to_owned(),
                    });
                }
            }
        }

        let end = lines.locate(&file, input, input.len());
        tokens.push(Token::new(end, TokenKind::EndOfInput));
        Ok(tokens)
    }

    fn from_raw(location: Location, raw: RawToken) -> Self {
        let kind = match raw {
            RawToken::EndOfLine => TokenKind::EndOfLine,
            RawToken::Colon => TokenKind::Colon,
            RawToken::DoubleColon => TokenKind::DoubleColon,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Assign => TokenKind::Assign,
            RawToken::Equal => TokenKind::Equal,
            RawToken::NotEqual => TokenKind::NotEqual,
            RawToken::GreaterThan => TokenKind::GreaterThan,
            RawToken::GreaterThanOrEqual => TokenKind::GreaterThanOrEqual,
            RawToken::LessThan => TokenKind::LessThan,
            RawToken::LessThanOrEqual => TokenKind::LessThanOrEqual,
            RawToken::Not => TokenKind::Not,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Slash => TokenKind::Slash,
            RawToken::DoubleSlash => TokenKind::DoubleSlash,
            RawToken::Star => TokenKind::Star,
            RawToken::Period => TokenKind::Period,
            RawToken::DoublePeriod => TokenKind::DoublePeriod,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Ignore => TokenKind::Ignore,
            RawToken::Struct => TokenKind::Struct,
            RawToken::Let => TokenKind::Let,
            RawToken::Do => TokenKind::Do,
            RawToken::If => TokenKind::If,
            RawToken::Else => TokenKind::Else,
            RawToken::For => TokenKind::For,
            RawToken::In => TokenKind::In,
            RawToken::While => TokenKind::While,
            RawToken::And => TokenKind::And,
            RawToken::Or => TokenKind::Or,
            RawToken::Xor => TokenKind::Xor,
            RawToken::New => TokenKind::New,
            RawToken::Bool(value) => {
                return Token::with_payload(location, TokenKind::Bool, Payload::Bool(value));
            }
            RawToken::Identifier(name) => {
                return Token::with_payload(location, TokenKind::Identifier, Payload::String(name));
            }
            RawToken::Int(value) => {
                return Token::with_payload(location, TokenKind::Int, Payload::Int(value));
            }
            RawToken::Float(value) => {
                return Token::with_payload(location, TokenKind::Float, Payload::Float(value));
            }
            RawToken::String(value) => {
                return Token::with_payload(location, TokenKind::String, Payload::String(value));
            }
            RawToken::Char(value) => {
                return Token::with_payload(location, TokenKind::Char, Payload::Char(value));
            }
        };
        Token::new(location, kind)
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match &self.payload {
            Payload::String(s) if self.kind == TokenKind::Identifier => {
                format!("identifier '{s}'")
            }
            Payload::String(s) => format!("string {s:?}"),
            Payload::Int(i) => format!("integer '{i}'"),
            Payload::Float(x) => format!("float '{x}'"),
            Payload::Bool(b) => format!("boolean '{b}'"),
            Payload::Char(c) => format!("character {c:?}"),
            Payload::None => self.kind.describe().to_owned(),
        }
    }
}

/// Byte offsets of line starts, used to turn spans into row/column pairs.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(input: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(input.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn locate(&self, file: &Arc<str>, input: &str, offset: usize) -> Location {
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.starts[line];
        let column = input[line_start..offset].chars().count() + 1;
        Location::concrete(Arc::clone(file), line + 1, column, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_token_sits_at_end_of_its_line() {
        let tokens = Token::lex("a\nb").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::EndOfLine);
        assert_eq!(tokens[1].location.row(), Some(1));
        assert_eq!(tokens[1].location.column(), Some(2));
        assert_eq!(tokens[2].location.row(), Some(2));
        assert_eq!(tokens[2].location.column(), Some(1));
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let tokens = Token::lex("ä b").unwrap();
        assert_eq!(tokens[1].location.column(), Some(3));
    }

    #[test]
    fn unescape_rejects_unknown_escapes() {
        assert_eq!(unescape(r"a\qb"), Err(LexErrorKind::UnknownEscape));
        assert_eq!(unescape(r"a\tb").as_deref(), Ok("a\tb"));
    }
}
