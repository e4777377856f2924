use thiserror::Error;

use super::location::Location;

/// The reason a piece of source text could not be turned into a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unknown escape sequence")]
    UnknownEscape,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("malformed character literal")]
    MalformedChar,
    #[error("invalid numeric literal")]
    InvalidNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {kind} '{snippet}'")]
pub struct LexError {
    pub location: Location,
    pub kind: LexErrorKind,
    pub snippet: String,
}
