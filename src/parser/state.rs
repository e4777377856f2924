use std::sync::Arc;

use crate::lexer::{Location, Token, TokenKind};

use super::memo::{MemoStats, MemoTable};
use super::outcome::Outcome;

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Cache rule results per position. Turning this off changes running
    /// time only, never the result.
    pub memoize: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { memoize: true }
    }
}

/// Token cursor plus everything that lives for the duration of one parse:
/// the indentation stack used by blocks and the memo table.
pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
    end_of_input: Token,
    indent_stack: Vec<usize>,
    memo: MemoTable,
    config: ParserConfig,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(tokens: Vec<Token>, config: ParserConfig) -> Self {
        let file: Arc<str> = tokens
            .first()
            .map(|token| Arc::from(token.location.file()))
            .unwrap_or_else(|| Arc::from("<input>"));
        Self {
            tokens,
            index: 0,
            end_of_input: Token::new(Location::generated(file), TokenKind::EndOfInput),
            indent_stack: vec![0],
            memo: MemoTable::new(),
            config,
        }
    }

    /// The current token. Past the end of the stream this is a synthetic
    /// end-of-input token with a generated location.
    pub fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    pub fn peek_nth(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.index + offset)
            .unwrap_or(&self.end_of_input)
    }

    /// The most recently consumed token.
    pub fn previous(&self) -> Option<&Token> {
        self.index
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    pub fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    pub fn has_next(&self) -> bool {
        self.peek().kind != TokenKind::EndOfInput
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Column of the innermost open block; 0 at top level.
    pub fn indent_level(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    /// Number of entries on the indentation stack, including the base 0.
    pub fn indent_depth(&self) -> usize {
        self.indent_stack.len()
    }

    pub(crate) fn push_indent(&mut self, column: usize) {
        self.indent_stack.push(column);
    }

    pub(crate) fn pop_indent(&mut self) {
        if self.indent_stack.len() > 1 {
            self.indent_stack.pop();
        }
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    pub fn memo_stats(&self) -> MemoStats {
        self.memo.stats()
    }

    pub(crate) fn memo_mut(&mut self) -> &mut MemoTable {
        &mut self.memo
    }
}

pub trait Parser<T> {
    fn parse(&self, state: &mut ParseState) -> Outcome<T>;
}

impl<T, F: Fn(&mut ParseState) -> Outcome<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> Outcome<T> {
        self(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peeking_past_the_end_yields_generated_end_of_input() {
        let mut state = ParseState::new(Token::lex("x").unwrap());
        assert_eq!(state.advance().kind, TokenKind::Identifier);
        assert_eq!(state.advance().kind, TokenKind::EndOfInput);

        let past = state.peek();
        assert_eq!(past.kind, TokenKind::EndOfInput);
        assert!(past.location.is_generated());
        assert_eq!(past.location.file(), "<input>");
    }

    #[test]
    fn previous_tracks_last_consumed_token() {
        let mut state = ParseState::new(Token::lex("a\nb").unwrap());
        assert!(state.previous().is_none());
        state.advance();
        state.advance();
        assert_eq!(state.previous().map(|t| t.kind), Some(TokenKind::EndOfLine));
        state.restore(0);
        assert!(state.previous().is_none());
    }

    #[test]
    fn base_indent_is_never_popped() {
        let mut state = ParseState::new(Vec::new());
        state.push_indent(4);
        assert_eq!(state.indent_level(), 4);
        state.pop_indent();
        state.pop_indent();
        assert_eq!(state.indent_level(), 0);
        assert_eq!(state.indent_depth(), 1);
    }
}
