//! Packrat parser for Fissure.
//!
//! Parsers are built from the combinators in [`combinators`] and return an
//! [`Outcome`]. Grammar rules live in [`grammar`]; every recursive rule goes
//! through [`combinators::rule`], which memoizes its result per position.

pub mod combinators;
pub mod grammar;
pub mod memo;
pub mod outcome;
pub mod state;

pub use combinators::BoxedParser;
pub use memo::{MemoStats, Rule};
pub use outcome::{Failure, Outcome, ParseError, Severity};
pub use state::{ParseState, Parser, ParserConfig};

use tracing::{debug, warn};

use crate::ast::Program;
use crate::lexer::Token;

/// Parse a complete token stream with the default configuration.
pub fn parse_program(tokens: Vec<Token>) -> Outcome<Program> {
    let mut state = ParseState::new(tokens);
    grammar::program().parse(&mut state)
}

/// Parse a complete token stream held by `state`, turning the outcome into
/// a `Result` for callers that do not care about the protocol.
pub fn parse(state: &mut ParseState) -> Result<Program, ParseError> {
    debug!(memoize = state.config().memoize, "parsing program");
    let outcome = grammar::program().parse(state);

    let stats = state.memo_stats();
    debug!(hits = stats.hits, misses = stats.misses, "parse finished");
    if let Outcome::Recoverable(failure) = &outcome {
        warn!(%failure, "no production committed before the parse failed");
    }
    outcome.into_result()
}

/// Lex and parse source text in one step.
pub fn parse_source(file: &str, input: &str, config: ParserConfig) -> anyhow::Result<Program> {
    let tokens = Token::lex_file(file, input)?;
    let mut state = ParseState::with_config(tokens, config);
    Ok(parse(&mut state)?)
}
