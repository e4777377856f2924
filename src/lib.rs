//! # Fissure - an indentation-sensitive, message-passing struct language
//!
//! This crate implements the front end of Fissure: a lexer, a packrat
//! combinator parser with significant indentation, a pretty-printer and an
//! entry-convention check.
//!
//! ## Pipeline Flow
//!
//! ```text
//! Source Code (String)
//!     ↓
//! [Lexer] → Token Stream (ends with EndOfInput)
//!     ↓
//! [Parser] → Syntax Tree (ast::Program)
//!     ↓
//! [Validation] → entry convention: struct Program / Main(system)
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Three-way outcomes
//! Every parser returns an [`parser::Outcome`]: a value, a *recoverable*
//! failure that lets an enclosing choice try its next alternative, or a
//! *fatal* failure that aborts the whole parse. Once a production has seen
//! the token that identifies it (a keyword, an opening bracket) its
//! remaining parts are marked fatal, so errors point at the real problem
//! instead of a generic "no alternative matched".
//!
//! ### Packrat memoization
//! Grammar rules are memoized per `(rule, token position, indent level)`.
//! Turning the table off with [`parser::ParserConfig`] never changes a
//! result, only the amount of work.
//!
//! ### Significant indentation
//! Blocks are sequences of items that start in the same column, deeper than
//! the enclosing block. The parser keeps a stack of block columns.
//!
//! ## Module Structure
//!
//! - [`lexer`] - Tokenization using logos
//! - [`ast`] - Syntax tree definitions
//! - [`parser`] - Combinators, parse state, memo table and grammar
//! - [`fmt`] - Canonical pretty-printing
//! - [`validate`] - Entry-point and uniqueness checks
//!
//! ## Example Program
//!
//! ```text
//! struct Program:
//!   count :: Int
//!   Main(system):
//!     let [first, ..rest] = [1, 2, 3]
//!     system {Print value: first + 1}
//! ```
//!
//! ## Getting Started
//!
//! 1. Tokenize with [`lexer::Token::lex_file()`]
//! 2. Parse with [`parser::parse()`] or [`parser::parse_program()`]
//! 3. Check with [`validate::validate_entry()`]
//! 4. Print with the `Display` implementations in [`fmt`]

pub mod ast;
pub mod fmt;
pub mod lexer;
pub mod parser;
pub mod validate;
