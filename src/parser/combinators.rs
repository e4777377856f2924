use std::ops::{Add, BitOr, Mul, Shr, Sub};
use std::rc::Rc;

use tracing::trace;

use crate::ast::Located;
use crate::lexer::{Token, TokenKind};

use super::memo::{Memoize, Rule};
use super::outcome::Outcome;
use super::state::{ParseState, Parser};

type ParserFn<T> = Rc<dyn Fn(&mut ParseState) -> Outcome<T>>;

/// Unwraps a successful outcome, or rolls `state` back to `start` and returns
/// the failure from the enclosing parser.
macro_rules! attempt {
    ($state:expr, $start:expr, $outcome:expr) => {
        match $outcome {
            Outcome::Ok(value) => value,
            failed => {
                $state.restore($start);
                return failed.transmute();
            }
        }
    };
}

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> Outcome<T> {
        (self.parser)(state)
    }
}

// === Combinators as methods ===

impl<T: 'static> BoxedParser<T> {
    /// Sequence: parse self then other, return (T, U). Atomic: any failure
    /// leaves the position where it started.
    pub fn seq<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<(T, U)> {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.position();
            let a = attempt!(state, start, self.parse(state));
            let b = attempt!(state, start, other.parse(state));
            Outcome::Ok((a, b))
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<T> {
        self.seq(other).map(|(a, _)| a)
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<U> {
        self.seq(other).map(|(_, b)| b)
    }

    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| self.parse(state).map(&f))
    }

    /// Parse self, then let `combine` accept or reject the value. A rejection
    /// rolls back like any other sequence failure.
    pub fn and_then<U: 'static, F: Fn(T) -> Outcome<U> + 'static>(
        self,
        combine: F,
    ) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.position();
            let value = attempt!(state, start, self.parse(state));
            match combine(value) {
                Outcome::Ok(value) => Outcome::Ok(value),
                failed => {
                    state.restore(start);
                    failed
                }
            }
        })
    }

    /// Choice: try self, if it fails recoverably try other
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        choice(vec![self, other])
    }

    /// Commit point: a recoverable failure becomes fatal.
    pub fn fatal(self) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| self.parse(state).make_fatal())
    }

    pub fn fatal_with(self, message: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            self.parse(state).make_fatal_with(message)
        })
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: 'static, U: 'static> Add<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<(T, U)>;

    fn add(self, rhs: BoxedParser<U>) -> Self::Output {
        self.seq(rhs)
    }
}

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: 'static, U: 'static> Sub<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn sub(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `|` for choice: A | B -> A or B
impl<T: 'static> BitOr<BoxedParser<T>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

// === Primitive Parsers ===

/// Matches one token of the given kind.
pub fn token(kind: TokenKind) -> BoxedParser<Token> {
    BoxedParser::new(move |state: &mut ParseState| {
        let found = state.peek();
        if found.kind == kind {
            Outcome::Ok(state.advance())
        } else {
            Outcome::recoverable(
                found.location.clone(),
                format!("expected {}, found {}", kind.describe(), found.describe()),
            )
        }
    })
}

/// A statement ends at a line break. A statement whose last element is an
/// indented block has already consumed its line break, so directly after
/// one this matches without consuming anything.
pub fn end_of_statement() -> BoxedParser<()> {
    BoxedParser::new(|state: &mut ParseState| {
        let found = state.peek();
        if found.kind == TokenKind::EndOfLine {
            state.advance();
            return Outcome::Ok(());
        }
        if state
            .previous()
            .is_some_and(|token| token.kind == TokenKind::EndOfLine)
        {
            return Outcome::Ok(());
        }
        let found = state.peek();
        Outcome::recoverable(
            found.location.clone(),
            format!("expected end of line, found {}", found.describe()),
        )
    })
}

/// Runs `parser` only if no line break was consumed right before it. After
/// an indented block the cursor sits on the next line, which belongs to the
/// enclosing block and must not continue the expression.
pub fn same_line<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        if state
            .previous()
            .is_some_and(|token| token.kind == TokenKind::EndOfLine)
        {
            let found = state.peek();
            return Outcome::recoverable(
                found.location.clone(),
                format!("expected continuation of line, found {}", found.describe()),
            );
        }
        parser.parse(state)
    })
}

/// Parse zero or more occurrences. Fatal failures are never swallowed.
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Outcome::Ok(item) => {
                    results.push(item);
                    // a match that consumed nothing would match forever
                    if state.position() == pos {
                        break;
                    }
                }
                Outcome::Recoverable(_) => {
                    state.restore(pos);
                    break;
                }
                fatal => return fatal.transmute(),
            }
        }
        Outcome::Ok(results)
    })
}

/// Parse one or more occurrences
pub fn many1<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    let repeated = many(parser);
    BoxedParser::new(move |state: &mut ParseState| {
        let start = state.position();
        let results = attempt!(state, start, repeated.parse(state));
        if results.is_empty() {
            let found = state.peek();
            return Outcome::recoverable(
                found.location.clone(),
                format!("expected one or more, found {}", found.describe()),
            );
        }
        Outcome::Ok(results)
    })
}

/// Optional: parse zero or one
pub fn optional<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Option<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        match parser.parse(state) {
            Outcome::Ok(item) => Outcome::Ok(Some(item)),
            Outcome::Recoverable(_) => {
                state.restore(pos);
                Outcome::Ok(None)
            }
            fatal => fatal.transmute(),
        }
    })
}

/// Ordered choice. The first success or fatal failure decides.
pub fn choice<T: 'static>(alternatives: Vec<BoxedParser<T>>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = state.position();
        for alternative in &alternatives {
            match alternative.parse(state) {
                Outcome::Recoverable(_) => state.restore(start),
                decided => return decided,
            }
        }
        let found = state.peek();
        Outcome::recoverable(
            found.location.clone(),
            format!("no alternative matched {}", found.describe()),
        )
    })
}

/// `item (',' item!)*`
pub fn comma_separated<T: 'static>(item: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    (item.clone() + many(token(TokenKind::Comma) * item.fatal())).map(|(first, rest)| {
        let mut items = vec![first];
        items.extend(rest);
        items
    })
}

/// A memoized grammar rule. `build` runs only when the rule is actually
/// parsed, which also lets rules refer to each other recursively.
pub fn rule<T: Memoize + 'static>(rule: Rule, build: fn() -> BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = state.position();
        let indent = state.indent_level();
        let memoize = state.config().memoize;

        if memoize
            && let Some((outcome, end)) = state.memo_mut().lookup::<T>(rule, start, indent)
        {
            trace!(?rule, start, end, "memo hit");
            state.restore(end);
            return outcome;
        }

        let outcome = build().parse(state);
        if memoize {
            let end = state.position();
            state.memo_mut().store(rule, start, indent, &outcome, end);
        }
        outcome
    })
}

/// An indentation-delimited run of `item`s.
///
/// The column of the first non-blank token opens the block and must be
/// deeper than the enclosing block. Items are collected, each followed by any
/// number of line ends, for as long as they start in exactly that column.
pub fn block<T: Located + 'static>(item: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    let entry = item - many(token(TokenKind::EndOfLine));
    BoxedParser::new(move |state: &mut ParseState| {
        let start = state.position();
        let mut blank = 0;
        while state.peek_nth(blank).kind == TokenKind::EndOfLine {
            blank += 1;
        }

        let first = state.peek_nth(blank);
        if first.kind == TokenKind::EndOfInput {
            return Outcome::recoverable(first.location.clone(), "expected indented block");
        }
        let Some(column) = first.location.column() else {
            return Outcome::fatal(
                first.location.clone(),
                "generated location cannot delimit a block",
            );
        };
        if column <= state.indent_level() {
            return Outcome::recoverable(first.location.clone(), "expected indented block");
        }

        for _ in 0..blank {
            state.advance();
        }
        state.push_indent(column);
        trace!(column, depth = state.indent_depth(), "entering block");
        let outcome = collect_block(&entry, state, column);
        state.pop_indent();
        trace!(column, ok = outcome.is_ok(), "leaving block");

        match outcome {
            Outcome::Ok(items) if items.is_empty() => {
                state.restore(start);
                Outcome::Ok(items)
            }
            other => other,
        }
    })
}

/// Rejects an empty list from `parser`. The failure points at the first
/// token after any blank lines, which is where the missing item should be.
pub fn non_empty<T: 'static>(
    parser: BoxedParser<Vec<T>>,
    expected: &'static str,
) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| match parser.parse(state) {
        Outcome::Ok(items) if items.is_empty() => {
            let mut blank = 0;
            while state.peek_nth(blank).kind == TokenKind::EndOfLine {
                blank += 1;
            }
            let found = state.peek_nth(blank);
            Outcome::recoverable(
                found.location.clone(),
                format!("expected {expected}, found {}", found.describe()),
            )
        }
        other => other,
    })
}

fn collect_block<T: Located>(
    entry: &BoxedParser<T>,
    state: &mut ParseState,
    column: usize,
) -> Outcome<Vec<T>> {
    let mut items = Vec::new();
    loop {
        // a line in another column belongs to an enclosing rule
        if state.peek().location.column() != Some(column) {
            break;
        }
        let pos = state.position();
        match entry.parse(state) {
            Outcome::Ok(item) if item.location().is_generated() => {
                let location = item.location().clone();
                state.restore(pos);
                return Outcome::fatal(location, "generated location cannot delimit a block");
            }
            Outcome::Ok(item) => items.push(item),
            Outcome::Recoverable(_) => {
                state.restore(pos);
                break;
            }
            fatal => return fatal.transmute(),
        }
    }
    Outcome::Ok(items)
}
