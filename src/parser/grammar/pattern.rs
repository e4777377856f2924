//! Pattern parsers for `let` and `for`

use crate::ast::Located;
use crate::ast::pattern::{
    IdentifierPattern, IgnorePattern, ListPattern, Pattern, TuplePattern, VariadicPattern,
};
use crate::lexer::{Location, TokenKind};

use crate::parser::combinators::{BoxedParser, comma_separated, optional, rule, token};
use crate::parser::memo::Rule;
use crate::parser::outcome::Outcome;
use crate::parser::state::{ParseState, Parser};

use super::literal::ident;

/// pattern := IDENT | "_" | list_pattern | tuple_pattern | variadic_pattern
///
/// Every alternative starts with its own token, so the alternative is picked
/// by lookahead and its failure is returned as-is.
pub fn pattern() -> BoxedParser<Pattern> {
    rule(Rule::Pattern, || {
        let identifier = identifier_pattern();
        let ignore = ignore_pattern();
        let list = list_pattern();
        let tuple = tuple_pattern();
        let variadic = variadic_pattern();
        BoxedParser::new(move |state: &mut ParseState| {
            let alternative = match state.peek().kind {
                TokenKind::Identifier => &identifier,
                TokenKind::Ignore => &ignore,
                TokenKind::LBracket => &list,
                TokenKind::LParen => &tuple,
                TokenKind::DoublePeriod => &variadic,
                _ => {
                    let found = state.peek();
                    return Outcome::recoverable(
                        found.location.clone(),
                        format!("expected pattern, found {}", found.describe()),
                    );
                }
            };
            alternative.parse(state)
        })
    })
}

fn identifier_pattern() -> BoxedParser<Pattern> {
    ident().map(|id| {
        Pattern::Identifier(IdentifierPattern {
            name: id.name,
            location: id.location,
        })
    })
}

fn ignore_pattern() -> BoxedParser<Pattern> {
    token(TokenKind::Ignore).map(|t| Pattern::Ignore(IgnorePattern { location: t.location }))
}

/// A destructuring pattern may bind "the rest" at most once.
fn at_most_one_variadic(patterns: &[Pattern], location: &Location) -> Outcome<()> {
    match patterns.iter().filter(|p| p.is_variadic()).nth(1) {
        Some(second) => Outcome::recoverable(
            second.location().clone(),
            format!("pattern starting at {location} has more than one variadic element"),
        ),
        None => Outcome::Ok(()),
    }
}

/// list_pattern := "[" (pattern ("," pattern!)*)? "]"!
fn list_pattern() -> BoxedParser<Pattern> {
    (token(TokenKind::LBracket) + optional(comma_separated(pattern()))
        - token(TokenKind::RBracket).fatal())
    .and_then(|(open, patterns)| {
        let patterns = patterns.unwrap_or_default();
        at_most_one_variadic(&patterns, &open.location).map(|()| {
            Pattern::List(ListPattern {
                patterns,
                location: open.location,
            })
        })
    })
}

/// tuple_pattern := "(" pattern! "," (pattern ("," pattern!)*)? ")"!
fn tuple_pattern() -> BoxedParser<Pattern> {
    (token(TokenKind::LParen)
        + pattern().fatal()
        + (token(TokenKind::Comma) * optional(comma_separated(pattern())))
        - token(TokenKind::RParen).fatal())
    .and_then(|((open, first), rest)| {
        let mut patterns = vec![first];
        patterns.extend(rest.unwrap_or_default());
        at_most_one_variadic(&patterns, &open.location).map(|()| {
            Pattern::Tuple(TuplePattern {
                patterns,
                location: open.location,
            })
        })
    })
}

/// variadic_pattern := ".." pattern?
fn variadic_pattern() -> BoxedParser<Pattern> {
    (token(TokenKind::DoublePeriod) + optional(pattern())).map(|(dots, inner)| {
        Pattern::Variadic(VariadicPattern {
            inner: inner.map(Box::new),
            location: dots.location,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Token;

    fn parse_pattern(input: &str) -> (Outcome<Pattern>, usize) {
        let mut state = ParseState::new(Token::lex(input).unwrap());
        let outcome = pattern().parse(&mut state);
        (outcome, state.position())
    }

    #[test]
    fn parses_nested_destructuring() {
        let (outcome, _) = parse_pattern("[(a, _), ..rest]");
        let Outcome::Ok(Pattern::List(list)) = outcome else {
            panic!("expected a list pattern");
        };
        assert_eq!(list.patterns.len(), 2);
        assert!(matches!(&list.patterns[0], Pattern::Tuple(t) if t.patterns.len() == 2));
        let Pattern::Variadic(rest) = &list.patterns[1] else {
            panic!("expected a variadic pattern");
        };
        assert!(matches!(rest.inner.as_deref(), Some(Pattern::Identifier(i)) if i.name == "rest"));
    }

    #[test]
    fn bare_variadic_discards_the_rest() {
        let (outcome, _) = parse_pattern("[first, ..]");
        let Outcome::Ok(Pattern::List(list)) = outcome else {
            panic!("expected a list pattern");
        };
        assert!(matches!(&list.patterns[1], Pattern::Variadic(v) if v.inner.is_none()));
    }

    #[test]
    fn empty_list_pattern() {
        let (outcome, _) = parse_pattern("[]");
        assert!(matches!(outcome, Outcome::Ok(Pattern::List(l)) if l.patterns.is_empty()));
    }

    #[test]
    fn second_variadic_is_recoverable_and_rolls_back() {
        let mut state = ParseState::new(Token::lex("[..a, ..b]").unwrap());
        let outcome = list_pattern().parse(&mut state);
        let Outcome::Recoverable(failure) = outcome else {
            panic!("expected a recoverable failure");
        };
        assert!(failure.message.contains("more than one variadic"));
        assert_eq!(failure.location.column(), Some(7));
        assert_eq!(state.position(), 0);

        let (outcome, position) = parse_pattern("(..a, ..b)");
        let Outcome::Recoverable(failure) = outcome else {
            panic!("expected a recoverable failure");
        };
        assert!(failure.message.contains("more than one variadic"));
        assert_eq!(position, 0);
    }

    #[test]
    fn non_pattern_token_is_recoverable() {
        let (outcome, position) = parse_pattern("= 1");
        let Outcome::Recoverable(failure) = outcome else {
            panic!("expected a recoverable failure");
        };
        assert_eq!(failure.message, "expected pattern, found '='");
        assert_eq!(position, 0);
    }

    #[test]
    fn one_element_tuple_needs_trailing_comma() {
        let (outcome, _) = parse_pattern("(a,)");
        assert!(matches!(outcome, Outcome::Ok(Pattern::Tuple(t)) if t.patterns.len() == 1));
    }
}
