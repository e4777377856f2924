//! Packrat memoization.
//!
//! Every memoized grammar production has a [`Rule`] identity. The table maps
//! `(rule, start position, indentation level)` to the outcome the rule
//! produced there and the position it finished at, so that a rule is run at
//! most once per position within a parse. Node values are stored in the
//! closed [`Cached`] enum; [`Memoize`] converts between it and the concrete
//! node types.

use std::collections::HashMap;

use crate::ast::expression::Expression;
use crate::ast::pattern::Pattern;
use crate::ast::statement::{Path, Statement};
use crate::ast::types::TypeExpression;
use crate::ast::{
    MemberDeclaration, MessageHandlerDeclaration, Parameter, Program, StructDeclaration,
    StructItem,
};

use super::outcome::Outcome;

/// Identity of a memoized grammar production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Program,
    StructDeclaration,
    StructItem,
    MemberDeclaration,
    MessageHandlerDeclaration,
    Parameters,
    Statement,
    StatementBlock,
    Path,
    Expression,
    IfExpression,
    Application,
    Xor,
    Or,
    And,
    Equality,
    Relation,
    Additive,
    Multiplicative,
    Unary,
    Property,
    Atom,
    Pattern,
    TypeExpression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cached {
    Program(Program),
    StructDeclaration(StructDeclaration),
    StructItem(StructItem),
    MemberDeclaration(MemberDeclaration),
    MessageHandlerDeclaration(MessageHandlerDeclaration),
    Parameters(Vec<Parameter>),
    Statement(Statement),
    Statements(Vec<Statement>),
    Path(Path),
    Expression(Expression),
    Pattern(Pattern),
    TypeExpression(TypeExpression),
}

pub trait Memoize: Clone + Sized {
    fn into_cached(self) -> Cached;
    fn from_cached(cached: &Cached) -> Option<Self>;
}

macro_rules! memoize {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl Memoize for $ty {
                fn into_cached(self) -> Cached {
                    Cached::$variant(self)
                }

                fn from_cached(cached: &Cached) -> Option<Self> {
                    match cached {
                        Cached::$variant(value) => Some(value.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

memoize!(
    Program => Program,
    StructDeclaration => StructDeclaration,
    StructItem => StructItem,
    MemberDeclaration => MemberDeclaration,
    MessageHandlerDeclaration => MessageHandlerDeclaration,
    Parameters => Vec<Parameter>,
    Statement => Statement,
    Statements => Vec<Statement>,
    Path => Path,
    Expression => Expression,
    Pattern => Pattern,
    TypeExpression => TypeExpression,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemoKey {
    rule: Rule,
    position: usize,
    indent: usize,
}

#[derive(Debug, Clone)]
struct MemoEntry {
    outcome: Outcome<Cached>,
    end: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: usize,
    pub misses: usize,
}

/// Append-only for the lifetime of one parse.
#[derive(Debug, Default)]
pub struct MemoTable {
    entries: HashMap<MemoKey, MemoEntry>,
    stats: MemoStats,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached outcome and end position for `rule` at `position`.
    pub fn lookup<T: Memoize>(
        &mut self,
        rule: Rule,
        position: usize,
        indent: usize,
    ) -> Option<(Outcome<T>, usize)> {
        let key = MemoKey {
            rule,
            position,
            indent,
        };
        let Some(entry) = self.entries.get(&key) else {
            self.stats.misses += 1;
            return None;
        };
        self.stats.hits += 1;

        let outcome = match &entry.outcome {
            Outcome::Ok(cached) => match T::from_cached(cached) {
                Some(value) => Outcome::Ok(value),
                None => unreachable!("memo entry for {rule:?} holds a different node type"),
            },
            Outcome::Recoverable(failure) => Outcome::Recoverable(failure.clone()),
            Outcome::Fatal(failure) => Outcome::Fatal(failure.clone()),
        };
        Some((outcome, entry.end))
    }

    pub fn store<T: Memoize>(
        &mut self,
        rule: Rule,
        position: usize,
        indent: usize,
        outcome: &Outcome<T>,
        end: usize,
    ) {
        let key = MemoKey {
            rule,
            position,
            indent,
        };
        let outcome = outcome.clone().map(Memoize::into_cached);
        self.entries.entry(key).or_insert(MemoEntry { outcome, end });
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ast::pattern::IgnorePattern;
    use crate::lexer::Location;

    fn ignore() -> Pattern {
        Pattern::Ignore(IgnorePattern {
            location: Location::concrete(Arc::from("t"), 1, 1, 0),
        })
    }

    #[test]
    fn lookup_returns_stored_outcome_and_end() {
        let mut table = MemoTable::new();
        assert!(table.lookup::<Pattern>(Rule::Pattern, 3, 0).is_none());

        table.store(Rule::Pattern, 3, 0, &Outcome::Ok(ignore()), 4);
        let (outcome, end) = table.lookup::<Pattern>(Rule::Pattern, 3, 0).unwrap();
        assert_eq!(outcome, Outcome::Ok(ignore()));
        assert_eq!(end, 4);
        assert_eq!(table.stats(), MemoStats { hits: 1, misses: 1 });
    }

    #[test]
    fn entries_are_keyed_by_rule_position_and_indent() {
        let mut table = MemoTable::new();
        table.store(Rule::Pattern, 3, 0, &Outcome::Ok(ignore()), 4);

        assert!(table.lookup::<Pattern>(Rule::Pattern, 2, 0).is_none());
        assert!(table.lookup::<Expression>(Rule::Expression, 3, 0).is_none());
        assert!(table.lookup::<Pattern>(Rule::Pattern, 3, 5).is_none());
    }

    #[test]
    fn first_entry_wins() {
        let mut table = MemoTable::new();
        table.store(Rule::Pattern, 0, 0, &Outcome::Ok(ignore()), 1);
        table.store::<Pattern>(
            Rule::Pattern,
            0,
            0,
            &Outcome::recoverable(Location::generated(Arc::from("t")), "late"),
            0,
        );
        let (outcome, _) = table.lookup::<Pattern>(Rule::Pattern, 0, 0).unwrap();
        assert!(outcome.is_ok());
        assert_eq!(table.len(), 1);
    }
}
