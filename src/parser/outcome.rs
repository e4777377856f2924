//! The three-way result every parsing operation returns.
//!
//! A [`Outcome::Recoverable`] failure means "this alternative does not match
//! here": enclosing choices roll back and try a sibling. A [`Outcome::Fatal`]
//! failure means the grammar had already committed to a production, so the
//! whole parse is abandoned and the failure is reported as-is.

use std::fmt;

use thiserror::Error;

use crate::lexer::Location;

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub location: Location,
    pub message: String,
}

impl Failure {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ok(T),
    Recoverable(Failure),
    Fatal(Failure),
}

impl<T> Outcome<T> {
    pub fn recoverable(location: Location, message: impl Into<String>) -> Self {
        Outcome::Recoverable(Failure::new(location, message))
    }

    pub fn fatal(location: Location, message: impl Into<String>) -> Self {
        Outcome::Fatal(Failure::new(location, message))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    /// True for both kinds of failure.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Outcome::Fatal(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Recoverable(failure) | Outcome::Fatal(failure) => Some(failure),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Recoverable(failure) => Outcome::Recoverable(failure),
            Outcome::Fatal(failure) => Outcome::Fatal(failure),
        }
    }

    /// Re-types a failure. Calling this on `Ok` is a bug in the caller.
    pub fn transmute<U>(self) -> Outcome<U> {
        match self {
            Outcome::Ok(_) => panic!("cannot transmute a successful outcome"),
            Outcome::Recoverable(failure) => Outcome::Recoverable(failure),
            Outcome::Fatal(failure) => Outcome::Fatal(failure),
        }
    }

    /// Commits a recoverable failure. `Ok` and `Fatal` pass through.
    pub fn make_fatal(self) -> Self {
        match self {
            Outcome::Recoverable(failure) => Outcome::Fatal(failure),
            other => other,
        }
    }

    /// Like [`Outcome::make_fatal`], replacing the message of a committed
    /// recoverable failure.
    pub fn make_fatal_with(self, message: impl Into<String>) -> Self {
        match self {
            Outcome::Recoverable(failure) => {
                Outcome::Fatal(Failure::new(failure.location, message))
            }
            other => other,
        }
    }

    pub fn into_result(self) -> Result<T, ParseError> {
        match self {
            Outcome::Ok(value) => Ok(value),
            Outcome::Recoverable(failure) => Err(ParseError {
                severity: Severity::Recoverable,
                failure,
            }),
            Outcome::Fatal(failure) => Err(ParseError {
                severity: Severity::Fatal,
                failure,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// No production ever committed; the message is a generic one.
    Recoverable,
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{failure}")]
pub struct ParseError {
    pub severity: Severity,
    pub failure: Failure,
}

impl ParseError {
    pub fn location(&self) -> &Location {
        &self.failure.location
    }

    pub fn message(&self) -> &str {
        &self.failure.message
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}
