//! Failure propagation as a value.
//!
//! Every matching operation returns [`MatchResult`]. A mismatch travels up
//! through `?` as [`Signal::Backtrack`] until a combinator that opened a
//! checkpoint catches it, abandons its frame and tries something else. A
//! terminal that cannot even be compiled travels as [`Signal::Fatal`], which
//! combinators never catch.
//!
//! | Variant | Cause | Caught by choice/optional/repeat |
//! |---------|-------|----------------------------------|
//! | `Backtrack` | grammar did not match here | yes |
//! | `Fatal` | invalid terminal expression | no |

use std::fmt;

use crate::{PatternError, Position};

/// What the grammar wanted at a failure point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expectation {
    /// A terminal pattern, by its source expression.
    Pattern(String),
    /// An exact piece of text.
    Literal(String),
    /// A named grammar rule.
    Rule(String),
    EndOfInput,
    /// Anything that does not start with the described terminal or rule
    /// (a negative lookahead that matched).
    Absence(String),
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Pattern(expr) => write!(f, "`{expr}`"),
            Expectation::Literal(text) => write!(f, "{text:?}"),
            Expectation::Rule(name) => f.write_str(name),
            Expectation::EndOfInput => f.write_str("end of input"),
            Expectation::Absence(what) => write!(f, "anything but `{what}`"),
        }
    }
}

/// Payload of a grammar failure: where it happened and what was expected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// Position of the frame that failed.
    pub position: Position,
    pub expected: Expectation,
}

/// Non-local exit from a matching operation.
#[derive(Debug)]
pub enum Signal {
    /// Recoverable: unwind to the nearest checkpoint and try an alternative.
    Backtrack(Failure),
    /// Programmer error in the grammar; aborts the whole parse.
    Fatal(PatternError),
}

impl Signal {
    /// Returns `true` for a recoverable grammar failure.
    #[inline]
    pub fn is_backtrack(&self) -> bool {
        matches!(self, Signal::Backtrack(_))
    }

    /// The failure payload, if this is a grammar failure.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Signal::Backtrack(failure) => Some(failure),
            Signal::Fatal(_) => None,
        }
    }

    pub fn into_failure(self) -> Option<Failure> {
        match self {
            Signal::Backtrack(failure) => Some(failure),
            Signal::Fatal(_) => None,
        }
    }
}

impl From<PatternError> for Signal {
    fn from(error: PatternError) -> Self {
        Signal::Fatal(error)
    }
}

/// Result of every matching operation and generated rule function.
pub type MatchResult<T = ()> = Result<T, Signal>;
