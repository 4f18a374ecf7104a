//! Errors that leave the runtime.
//!
//! - [`ParseError`]: every alternative was exhausted; carries the furthest
//!   failure the parse reached.
//! - [`PatternError`]: a terminal expression does not compile. This is a bug
//!   in the generated grammar and is never subject to backtracking.
//! - [`RuntimeError`]: either of the above, returned by
//!   [`ParserContext::run`](crate::ParserContext::run).

use crate::Position;

/// The single error reported for a failed parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("parse error {message} on line {line}, column {column}, offset {offset}, content: {excerpt}")]
pub struct ParseError {
    pub message: String,
    /// Input text starting at `offset`, up to the configured width and
    /// never past the end of that line.
    pub excerpt: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }
}

/// A terminal expression that failed to compile.
#[derive(Clone, Debug, thiserror::Error)]
#[error("invalid terminal expression `{expression}`")]
pub struct PatternError {
    pub expression: String,
    #[source]
    pub source: regex_automata::meta::BuildError,
}

/// Outcome of a whole parse that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl RuntimeError {
    /// The parse error, if the grammar (not its configuration) failed.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            RuntimeError::Parse(error) => Some(error),
            RuntimeError::Pattern(_) => None,
        }
    }
}
