//! Terminal matching and the compiled-pattern cache.
//!
//! Terminal expressions are regular expressions (`regex` syntax), matched
//! anchored at the current offset. The search sees the whole input, so
//! look-around assertions such as `\b` and `^` account for the text before
//! the offset. Each distinct expression is compiled once per context.

use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{Expectation, MatchResult, ParserContext, PatternError, Signal};

/// Compiled terminals keyed by their exact source expression.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: FxHashMap<String, Regex>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled form of `expression`, compiling it on first use.
    pub fn get_or_compile(&mut self, expression: &str) -> Result<&Regex, PatternError> {
        if !self.compiled.contains_key(expression) {
            let regex = Regex::new(expression).map_err(|source| PatternError {
                expression: expression.to_owned(),
                source,
            })?;
            debug!(expression, cached = self.compiled.len() + 1, "compiled terminal");
            self.compiled.insert(expression.to_owned(), regex);
        }
        Ok(&self.compiled[expression])
    }

    pub fn contains(&self, expression: &str) -> bool {
        self.compiled.contains_key(expression)
    }

    /// Number of distinct expressions compiled so far.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

impl<'a> ParserContext<'a> {
    /// Match the terminal `expression` at the current offset.
    ///
    /// On a match the current frame advances past the matched text, which is
    /// returned. On a mismatch a failure is raised and the frame is left
    /// untouched. An expression that does not compile is fatal.
    pub fn match_terminal(&mut self, expression: &str) -> MatchResult<&'a str> {
        let (input, offset) = (self.input(), self.offset());
        let regex = self.patterns.get_or_compile(expression).map_err(Signal::Fatal)?;
        let search = Input::new(input).range(offset..).anchored(Anchored::Yes);
        match regex.find(search) {
            Some(found) => Ok(self.consume(&input[offset..found.end()])),
            None => self.raise_failure(None, Expectation::Pattern(expression.to_owned())),
        }
    }

    /// Match `text` exactly at the current offset, without the pattern cache.
    pub fn match_literal(&mut self, text: &str) -> MatchResult<&'a str> {
        let rest = self.remaining();
        if rest.starts_with(text) {
            Ok(self.consume(&rest[..text.len()]))
        } else {
            self.raise_failure(None, Expectation::Literal(text.to_owned()))
        }
    }

    /// Negative lookahead on a terminal: succeed, consuming nothing, when
    /// `expression` does not match here.
    ///
    /// The inner mismatch is only recorded in the error tracker when
    /// [`RuntimeConfig::record_lookahead_failures`](crate::RuntimeConfig) is
    /// set; by default only a failed `not` itself is reported.
    pub fn not(&mut self, expression: &str) -> MatchResult {
        self.not_followed_by(expression, |ctx| ctx.match_terminal(expression))
    }

    fn consume(&mut self, matched: &'a str) -> &'a str {
        self.frame_mut().position_mut().advance(matched);
        trace!(matched, offset = self.offset(), "terminal matched");
        matched
    }
}

#[cfg(test)]
mod tests;
