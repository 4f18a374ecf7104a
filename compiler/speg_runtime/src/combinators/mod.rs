//! Sequence, choice, repetition and lookahead built on checkpoints.
//!
//! Each combinator opens its own checkpoint with `enter` and resolves it with
//! `commit` or `abandon`, so a failing alternative leaves no trace and the
//! next one starts from the unmodified parent frame. Bodies run through
//! [`ensure_sufficient_stack`] because rule recursion depth follows input
//! nesting depth.
//!
//! Sequencing needs no combinator: a rule body chains matches with `?`.
//!
//! ```text
//! fn assignment<'a>(ctx: &mut ParserContext<'a>) -> MatchResult<&'a str> {
//!     ctx.rule("assignment", |ctx| {
//!         let name = ctx.match_terminal("[a-z]+")?;
//!         ctx.match_literal("=")?;
//!         let value = one_of!(ctx, number, string)?;
//!         ctx.set(name, value, true);
//!         Ok(name)
//!     })
//! }
//! ```

use speg_stack::ensure_sufficient_stack;

use crate::{Expectation, Failure, MatchResult, ParserContext, Signal};

impl ParserContext<'_> {
    /// Run `f` inside a checkpoint: commit on success, abandon otherwise.
    pub fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> MatchResult<T>) -> MatchResult<T> {
        self.enter();
        let outcome = ensure_sufficient_stack(|| f(self));
        if outcome.is_ok() {
            self.commit();
        } else {
            self.abandon();
        }
        outcome
    }

    /// `f?`: a grammar failure becomes `Ok(None)` with nothing consumed.
    pub fn optional<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> MatchResult<T>,
    ) -> MatchResult<Option<T>> {
        match self.attempt(f) {
            Ok(value) => Ok(Some(value)),
            Err(Signal::Backtrack(_)) => Ok(None),
            Err(fatal) => Err(fatal),
        }
    }

    /// `f*`: repeat until `f` fails.
    ///
    /// A repetition that succeeds without consuming input ends the loop
    /// after being collected once.
    pub fn many<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> MatchResult<T>,
    ) -> MatchResult<Vec<T>> {
        let mut items = Vec::new();
        loop {
            let before = self.offset();
            match self.attempt(&mut f) {
                Ok(item) => {
                    items.push(item);
                    if self.offset() == before {
                        break;
                    }
                }
                Err(Signal::Backtrack(_)) => break,
                Err(fatal) => return Err(fatal),
            }
        }
        Ok(items)
    }

    /// `f+`: like [`many`](Self::many) but `f` must match at least once.
    pub fn many1<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> MatchResult<T>,
    ) -> MatchResult<Vec<T>> {
        let before = self.offset();
        let first = self.attempt(&mut f)?;
        let mut items = vec![first];
        if self.offset() != before {
            items.extend(self.many(f)?);
        }
        Ok(items)
    }

    /// `&f`: succeed with `f`'s value without consuming input or keeping
    /// bindings.
    pub fn lookahead<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> MatchResult<T>,
    ) -> MatchResult<T> {
        match self.speculate(f) {
            Err(Signal::Backtrack(Failure { expected, .. })) => self.raise_failure(None, expected),
            other => other,
        }
    }

    /// `!f`: succeed, consuming nothing, when `f` does not match here.
    ///
    /// `what` names the forbidden terminal or rule in the failure message.
    pub fn not_followed_by<T>(
        &mut self,
        what: &str,
        f: impl FnOnce(&mut Self) -> MatchResult<T>,
    ) -> MatchResult {
        match self.speculate(f) {
            Ok(_) => self.raise_failure(None, Expectation::Absence(what.to_owned())),
            Err(Signal::Backtrack(_)) => Ok(()),
            Err(fatal) => Err(fatal),
        }
    }

    /// Run a named rule body in a checkpoint.
    ///
    /// When the body fails without getting past its first character, the
    /// expectations it recorded there are replaced by the rule's name, so
    /// the report reads "expected number" rather than listing the rule's
    /// internal terminals.
    pub fn rule<T>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Self) -> MatchResult<T>,
    ) -> MatchResult<T> {
        let start = self.position();
        let recorded_before = self
            .tracker
            .at(start.offset)
            .map_or(0, |record| record.expected.len());
        match self.attempt(f) {
            Err(Signal::Backtrack(failure)) if failure.position.offset == start.offset => {
                let expected = Expectation::Rule(name.to_owned());
                if self.is_recording() {
                    self.tracker
                        .relabel(start.offset, recorded_before, expected.clone());
                }
                Err(Signal::Backtrack(Failure {
                    position: start,
                    expected,
                }))
            }
            other => other,
        }
    }

    /// Run `f` in a checkpoint that is always abandoned, with failure
    /// recording suspended.
    fn speculate<T>(&mut self, f: impl FnOnce(&mut Self) -> MatchResult<T>) -> MatchResult<T> {
        self.enter();
        self.lookahead_depth += 1;
        let outcome = ensure_sufficient_stack(|| f(self));
        self.lookahead_depth -= 1;
        self.abandon();
        outcome
    }
}

/// Ordered choice: try each alternative in turn from the same position.
///
/// Every alternative is a `FnOnce(&mut ParserContext) -> MatchResult<T>`
/// run through [`ParserContext::attempt`]. The first success wins; a fatal
/// signal stops the choice immediately; if all alternatives backtrack, the
/// last one's signal is returned.
///
/// ```text
/// let value = one_of!(ctx, number, string, |ctx| ctx.match_literal("null"))?;
/// ```
#[macro_export]
macro_rules! one_of {
    ($ctx:expr, $only:expr $(,)?) => {
        $ctx.attempt($only)
    };
    ($ctx:expr, $first:expr, $($rest:expr),+ $(,)?) => {
        match $ctx.attempt($first) {
            ::core::result::Result::Err($crate::Signal::Backtrack(_)) => {
                $crate::one_of!($ctx, $($rest),+)
            }
            outcome => outcome,
        }
    };
}
