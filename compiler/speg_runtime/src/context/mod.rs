//! The parse context: input, frame stack, failure tracker, pattern cache.
//!
//! # Frame stack
//!
//! The stack is never empty. The current (top) frame lives in `frame`; the
//! frames below it are kept in `saved`, root first.
//!
//! ```text
//! enter()   saved: [root]        frame: child (copy of root's position)
//! commit()  saved: []            frame: root  <- child's globals + position
//! abandon() saved: []            frame: root  (unchanged since enter)
//! ```
//!
//! Copy-on-enter with an explicit fold on commit means a failed attempt
//! needs no undo: dropping its frame restores the parent exactly.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{error, trace, warn};

use crate::position::{excerpt, lookahead_text};
use crate::{
    ErrorTracker, Expectation, Failure, Frame, MatchResult, ParseError, PatternCache, Position,
    RuntimeConfig, RuntimeError, Signal,
};

/// State of one parse of one input.
///
/// Not shared between parses; run independent parses with one context each.
pub struct ParserContext<'a> {
    input: &'a str,
    /// Current frame.
    frame: Frame,
    /// Frames below the current one, root first.
    saved: Vec<Frame>,
    pub(crate) tracker: ErrorTracker,
    pub(crate) patterns: PatternCache,
    config: RuntimeConfig,
    /// Number of lookaheads currently open.
    pub(crate) lookahead_depth: usize,
}

impl<'a> ParserContext<'a> {
    /// Create a context with the root frame at offset 0, line 1, column 1.
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, RuntimeConfig::default())
    }

    pub fn with_config(input: &'a str, config: RuntimeConfig) -> Self {
        ParserContext {
            input,
            frame: Frame::root(),
            saved: Vec::new(),
            tracker: ErrorTracker::new(),
            patterns: PatternCache::new(),
            config,
            lookahead_depth: 0,
        }
    }

    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Number of frames on the stack, root included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len() + 1
    }

    /// Position of the current frame.
    #[inline]
    pub fn position(&self) -> Position {
        self.frame.position()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.frame.position().offset
    }

    /// Unconsumed input from the current offset.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.offset()..]
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset() == self.input.len()
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frame
    }

    /// The outermost frame.
    pub fn root_frame(&self) -> &Frame {
        self.saved.first().unwrap_or(&self.frame)
    }

    pub fn tracker(&self) -> &ErrorTracker {
        &self.tracker
    }

    pub fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    /// Frames from innermost to outermost.
    pub(crate) fn frames_innermost_first(&self) -> impl Iterator<Item = &Frame> {
        std::iter::once(&self.frame).chain(self.saved.iter().rev())
    }

    pub(crate) fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    // === Transactions ===

    /// Open a checkpoint at the current position.
    ///
    /// Clears the committed flag of the frame being saved, so that after the
    /// matching `commit`/`abandon` [`is_committed`](Self::is_committed) tells
    /// whether this attempt was accepted.
    pub fn enter(&mut self) {
        self.frame.reset_committed();
        let child = Frame::child_of(&self.frame);
        let parent = std::mem::replace(&mut self.frame, child);
        self.saved.push(parent);
        trace!(depth = self.depth(), offset = self.offset(), "enter");
    }

    /// Accept the current checkpoint: fold it into its parent and pop it.
    ///
    /// Global bindings and the position flow to the parent, which is then
    /// marked committed. Requires a checkpoint opened by [`enter`](Self::enter).
    pub fn commit(&mut self) {
        debug_assert!(!self.saved.is_empty(), "commit on the root frame");
        let Some(parent) = self.saved.pop() else {
            error!("commit without a matching enter; ignored");
            return;
        };
        let child = std::mem::replace(&mut self.frame, parent);
        self.frame.absorb(child);
        trace!(depth = self.depth(), offset = self.offset(), "commit");
    }

    /// Reject the current checkpoint: pop it without touching its parent.
    ///
    /// Position and bindings are exactly as they were before the matching
    /// [`enter`](Self::enter).
    pub fn abandon(&mut self) {
        debug_assert!(!self.saved.is_empty(), "abandon on the root frame");
        let Some(parent) = self.saved.pop() else {
            error!("abandon without a matching enter; ignored");
            return;
        };
        let discarded = std::mem::replace(&mut self.frame, parent);
        trace!(
            depth = self.depth(),
            offset = self.offset(),
            discarded_offset = discarded.position().offset,
            "abandon"
        );
    }

    /// Committed flag of the current frame.
    #[inline]
    pub fn is_committed(&self) -> bool {
        self.frame.is_committed()
    }

    // === Failures ===

    /// Record a grammar failure at the current position and return the
    /// signal that unwinds to the nearest checkpoint.
    ///
    /// Without a `message`, the report reads
    /// ``expected <expected>, found `<next characters>` ``.
    pub fn raise_failure<T>(
        &mut self,
        message: Option<String>,
        expected: Expectation,
    ) -> MatchResult<T> {
        let position = self.frame.position();
        Err(self.fail_at(position, message, expected))
    }

    fn fail_at(
        &mut self,
        position: Position,
        message: Option<String>,
        expected: Expectation,
    ) -> Signal {
        if self.is_recording() {
            let found = lookahead_text(self.input, position.offset, self.config.found_width);
            self.tracker.record(position, expected.clone(), message, found);
        }
        trace!(offset = position.offset, %expected, "fail");
        Signal::Backtrack(Failure { position, expected })
    }

    /// Fail unless the current frame has consumed the whole input.
    ///
    /// At top level the current frame is the root; a start rule may also
    /// call this from inside its own checkpoint.
    pub fn eof_check(&mut self) -> MatchResult {
        if self.is_at_end() {
            return Ok(());
        }
        self.raise_failure(None, Expectation::EndOfInput)
    }

    /// Build the reported error from the furthest recorded failure.
    pub fn finalize(&self) -> ParseError {
        match self.tracker.furthest() {
            Some(record) => self.error_at(record.position, record.message()),
            None => self.error_at(self.position(), "unexpected end of input".to_owned()),
        }
    }

    fn error_at(&self, position: Position, message: String) -> ParseError {
        ParseError {
            message,
            excerpt: excerpt(self.input, position.offset, self.config.excerpt_width).to_owned(),
            offset: position.offset,
            line: position.line,
            column: position.column,
        }
    }

    /// Whether failures raised now go into the tracker.
    pub(crate) fn is_recording(&self) -> bool {
        self.lookahead_depth == 0 || self.config.record_lookahead_failures
    }

    // === Driver ===

    /// Run `start` as the grammar's start rule, then require end of input.
    ///
    /// Whatever happens, the stack is back to the root frame afterwards.
    pub fn run<T>(
        &mut self,
        start: impl FnOnce(&mut Self) -> MatchResult<T>,
    ) -> Result<T, RuntimeError> {
        let outcome = speg_stack::ensure_sufficient_stack(|| start(self));
        self.unwind_to_root();
        match outcome.and_then(|value| self.eof_check().map(|()| value)) {
            Ok(value) => Ok(value),
            Err(Signal::Backtrack(_)) => Err(self.finalize().into()),
            Err(Signal::Fatal(error)) => Err(error.into()),
        }
    }

    fn unwind_to_root(&mut self) {
        if self.saved.is_empty() {
            return;
        }
        warn!(
            depth = self.depth(),
            "start rule left checkpoints open; abandoning them"
        );
        self.saved.truncate(1);
        if let Some(root) = self.saved.pop() {
            self.frame = root;
        }
    }
}

/// Parse `input` with a fresh context and the default configuration.
pub fn parse<'a, T>(
    input: &'a str,
    start: impl FnOnce(&mut ParserContext<'a>) -> MatchResult<T>,
) -> Result<T, RuntimeError> {
    ParserContext::new(input).run(start)
}

/// `ParserContext(<consumed>*<remaining>, {name: value, ...})`, with the
/// marker at the current frame and bindings as `get` would resolve them.
impl fmt::Display for ParserContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (consumed, rest) = self.input.split_at(self.offset());
        let mut visible = BTreeMap::new();
        for frame in self.frames_innermost_first() {
            for (name, binding) in frame.bindings() {
                visible.entry(name).or_insert(binding.value.as_str());
            }
        }
        write!(f, "ParserContext({consumed}*{rest}, {visible:?})")
    }
}

impl fmt::Debug for ParserContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserContext")
            .field("position", &self.position())
            .field("depth", &self.depth())
            .field("failures", &self.tracker.len())
            .field("patterns", &self.patterns.len())
            .finish_non_exhaustive()
    }
}
