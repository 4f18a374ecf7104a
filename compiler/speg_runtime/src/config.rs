//! Per-parse settings.

/// Knobs for diagnostics produced by a [`ParserContext`](crate::ParserContext).
///
/// ```text
/// let config = RuntimeConfig::default()
///     .with_found_width(8)
///     .with_excerpt_width(60);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Characters of input quoted after "found" in synthesized messages.
    pub found_width: usize,
    /// Characters of input copied into [`ParseError::excerpt`](crate::ParseError).
    pub excerpt_width: usize,
    /// Record failures raised inside lookaheads in the error tracker.
    ///
    /// Off by default: a lookahead's internal mismatch describes the
    /// grammar's probing, not what the input lacks.
    pub record_lookahead_failures: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            found_width: 4,
            excerpt_width: 32,
            record_lookahead_failures: false,
        }
    }
}

impl RuntimeConfig {
    #[must_use]
    pub fn with_found_width(mut self, width: usize) -> Self {
        self.found_width = width;
        self
    }

    #[must_use]
    pub fn with_excerpt_width(mut self, width: usize) -> Self {
        self.excerpt_width = width;
        self
    }

    #[must_use]
    pub fn with_lookahead_failures(mut self, record: bool) -> Self {
        self.record_lookahead_failures = record;
        self
    }
}
