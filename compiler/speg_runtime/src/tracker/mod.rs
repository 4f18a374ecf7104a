//! Furthest-failure bookkeeping.
//!
//! Every recorded grammar failure lands in a per-offset [`FailureRecord`].
//! When the parse ultimately fails, the record at the greatest offset is the
//! one reported: the deepest point the input was understood up to is almost
//! always the most useful place to point at.
//!
//! Same-offset failures accumulate: synthesized expectations merge into one
//! list (`expected `a` or `b``), while a custom message replaces any
//! earlier one.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::{Expectation, Position};

/// Everything known about failures at one offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureRecord {
    pub position: Position,
    /// Distinct expectations, in the order they were first seen.
    pub expected: SmallVec<[Expectation; 2]>,
    /// Message supplied by the grammar, overriding the synthesized one.
    pub custom: Option<String>,
    /// Upcoming input at `position`; `None` at the end of input.
    pub found: Option<String>,
}

impl FailureRecord {
    fn new(position: Position, found: Option<String>) -> Self {
        FailureRecord {
            position,
            expected: SmallVec::new(),
            custom: None,
            found,
        }
    }

    fn expect(&mut self, expectation: Expectation) {
        if !self.expected.contains(&expectation) {
            self.expected.push(expectation);
        }
    }

    /// The human message for this record.
    pub fn message(&self) -> String {
        if let Some(custom) = &self.custom {
            return custom.clone();
        }
        let found = match &self.found {
            Some(text) => format!("`{text}`"),
            None => "end of input".to_owned(),
        };
        match self.expected.as_slice() {
            [] => format!("unexpected {found}"),
            [only] => format!("expected {only}, found {found}"),
            [init @ .., last] => {
                let init: Vec<String> = init.iter().map(ToString::to_string).collect();
                format!("expected {} or {last}, found {found}", init.join(", "))
            }
        }
    }
}

/// Per-parse failure map plus the furthest offset seen.
#[derive(Debug, Default)]
pub struct ErrorTracker {
    records: FxHashMap<usize, FailureRecord>,
    furthest: Option<usize>,
}

impl ErrorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure at `position`.
    ///
    /// `found` describes the input at `position` and is only used when this
    /// is the first failure at that offset.
    pub fn record(
        &mut self,
        position: Position,
        expected: Expectation,
        custom: Option<String>,
        found: Option<String>,
    ) {
        let offset = position.offset;
        let record = self
            .records
            .entry(offset)
            .or_insert_with(|| FailureRecord::new(position, found));
        record.expect(expected);
        if custom.is_some() {
            record.custom = custom;
        }

        if !matches!(self.furthest, Some(furthest) if furthest >= offset) {
            debug!(
                offset,
                line = position.line,
                column = position.column,
                "new furthest failure"
            );
            self.furthest = Some(offset);
        }
    }

    /// Replace the expectations added at `offset` after the first `keep`
    /// with `label`. No-op when nothing is recorded at `offset`.
    pub fn relabel(&mut self, offset: usize, keep: usize, label: Expectation) {
        if let Some(record) = self.records.get_mut(&offset) {
            record.expected.truncate(keep);
            record.expect(label);
        }
    }

    /// The record at the greatest offset.
    pub fn furthest(&self) -> Option<&FailureRecord> {
        self.furthest.and_then(|offset| self.records.get(&offset))
    }

    pub fn at(&self, offset: usize) -> Option<&FailureRecord> {
        self.records.get(&offset)
    }

    /// Number of distinct offsets with a recorded failure.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests;
