//! Input positions: byte offset plus 1-based line and column.
//!
//! Columns count code points, not bytes. Only `\n` starts a new line; a
//! `\r\n` pair therefore advances the column once for the `\r` before the
//! line break resets it.

use std::fmt;

/// A location in the input text.
///
/// Invariant: `offset` lies on a char boundary of the input it was derived
/// from, and `line`/`column` agree with the newlines in `input[..offset]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Byte offset into the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, in code points.
    pub column: usize,
}

impl Position {
    /// The start of any input.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Move past `consumed`, which must be the text directly at `self.offset`.
    pub fn advance(&mut self, consumed: &str) {
        let bytes = consumed.as_bytes();
        self.offset += bytes.len();
        match memchr::memrchr(b'\n', bytes) {
            Some(last_newline) => {
                self.line += memchr::memchr_iter(b'\n', bytes).count();
                self.column = 1 + consumed[last_newline + 1..].chars().count();
            }
            None => self.column += consumed.chars().count(),
        }
    }

    /// Copy of `self` advanced past `consumed`.
    #[must_use]
    pub fn after(mut self, consumed: &str) -> Self {
        self.advance(consumed);
        self
    }

    /// Derive the position of `offset` by scanning `input` from the start.
    ///
    /// `offset` is clamped to the input length and, inside a multi-byte
    /// character, moved back to that character's start.
    pub fn locate(input: &str, offset: usize) -> Self {
        let mut offset = offset.min(input.len());
        while !input.is_char_boundary(offset) {
            offset -= 1;
        }
        Self::START.after(&input[..offset])
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {}, offset {}",
            self.line, self.column, self.offset
        )
    }
}

/// Up to `width` characters of `input` starting at `offset`, cut before the
/// first newline.
pub(crate) fn excerpt(input: &str, offset: usize, width: usize) -> &str {
    let rest = input.get(offset..).unwrap_or_default();
    let end = rest
        .char_indices()
        .take(width)
        .find(|&(_, c)| c == '\n')
        .or_else(|| rest.char_indices().nth(width))
        .map_or(rest.len(), |(idx, _)| idx);
    &rest[..end]
}

/// The next `width` characters at `offset` with control characters escaped,
/// or `None` at the end of input.
pub(crate) fn lookahead_text(input: &str, offset: usize, width: usize) -> Option<String> {
    let rest = input.get(offset..).filter(|rest| !rest.is_empty())?;
    Some(
        rest.chars()
            .take(width)
            .flat_map(char::escape_debug)
            .collect(),
    )
}
