//! Named bindings for semantic actions.
//!
//! A binding lives in the frame that was current when it was set. Lookups
//! walk from the innermost frame outwards, so inner bindings shadow outer
//! ones. A binding reaches the enclosing scope only when its frame is
//! committed and it was set with `global = true`.

use crate::{Binding, ParserContext};

impl ParserContext<'_> {
    /// Innermost binding of `name`, if any frame has one.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.frames_innermost_first()
            .find_map(|frame| frame.binding(name))
            .map(|binding| binding.value.as_str())
    }

    /// Innermost binding of `name`, or `default`.
    pub fn get<'s>(&'s self, name: &str, default: &'s str) -> &'s str {
        self.lookup(name).unwrap_or(default)
    }

    /// Bind `name` in the current frame, replacing any binding there.
    ///
    /// `global` only matters when this frame is committed: global bindings
    /// are copied into the parent, others are dropped with the frame.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>, global: bool) {
        self.frame_mut().bind(name.into(), Binding::new(value, global));
    }
}
