//! Backtracking checkpoints.
//!
//! A [`Frame`] is what `enter` pushes: a position plus the bindings made
//! since. Frames never point at each other; the context owns them as a
//! plain stack, and `commit` folds the top frame into the one below.

use rustc_hash::FxHashMap;

use crate::Position;

/// A named value set by a semantic action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub value: String,
    /// Copied into the parent frame when the owning frame is committed.
    pub global: bool,
}

impl Binding {
    pub fn new(value: impl Into<String>, global: bool) -> Self {
        Binding {
            value: value.into(),
            global,
        }
    }
}

/// One transactional checkpoint on the context's frame stack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    position: Position,
    bindings: FxHashMap<String, Binding>,
    committed: bool,
}

impl Frame {
    /// The frame every parse starts with: offset 0, line 1, column 1.
    pub(crate) fn root() -> Self {
        Frame::default()
    }

    /// A fresh checkpoint at `parent`'s position, with no bindings.
    pub(crate) fn child_of(parent: &Frame) -> Self {
        Frame {
            position: parent.position,
            bindings: FxHashMap::default(),
            committed: false,
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub(crate) fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    /// Whether the most recent attempt opened on this frame was committed.
    #[inline]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub(crate) fn reset_committed(&mut self) {
        self.committed = false;
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Bindings made directly in this frame, in no particular order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(name, b)| (name.as_str(), b))
    }

    pub(crate) fn bind(&mut self, name: String, binding: Binding) {
        self.bindings.insert(name, binding);
    }

    /// Fold a committed child into this frame.
    ///
    /// Global bindings overwrite same-named values here (an existing
    /// binding keeps its own `global` flag); local bindings are dropped.
    /// The child's position becomes this frame's position.
    pub(crate) fn absorb(&mut self, child: Frame) {
        for (name, binding) in child.bindings {
            if !binding.global {
                continue;
            }
            match self.bindings.get_mut(&name) {
                Some(existing) => existing.value = binding.value,
                None => {
                    self.bindings.insert(name, binding);
                }
            }
        }
        self.position = child.position;
        self.committed = true;
    }
}
