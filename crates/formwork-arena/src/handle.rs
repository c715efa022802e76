//! Generational node handles.
//!
//! A [`NodeId`] encodes a slot index plus the slot's generation at the
//! time the node was created. The generation allows O(1) staleness
//! checks without a lookup table: removing a node bumps its slot's
//! generation, so every outstanding handle to it goes stale at once.

use std::fmt;

/// An opaque, copyable handle to a participant node.
///
/// Handles never own the node they point to. A handle whose node has
/// been removed is *stale*: arena reads return `None` for it and engine
/// mutations through it are no-ops. Slot reuse cannot resurrect a stale
/// handle because the reused slot carries a newer generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The slot generation this handle was created under.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@{})", self.index, self.generation)
    }
}
