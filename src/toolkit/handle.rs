use std::fmt;

/// Opaque handle to a native toolkit object.
///
/// Uses a generational index design:
/// - `index`: Position in the toolkit's object table (reusable after deletion)
/// - `generation`: Version counter that increments when a slot is reused
///
/// A handle to a deleted object therefore stays detectably stale instead of
/// silently aliasing whatever object is allocated in the same slot later.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeHandle {
    index: u32,
    generation: u32,
}

impl NodeHandle {
    /// Create a handle from its raw parts.
    ///
    /// Intended for [`Toolkit`](super::Toolkit) implementations; views only
    /// ever receive handles from the toolkit.
    pub const fn from_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub const fn index(self) -> u32 {
        self.index
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Convert to a u64 for external use (e.g. toolkit user data).
    /// Combines generation (high bits) with index (low bits).
    pub const fn as_u64(self) -> u64 {
        ((self.generation as u64) << 32) | (self.index as u64)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}
