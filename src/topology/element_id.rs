//! Lightweight handles for elements, regions and views.
//!
//! An [`ElementId`] is a `(dimension, index)` pair: indices are dense per
//! dimension and are only meaningful together with the
//! [`MeshHierarchy`](crate::topology::hierarchy::MeshHierarchy) that issued
//! them. Erased elements leave a tombstone, so an index is never reused and a
//! stale handle is detected instead of silently aliasing a newer element.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to an element of one topological dimension.
///
/// Ordering is by dimension first, then by creation index.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId {
    dim: u8,
    index: u32,
}

impl ElementId {
    /// `dim` must fit in a `u8`.
    #[inline]
    pub const fn new(dim: usize, index: u32) -> Self {
        debug_assert!(dim <= u8::MAX as usize);
        ElementId {
            dim: dim as u8,
            index,
        }
    }

    /// Topological dimension of the element.
    #[inline]
    pub const fn dimension(self) -> usize {
        self.dim as usize
    }

    /// Creation index within the element's dimension.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementId")
            .field(&self.dim)
            .field(&self.index)
            .finish()
    }
}

/// Prints `dim:index`.
impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.dim, self.index)
    }
}

/// Region identifier, unique within one hierarchy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RegionId(pub u32);

/// View identifier, unique within one hierarchy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ViewId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::{assert_eq_size, assert_impl_all};

    assert_eq_size!(ElementId, u64);
    assert_eq_size!(RegionId, u32);
    assert_impl_all!(ElementId: Copy, Send, Sync, Ord, std::hash::Hash);
}
