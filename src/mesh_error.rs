//! MeshError: Unified error type for mesh-incidence public APIs
//!
//! Invariant violations (wrong kind for a dimension, wrong vertex count, stale
//! handles) are reported through this type instead of panicking. Lookups that
//! can legitimately miss, such as a region by name, return `Option` instead.

use thiserror::Error;

use crate::topology::element_id::{ElementId, RegionId, ViewId};
use crate::topology::element_kind::ElementKind;

/// Unified error type for mesh-incidence operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The kind cannot be created or queried at the requested dimension.
    #[error("unsupported element kind `{kind}` for topological dimension {dimension}")]
    UnsupportedKind { kind: ElementKind, dimension: usize },
    /// A fixed-arity kind received the wrong number of vertices.
    #[error("element kind `{kind}` expects {expected} vertices, found {found}")]
    VertexCountMismatch {
        kind: ElementKind,
        expected: usize,
        found: usize,
    },
    /// Topological dimension beyond the supported range (0..=3).
    #[error("topological dimension {0} is out of range (0..=3)")]
    DimensionOutOfRange(usize),
    /// The handle does not name a live element of this hierarchy.
    #[error("element {0} does not exist (never created or erased)")]
    InvalidElement(ElementId),
    /// A vertex was required.
    #[error("element {0} is not a vertex")]
    NotAVertex(ElementId),
    /// A PLC element was required.
    #[error("element {0} is not a PLC")]
    NotAPlc(ElementId),
    /// The region id is not defined on this hierarchy.
    #[error("region {0} does not exist")]
    UnknownRegion(RegionId),
    /// The view id is not defined on this hierarchy.
    #[error("view {0} does not exist")]
    UnknownView(ViewId),
    /// A point does not match the hierarchy's geometric dimension.
    #[error("point has dimension {found}, hierarchy expects {expected}")]
    GeometricDimensionMismatch { expected: usize, found: usize },
    /// Geometric dimension outside 1..=3.
    #[error("geometric dimension {0} is not supported (expected 1..=3)")]
    InvalidGeometricDimension(usize),
    /// Neighbor query whose connector dimension equals the element or target dimension.
    #[error(
        "connector dimension {connector} cannot link elements of dimension {element} to dimension {target}"
    )]
    InvalidConnector {
        element: usize,
        connector: usize,
        target: usize,
    },
    /// An element's vertex list names the same vertex twice.
    #[error("vertex {0} appears more than once in an element's vertex list")]
    DuplicateVertex(ElementId),
    /// Every `u32` index of a dimension has been handed out.
    #[error("no free element index left at topological dimension {0}")]
    CapacityExceeded(usize),
    /// Internal consistency check failed.
    #[error("inconsistent hierarchy: {0}")]
    Inconsistent(String),
}
