#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-incidence
//!
//! mesh-incidence is a topology engine for finite-element and finite-volume
//! meshes. It stores vertices, lines, facets and cells of several kinds in one
//! [`MeshHierarchy`](topology::MeshHierarchy), derives and deduplicates the
//! boundary of every element on insertion, and answers incidence queries
//! through lazy ranges.
//!
//! ## Features
//! - Element kinds: vertex, line, triangle, quadrilateral, polygon, PLC,
//!   tetrahedron and hexahedron
//! - Cascading boundary creation with vertex-set deduplication
//! - Regions (tagged sub-domains) and explicit views over one hierarchy
//! - Boundary and interface classification relative to any mesh or region
//! - Boundary, coboundary, neighbor, element and region ranges
//! - Copy, simplexify and simple generators for grids and hulls
//!
//! ## Example
//!
//! ```rust
//! use mesh_incidence::prelude::*;
//!
//! # fn main() -> Result<(), MeshError> {
//! let mut h = MeshHierarchy::new();
//! let root = MeshId::Root;
//! let a = h.make_vertex(root, Point::from([0.0, 0.0]))?;
//! let b = h.make_vertex(root, Point::from([1.0, 0.0]))?;
//! let c = h.make_vertex(root, Point::from([0.0, 1.0]))?;
//! let d = h.make_vertex(root, Point::from([1.0, 1.0]))?;
//! let t0 = h.make_triangle(root, [a, b, c])?;
//! let t1 = h.make_triangle(root, [b, d, c])?;
//!
//! let neighbors: Vec<_> = h.root().neighbors(t0, 1, 2)?.collect();
//! assert_eq!(neighbors, vec![t1]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Ownership
//! A hierarchy is a plain owned value. Handles ([`ElementId`](topology::ElementId),
//! [`RegionId`](topology::RegionId), [`MeshId`](topology::MeshId)) are `Copy` and
//! carry no reference; ranges borrow the hierarchy, so it cannot be mutated while a
//! range is alive. Wrap the hierarchy in `Rc<RefCell<_>>` or `Arc<RwLock<_>>` when
//! shared ownership is needed.

pub mod algs;
pub mod config;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::boundary::{boundary_elements, is_boundary, is_interface};
    pub use crate::algs::copy::{ElementCopyMap, copy_mesh};
    pub use crate::config::{CopyOptions, HierarchyConfig};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::Point;
    pub use crate::mesh_error::MeshError;
    pub use crate::topology::{
        ElementId, ElementKind, MeshHierarchy, MeshId, MeshRef, RegionId, ViewId,
    };
}
