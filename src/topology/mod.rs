//! Top-level module for the mesh topology engine.
//!
//! It includes:
//! - Element kinds with their boundary decomposition tables
//! - Per-dimension element stores with vertex-set deduplication
//! - The owning [`MeshHierarchy`] with regions and views
//! - Read handles ([`MeshRef`]) and lazy traversal ranges
//!
//! Most users will build a [`MeshHierarchy`] and query it through
//! [`MeshHierarchy::root`] or [`MeshHierarchy::mesh`].

pub mod element_id;
pub mod element_kind;
pub mod hierarchy;
pub mod mesh;
pub mod ranges;
pub mod regions;
pub mod store;

pub use element_id::{ElementId, RegionId, ViewId};
pub use element_kind::{BoundaryRule, ElementKind};
pub use hierarchy::MeshHierarchy;
pub use mesh::{MeshId, MeshRef};
pub use ranges::{BoundaryRange, CoboundaryRange, ElementRange, NeighborRange, RegionRange};
pub use regions::{Region, View};
