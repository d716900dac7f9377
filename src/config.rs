//! Configuration structs for hierarchies and copy operations.
//!
//! Both structs are plain data with `Default` and serde support, so they can be
//! embedded in application configuration files.

use serde::{Deserialize, Serialize};

/// Options fixed when a [`MeshHierarchy`](crate::topology::hierarchy::MeshHierarchy) is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Geometric dimension of vertex coordinates. `None` infers it from the
    /// first vertex created.
    pub geometric_dimension: Option<usize>,
    /// Validate all hierarchy invariants after every mutation (slow).
    pub check_invariants: bool,
}

impl HierarchyConfig {
    /// Config with a fixed geometric dimension.
    pub fn with_dimension(geometric_dimension: usize) -> Self {
        Self {
            geometric_dimension: Some(geometric_dimension),
            ..Self::default()
        }
    }
}

/// Options for [`ElementCopyMap`](crate::algs::copy::ElementCopyMap).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CopyOptions {
    /// Recreate region memberships (by region id and name) on the destination.
    pub copy_regions: bool,
    /// Merge copied vertices with existing destination vertices closer than this.
    pub vertex_tolerance: Option<f64>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            copy_regions: true,
            vertex_tolerance: None,
        }
    }
}
