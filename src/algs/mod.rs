//! Algorithms built on the incidence engine.

pub mod boundary;
pub mod copy;
pub mod meshgen;
pub mod simplexify;
pub mod traversal;

pub use boundary::{boundary_elements, is_boundary, is_interface};
pub use copy::{ElementCopyMap, copy_cells_if, copy_mesh};
pub use simplexify::simplexify;
pub use traversal::{closure, star};
