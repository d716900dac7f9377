//! Geometry primitives used by the topology layer.
//!
//! Only the coordinate type lives here; geometric algorithms consume the
//! topology from outside the crate.

pub mod point;

pub use point::Point;
