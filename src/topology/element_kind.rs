//! Element kinds and their boundary decomposition tables.
//!
//! The set of kinds is closed, so boundary generation is a static lookup keyed
//! on [`ElementKind`] rather than dynamic dispatch. Vertex indices in the tables
//! refer to positions in the element's vertex list as supplied at creation.
//!
//! Quadrilaterals and hexahedra use tensor-product vertex ordering: bit 0 of a
//! local vertex index is the first axis, bit 1 the second and bit 2 the third.
//! A unit quad is therefore `(0,0) (1,0) (0,1) (1,1)`, not a cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest supported topological dimension.
pub const MAX_TOPOLOGICAL_DIMENSION: usize = 3;

/// Topological kinds supported by the element stores.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    /// 0D point carrying a coordinate.
    Vertex,
    /// 1D segment between two vertices.
    Line,
    /// 2D simplex.
    Triangle,
    /// 2D tensor-product cell.
    Quadrilateral,
    /// 2D polygon with at least three vertices in cyclic order.
    Polygon,
    /// 3D simplex.
    Tetrahedron,
    /// 3D tensor-product cell.
    Hexahedron,
    /// Planar linear complex: 2D element bounded by an arbitrary set of lines.
    Plc,
}

/// How the boundary elements of one dimension are derived from an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryRule {
    /// Each entry lists local vertex indices of one boundary element.
    Fixed(&'static [&'static [usize]]),
    /// Consecutive vertex pairs `(i, i+1)` followed by the closing pair `(n-1, 0)`.
    Cycle,
    /// Supplied by the caller at creation time (PLC lines).
    Explicit,
}

const TRIANGLE_LINES: &[&[usize]] = &[&[0, 1], &[0, 2], &[1, 2]];

const QUADRILATERAL_LINES: &[&[usize]] = &[&[0, 1], &[0, 2], &[1, 3], &[2, 3]];

const TETRAHEDRON_LINES: &[&[usize]] = &[&[0, 1], &[0, 2], &[0, 3], &[1, 2], &[1, 3], &[2, 3]];

const TETRAHEDRON_TRIANGLES: &[&[usize]] = &[&[0, 1, 2], &[0, 1, 3], &[0, 2, 3], &[1, 2, 3]];

const HEXAHEDRON_LINES: &[&[usize]] = &[
    &[0, 1],
    &[0, 2],
    &[0, 4],
    &[1, 3],
    &[1, 5],
    &[2, 3],
    &[2, 6],
    &[3, 7],
    &[4, 5],
    &[4, 6],
    &[5, 7],
    &[6, 7],
];

const HEXAHEDRON_QUADRILATERALS: &[&[usize]] = &[
    &[0, 1, 2, 3],
    &[0, 1, 4, 5],
    &[0, 2, 4, 6],
    &[1, 3, 5, 7],
    &[2, 3, 6, 7],
    &[4, 5, 6, 7],
];

impl ElementKind {
    /// Every kind, in ascending dimension.
    pub const ALL: [ElementKind; 8] = [
        ElementKind::Vertex,
        ElementKind::Line,
        ElementKind::Triangle,
        ElementKind::Quadrilateral,
        ElementKind::Polygon,
        ElementKind::Plc,
        ElementKind::Tetrahedron,
        ElementKind::Hexahedron,
    ];

    /// Topological dimension.
    pub const fn dimension(self) -> usize {
        match self {
            ElementKind::Vertex => 0,
            ElementKind::Line => 1,
            ElementKind::Triangle
            | ElementKind::Quadrilateral
            | ElementKind::Polygon
            | ElementKind::Plc => 2,
            ElementKind::Tetrahedron | ElementKind::Hexahedron => 3,
        }
    }

    /// Fixed vertex count, or `None` for polygons and PLCs.
    pub const fn vertex_count(self) -> Option<usize> {
        match self {
            ElementKind::Vertex => Some(1),
            ElementKind::Line => Some(2),
            ElementKind::Triangle => Some(3),
            ElementKind::Quadrilateral | ElementKind::Tetrahedron => Some(4),
            ElementKind::Hexahedron => Some(8),
            ElementKind::Polygon | ElementKind::Plc => None,
        }
    }

    /// Kind of the codimension-1 boundary elements.
    pub const fn facet_kind(self) -> Option<ElementKind> {
        match self {
            ElementKind::Vertex => None,
            ElementKind::Line => Some(ElementKind::Vertex),
            ElementKind::Triangle
            | ElementKind::Quadrilateral
            | ElementKind::Polygon
            | ElementKind::Plc => Some(ElementKind::Line),
            ElementKind::Tetrahedron => Some(ElementKind::Triangle),
            ElementKind::Hexahedron => Some(ElementKind::Quadrilateral),
        }
    }

    /// `true` for simplices (vertex, line, triangle, tetrahedron).
    pub const fn is_simplex(self) -> bool {
        matches!(
            self,
            ElementKind::Vertex | ElementKind::Line | ElementKind::Triangle | ElementKind::Tetrahedron
        )
    }

    /// Kind and derivation rule of the boundary elements at dimension `dim`,
    /// for `1 <= dim < self.dimension()`. Vertices are always the element's own
    /// vertex list and are not described by a rule.
    pub fn boundary_rule(self, dim: usize) -> Option<(ElementKind, BoundaryRule)> {
        use BoundaryRule::*;
        use ElementKind::*;
        match (self, dim) {
            (Triangle, 1) => Some((Line, Fixed(TRIANGLE_LINES))),
            (Quadrilateral, 1) => Some((Line, Fixed(QUADRILATERAL_LINES))),
            (Polygon, 1) => Some((Line, Cycle)),
            (Plc, 1) => Some((Line, Explicit)),
            (Tetrahedron, 1) => Some((Line, Fixed(TETRAHEDRON_LINES))),
            (Tetrahedron, 2) => Some((Triangle, Fixed(TETRAHEDRON_TRIANGLES))),
            (Hexahedron, 1) => Some((Line, Fixed(HEXAHEDRON_LINES))),
            (Hexahedron, 2) => Some((Quadrilateral, Fixed(HEXAHEDRON_QUADRILATERALS))),
            _ => None,
        }
    }

    /// Number of boundary elements at `dim` for an element with `vertex_count`
    /// vertices. `None` when the count is not determined by the vertices (PLC)
    /// or `dim` is not below the element's dimension.
    pub fn boundary_count(self, dim: usize, vertex_count: usize) -> Option<usize> {
        if dim >= self.dimension() {
            return None;
        }
        if dim == 0 {
            return Some(vertex_count);
        }
        match self.boundary_rule(dim)?.1 {
            BoundaryRule::Fixed(table) => Some(table.len()),
            BoundaryRule::Cycle => Some(vertex_count),
            BoundaryRule::Explicit => None,
        }
    }

    /// Lower-case name, as used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Line => "line",
            ElementKind::Triangle => "triangle",
            ElementKind::Quadrilateral => "quadrilateral",
            ElementKind::Polygon => "polygon",
            ElementKind::Tetrahedron => "tetrahedron",
            ElementKind::Hexahedron => "hexahedron",
            ElementKind::Plc => "plc",
        }
    }
}

impl BoundaryRule {
    /// Expands the rule over `vertices`, yielding one vertex list per boundary
    /// element. Returns `None` for [`BoundaryRule::Explicit`].
    pub fn apply<T: Copy>(self, vertices: &[T]) -> Option<Vec<Vec<T>>> {
        match self {
            BoundaryRule::Fixed(table) => Some(
                table
                    .iter()
                    .map(|local| local.iter().map(|&i| vertices[i]).collect())
                    .collect(),
            ),
            BoundaryRule::Cycle => {
                let n = vertices.len();
                Some(
                    (0..n)
                        .map(|i| vec![vertices[i], vertices[(i + 1) % n]])
                        .collect(),
                )
            }
            BoundaryRule::Explicit => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
