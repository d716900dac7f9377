//! Basic mesh generators for structured grids and closed shells.
//!
//! Generators write into an existing hierarchy through a [`MeshId`], so the
//! result can land directly in a region or view. Each returns the created
//! cells in creation order.

use crate::geometry::point::Point;
use crate::mesh_error::MeshError;
use crate::topology::element_id::ElementId;
use crate::topology::element_kind::ElementKind;
use crate::topology::hierarchy::MeshHierarchy;
use crate::topology::mesh::MeshId;

/// Cell-type choices for structured 2D meshes and surface hulls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructuredCellType {
    Triangle,
    Quadrilateral,
}

fn invalid_size(kind: ElementKind) -> MeshError {
    MeshError::VertexCountMismatch {
        kind,
        expected: 1,
        found: 0,
    }
}

/// Structured 2D grid over `[min, max]` with `nx`×`ny` cells.
///
/// Vertex `(i, j)` is created at position `j * (nx + 1) + i`. Triangle cells
/// split each square along its `(i+1, j)`–`(i, j+1)` diagonal.
pub fn structured_grid_2d(
    hierarchy: &mut MeshHierarchy,
    mesh: MeshId,
    nx: usize,
    ny: usize,
    min: [f64; 2],
    max: [f64; 2],
    cell_type: StructuredCellType,
) -> Result<Vec<ElementId>, MeshError> {
    if nx == 0 || ny == 0 {
        return Err(invalid_size(match cell_type {
            StructuredCellType::Triangle => ElementKind::Triangle,
            StructuredCellType::Quadrilateral => ElementKind::Quadrilateral,
        }));
    }
    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;

    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            let p = Point::from([min[0] + i as f64 * dx, min[1] + j as f64 * dy]);
            vertices.push(hierarchy.make_vertex(mesh, p)?);
        }
    }

    let at = |i: usize, j: usize| vertices[j * (nx + 1) + i];
    let mut cells = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            let (v00, v10, v01, v11) = (at(i, j), at(i + 1, j), at(i, j + 1), at(i + 1, j + 1));
            match cell_type {
                StructuredCellType::Triangle => {
                    cells.push(hierarchy.make_triangle(mesh, [v00, v10, v01])?);
                    cells.push(hierarchy.make_triangle(mesh, [v10, v11, v01])?);
                }
                StructuredCellType::Quadrilateral => {
                    cells.push(hierarchy.make_quadrilateral(mesh, [v00, v10, v01, v11])?);
                }
            }
        }
    }
    Ok(cells)
}

/// Surface of the axis-aligned box `[ll, ur]`: 12 triangles or 6 quadrilaterals.
pub fn make_aa_cube_hull(
    hierarchy: &mut MeshHierarchy,
    mesh: MeshId,
    ll: [f64; 3],
    ur: [f64; 3],
    cell_type: StructuredCellType,
) -> Result<Vec<ElementId>, MeshError> {
    // vertex k has x from bit 1, y from bit 0, z from bit 2
    let corners = [
        [ll[0], ll[1], ll[2]],
        [ll[0], ur[1], ll[2]],
        [ur[0], ll[1], ll[2]],
        [ur[0], ur[1], ll[2]],
        [ll[0], ll[1], ur[2]],
        [ll[0], ur[1], ur[2]],
        [ur[0], ll[1], ur[2]],
        [ur[0], ur[1], ur[2]],
    ];
    let mut v = Vec::with_capacity(8);
    for c in corners {
        v.push(hierarchy.make_vertex(mesh, Point::from(c))?);
    }

    let mut cells = Vec::new();
    match cell_type {
        StructuredCellType::Triangle => {
            const TRIANGLES: [[usize; 3]; 12] = [
                [0, 1, 2],
                [1, 2, 3],
                [4, 5, 6],
                [5, 6, 7],
                [0, 4, 2],
                [2, 6, 4],
                [1, 3, 5],
                [5, 7, 3],
                [0, 1, 4],
                [4, 5, 1],
                [2, 6, 3],
                [3, 7, 6],
            ];
            for t in TRIANGLES {
                cells.push(hierarchy.make_triangle(mesh, [v[t[0]], v[t[1]], v[t[2]]])?);
            }
        }
        StructuredCellType::Quadrilateral => {
            const QUADS: [[usize; 4]; 6] = [
                [0, 1, 2, 3],
                [4, 5, 6, 7],
                [0, 2, 4, 6],
                [1, 3, 5, 7],
                [0, 1, 4, 5],
                [2, 3, 6, 7],
            ];
            for q in QUADS {
                cells.push(hierarchy.make_quadrilateral(mesh, [v[q[0]], v[q[1]], v[q[2]], v[q[3]]])?);
            }
        }
    }
    Ok(cells)
}

/// Triangulated icosahedron inscribed in the sphere of `radius` around `center`.
pub fn make_icosahedron_hull(
    hierarchy: &mut MeshHierarchy,
    mesh: MeshId,
    center: [f64; 3],
    radius: f64,
) -> Result<Vec<ElementId>, MeshError> {
    let phi = (1.0 + 5.0f64.sqrt()) / 2.0;
    let raw = [
        [0.0, phi, 1.0],
        [0.0, phi, -1.0],
        [0.0, -phi, 1.0],
        [0.0, -phi, -1.0],
        [1.0, 0.0, phi],
        [-1.0, 0.0, phi],
        [1.0, 0.0, -phi],
        [-1.0, 0.0, -phi],
        [phi, 1.0, 0.0],
        [phi, -1.0, 0.0],
        [-phi, 1.0, 0.0],
        [-phi, -1.0, 0.0],
    ];
    let c = Point::from(center);
    let mut v = Vec::with_capacity(raw.len());
    for r in raw {
        let p = Point::from(r);
        v.push(hierarchy.make_vertex(mesh, c + p * (radius / p.norm()))?);
    }

    const FACES: [[usize; 3]; 20] = [
        [1, 6, 7],
        [1, 7, 10],
        [0, 1, 10],
        [0, 1, 8],
        [1, 6, 8],
        [0, 5, 10],
        [0, 4, 5],
        [0, 4, 8],
        [4, 8, 9],
        [6, 8, 9],
        [5, 10, 11],
        [7, 10, 11],
        [2, 3, 9],
        [2, 3, 11],
        [2, 4, 5],
        [3, 6, 7],
        [2, 5, 11],
        [3, 7, 11],
        [2, 4, 9],
        [3, 6, 9],
    ];
    let mut cells = Vec::with_capacity(FACES.len());
    for f in FACES {
        cells.push(hierarchy.make_triangle(mesh, [v[f[0]], v[f[1]], v[f[2]]])?);
    }
    Ok(cells)
}
