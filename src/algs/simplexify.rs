//! Conversion of a mesh into a simplicial mesh.
//!
//! Triangles and tetrahedra are copied unchanged. Quadrilaterals split along
//! the 0-3 diagonal, polygons fan out from their first vertex and hexahedra
//! split into six tetrahedra around the 0-7 diagonal (tensor-product vertex
//! ordering). Region tags of a source cell carry over to all of its simplices.

use log::debug;

use crate::algs::copy::ElementCopyMap;
use crate::config::CopyOptions;
use crate::mesh_error::MeshError;
use crate::topology::element_id::ElementId;
use crate::topology::element_kind::ElementKind;
use crate::topology::hierarchy::MeshHierarchy;
use crate::topology::mesh::{MeshId, MeshRef};

const QUADRILATERAL_TRIANGLES: [[usize; 3]; 2] = [[0, 1, 3], [0, 2, 3]];

const HEXAHEDRON_TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 1, 3, 7],
    [0, 1, 5, 7],
    [0, 2, 3, 7],
    [0, 2, 6, 7],
    [0, 4, 5, 7],
    [0, 4, 6, 7],
];

/// Local vertex tuples of the simplices replacing a non-simplex cell with `n`
/// vertices.
fn decompose(kind: ElementKind, n: usize) -> Result<Vec<Vec<usize>>, MeshError> {
    let out = match kind {
        ElementKind::Quadrilateral => QUADRILATERAL_TRIANGLES.iter().map(|t| t.to_vec()).collect(),
        ElementKind::Polygon => (1..n - 1).map(|i| vec![0, i, i + 1]).collect(),
        ElementKind::Hexahedron => HEXAHEDRON_TETRAHEDRA.iter().map(|t| t.to_vec()).collect(),
        _ => {
            return Err(MeshError::UnsupportedKind {
                kind,
                dimension: kind.dimension(),
            });
        }
    };
    Ok(out)
}

fn simplex_kind(dim: usize) -> ElementKind {
    match dim {
        1 => ElementKind::Line,
        2 => ElementKind::Triangle,
        _ => ElementKind::Tetrahedron,
    }
}

/// Writes the simplices of every cell of `src` into `dst_mesh` and returns
/// them in source cell order.
///
/// PLC cells need a geometric triangulation and are rejected.
pub fn simplexify(
    src: MeshRef<'_>,
    dst: &mut MeshHierarchy,
    dst_mesh: MeshId,
    options: CopyOptions,
) -> Result<Vec<ElementId>, MeshError> {
    let mut map = ElementCopyMap::with_options(dst, dst_mesh, options);
    let mut out = Vec::new();
    let mut split = 0usize;
    for cell in src.cells() {
        let kind = src.hierarchy().kind(cell)?;
        if kind.is_simplex() {
            out.push(map.copy(src, cell)?);
            continue;
        }
        let vertices = map.copy_vertices(src, cell)?;
        let pieces = decompose(kind, vertices.len())?;
        split += 1;
        let target = simplex_kind(kind.dimension());
        for local in pieces {
            let simplex: Vec<ElementId> = local.iter().map(|&i| vertices[i]).collect();
            let created = map.create(target, &simplex)?;
            map.copy_regions(src, cell, created)?;
            out.push(created);
        }
    }
    debug!("simplexified {split} non-simplex cells into {} simplices total", out.len());
    Ok(out)
}
