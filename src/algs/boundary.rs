//! Boundary and interface classification.
//!
//! A facet (element at `cell_dimension - 1`) of a mesh is on the boundary when
//! exactly one cell of the mesh contains it. Lower-dimensional elements are on
//! the boundary when at least one facet of the mesh containing them is.
//! Cells themselves are never boundary elements.
//!
//! Classification is always relative to a mesh, so the same element can be
//! interior to the root mesh but on the boundary of a region. An element on the
//! boundary of two regions at once lies on their interface.

use log::debug;

use crate::mesh_error::MeshError;
use crate::topology::element_id::{ElementId, RegionId};
use crate::topology::hierarchy::MeshHierarchy;
use crate::topology::mesh::{MeshId, MeshRef};

/// Classified boundary/interior element sets, ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundaryClassification {
    pub boundary: Vec<ElementId>,
    pub interior: Vec<ElementId>,
}

fn facet_is_boundary(mesh: MeshRef<'_>, facet: ElementId, cell_dim: usize) -> Result<bool, MeshError> {
    Ok(mesh.coboundary(facet, cell_dim)?.take(2).count() == 1)
}

/// `true` if `e` lies on the boundary of `mesh`.
///
/// Elements not contained in `mesh` are never on its boundary.
pub fn is_boundary(mesh: MeshRef<'_>, e: ElementId) -> Result<bool, MeshError> {
    mesh.hierarchy().kind(e)?;
    if !mesh.contains(e) {
        return Ok(false);
    }
    let Some(cell_dim) = mesh.cell_dimension() else {
        return Ok(false);
    };
    let dim = e.dimension();
    if dim >= cell_dim {
        return Ok(false);
    }
    let facet_dim = cell_dim - 1;
    if dim == facet_dim {
        return facet_is_boundary(mesh, e, cell_dim);
    }
    for facet in mesh.coboundary(e, facet_dim)? {
        if facet_is_boundary(mesh, facet, cell_dim)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// `true` if `e` is on the boundary of both region `a` and region `b`.
///
/// Symmetric in `a` and `b`.
pub fn is_interface(
    hierarchy: &MeshHierarchy,
    a: RegionId,
    b: RegionId,
    e: ElementId,
) -> Result<bool, MeshError> {
    Ok(is_boundary(hierarchy.region_mesh(a)?, e)? && is_boundary(hierarchy.region_mesh(b)?, e)?)
}

/// Splits the elements of dimension `dim` of `mesh` into boundary and interior.
pub fn classify_boundary(mesh: MeshRef<'_>, dim: usize) -> Result<BoundaryClassification, MeshError> {
    let mut out = BoundaryClassification::default();
    for e in mesh.elements(dim) {
        if is_boundary(mesh, e)? {
            out.boundary.push(e);
        } else {
            out.interior.push(e);
        }
    }
    Ok(out)
}

/// Boundary elements of dimension `dim` of `mesh`, ascending.
pub fn boundary_elements(mesh: MeshRef<'_>, dim: usize) -> Result<Vec<ElementId>, MeshError> {
    Ok(classify_boundary(mesh, dim)?.boundary)
}

/// Classifies dimension `dim` of `mesh` and tags the boundary elements with
/// `region` (created if needed), together with their boundary closure.
pub fn tag_boundary(
    hierarchy: &mut MeshHierarchy,
    mesh: MeshId,
    dim: usize,
    region: RegionId,
) -> Result<BoundaryClassification, MeshError> {
    let classification = classify_boundary(hierarchy.mesh(mesh)?, dim)?;
    let region = hierarchy.get_make_region(region);
    for &e in &classification.boundary {
        hierarchy.add(MeshId::Region(region), e)?;
    }
    debug!(
        "tagged {} boundary elements of dimension {dim} into region {region}",
        classification.boundary.len()
    );
    Ok(classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::Point;

    #[test]
    fn lone_triangle_is_all_boundary() {
        let mut h = MeshHierarchy::new();
        let v: Vec<_> = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
            .into_iter()
            .map(|p| h.make_vertex(MeshId::Root, Point::from(p)).unwrap())
            .collect();
        let t = h.make_triangle(MeshId::Root, [v[0], v[1], v[2]]).unwrap();
        let root = h.root();
        assert!(!is_boundary(root, t).unwrap());
        assert_eq!(boundary_elements(root, 1).unwrap().len(), 3);
        assert_eq!(boundary_elements(root, 0).unwrap(), v);
    }

    #[test]
    fn tag_boundary_creates_region() {
        let mut h = MeshHierarchy::new();
        let a = h.make_vertex(MeshId::Root, Point::from([0.0])).unwrap();
        let b = h.make_vertex(MeshId::Root, Point::from([1.0])).unwrap();
        let c = h.make_vertex(MeshId::Root, Point::from([2.0])).unwrap();
        h.make_line(MeshId::Root, [a, b]).unwrap();
        h.make_line(MeshId::Root, [b, c]).unwrap();
        let cls = tag_boundary(&mut h, MeshId::Root, 0, RegionId(7)).unwrap();
        assert_eq!(cls.boundary, vec![a, c]);
        assert_eq!(cls.interior, vec![b]);
        assert!(h.is_in_region(RegionId(7), a));
        assert!(!h.is_in_region(RegionId(7), b));
    }
}
