//! Mesh handles: the root mesh, region meshes and explicit views.
//!
//! A mesh never owns elements. [`MeshId`] names one of the three flavours and
//! [`MeshRef`] pairs it with a borrowed [`MeshHierarchy`] to answer queries
//! restricted to the mesh's elements.

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;
use crate::mesh_error::MeshError;
use crate::topology::element_id::{ElementId, RegionId, ViewId};
use crate::topology::element_kind::{ElementKind, MAX_TOPOLOGICAL_DIMENSION};
use crate::topology::hierarchy::MeshHierarchy;
use crate::topology::ranges::{CoboundaryRange, ElementRange, NeighborRange};
use crate::topology::regions::Members;

/// Which subset of a hierarchy a mesh exposes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshId {
    /// Every element of the hierarchy.
    #[default]
    Root,
    /// Elements tagged with a region.
    Region(RegionId),
    /// Elements explicitly added to a view.
    View(ViewId),
}

impl From<RegionId> for MeshId {
    fn from(id: RegionId) -> Self {
        MeshId::Region(id)
    }
}

impl From<ViewId> for MeshId {
    fn from(id: ViewId) -> Self {
        MeshId::View(id)
    }
}

/// Read-only mesh handle.
#[derive(Copy, Clone, Debug)]
pub struct MeshRef<'a> {
    hierarchy: &'a MeshHierarchy,
    id: MeshId,
}

impl<'a> MeshRef<'a> {
    /// `id` must name an existing mesh of `hierarchy`; use
    /// [`MeshHierarchy::mesh`] for a checked handle.
    pub(crate) fn new(hierarchy: &'a MeshHierarchy, id: MeshId) -> Self {
        Self { hierarchy, id }
    }

    #[inline]
    pub fn id(&self) -> MeshId {
        self.id
    }

    #[inline]
    pub fn hierarchy(&self) -> &'a MeshHierarchy {
        self.hierarchy
    }

    /// Member table for regions and views; `None` for the root.
    pub(crate) fn members(&self) -> Option<&'a Members> {
        match self.id {
            MeshId::Root => None,
            MeshId::Region(r) => self.hierarchy.region(r).map(|r| r.members()),
            MeshId::View(v) => self.hierarchy.view(v).map(|v| v.members()),
        }
    }

    /// `true` if `e` is a live element of this mesh.
    #[inline]
    pub fn contains(&self, e: ElementId) -> bool {
        match self.id {
            MeshId::Root => self.hierarchy.is_valid(e),
            _ => self.members().is_some_and(|m| m.contains(e)),
        }
    }

    /// Elements of dimension `dim` in ascending index order.
    pub fn elements(&self, dim: usize) -> ElementRange<'a> {
        if dim > MAX_TOPOLOGICAL_DIMENSION {
            return ElementRange::empty();
        }
        match self.id {
            MeshId::Root => match self.hierarchy.store(dim) {
                Some(store) => ElementRange::from_store(store),
                None => ElementRange::empty(),
            },
            _ => match self.members() {
                Some(m) => ElementRange::from_members(m, dim),
                None => ElementRange::empty(),
            },
        }
    }

    pub fn vertices(&self) -> ElementRange<'a> {
        self.elements(0)
    }

    pub fn lines(&self) -> ElementRange<'a> {
        self.elements(1)
    }

    /// Elements at [`MeshRef::facet_dimension`]; empty if there is none.
    pub fn facets(&self) -> ElementRange<'a> {
        match self.facet_dimension() {
            Some(d) => self.elements(d),
            None => ElementRange::empty(),
        }
    }

    /// Elements at [`MeshRef::cell_dimension`]; empty for an empty mesh.
    pub fn cells(&self) -> ElementRange<'a> {
        match self.cell_dimension() {
            Some(d) => self.elements(d),
            None => ElementRange::empty(),
        }
    }

    pub fn element_count(&self, dim: usize) -> usize {
        if dim > MAX_TOPOLOGICAL_DIMENSION {
            return 0;
        }
        match self.id {
            MeshId::Root => self.hierarchy.store(dim).map_or(0, |s| s.size()),
            _ => self.members().map_or(0, |m| m.len(dim)),
        }
    }

    pub fn element_count_by_kind(&self, kind: ElementKind) -> usize {
        self.elements(kind.dimension())
            .filter(|&e| self.hierarchy.element(e).is_some_and(|r| r.kind == kind))
            .count()
    }

    /// Highest dimension holding at least one element.
    pub fn cell_dimension(&self) -> Option<usize> {
        match self.id {
            MeshId::Root => (0..=MAX_TOPOLOGICAL_DIMENSION)
                .rev()
                .find(|&d| self.hierarchy.store(d).is_some_and(|s| !s.is_empty())),
            _ => self.members()?.cell_dimension(),
        }
    }

    /// `cell_dimension - 1`; `None` when the cells are vertices or the mesh is empty.
    pub fn facet_dimension(&self) -> Option<usize> {
        self.cell_dimension()?.checked_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.cell_dimension().is_none()
    }

    /// Elements of this mesh at `target_dim` having `e` in their boundary.
    pub fn coboundary(&self, e: ElementId, target_dim: usize) -> Result<CoboundaryRange<'a>, MeshError> {
        CoboundaryRange::new(*self, e, target_dim)
    }

    /// Elements of this mesh at `target_dim` sharing a `connector_dim`
    /// element with `e`, excluding `e` itself.
    pub fn neighbors(
        &self,
        e: ElementId,
        connector_dim: usize,
        target_dim: usize,
    ) -> Result<NeighborRange<'a>, MeshError> {
        NeighborRange::new(*self, e, connector_dim, target_dim)
    }

    /// See [`crate::algs::boundary::is_boundary`].
    pub fn is_boundary(&self, e: ElementId) -> Result<bool, MeshError> {
        crate::algs::boundary::is_boundary(*self, e)
    }

    /// First vertex of this mesh within `tolerance` of `point`.
    pub fn find_vertex(&self, point: &Point, tolerance: f64) -> Option<ElementId> {
        self.vertices().find(|&v| {
            self.hierarchy
                .point(v)
                .is_ok_and(|p| p.distance(point) <= tolerance)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_are_exact_regions_are_closed() {
        let mut h = MeshHierarchy::new();
        let v: Vec<ElementId> = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
            .into_iter()
            .map(|p| h.make_vertex(MeshId::Root, Point::from(p)).unwrap())
            .collect();
        let t = h.make_triangle(MeshId::Root, [v[0], v[1], v[2]]).unwrap();

        let view = h.make_view();
        assert!(h.add(view.into(), t).unwrap());
        let region = h.make_region();
        assert!(h.add(region.into(), t).unwrap());

        let vm = h.mesh(view.into()).unwrap();
        assert_eq!(vm.element_count(2), 1);
        assert_eq!(vm.element_count(0), 0);
        assert_eq!(vm.cell_dimension(), Some(2));

        let rm = h.region_mesh(region).unwrap();
        assert_eq!(rm.element_count(0), 3);
        assert_eq!(rm.element_count(1), 3);
        assert_eq!(rm.facets().count(), 3);
        assert_eq!(rm.element_count_by_kind(ElementKind::Triangle), 1);
    }

    #[test]
    fn creation_through_view_adds_closure() {
        let mut h = MeshHierarchy::new();
        let view = MeshId::View(h.make_view());
        let a = h.make_vertex(view, Point::from([0.0])).unwrap();
        let b = h.make_vertex(view, Point::from([1.0])).unwrap();
        let c = h.make_vertex(MeshId::Root, Point::from([2.0])).unwrap();
        let l = h.make_line(view, [b, c]).unwrap();
        let m = h.mesh(view).unwrap();
        assert!(m.contains(a) && m.contains(c) && m.contains(l));
        assert_eq!(m.cells().collect::<Vec<_>>(), vec![l]);
        assert_eq!(m.find_vertex(&Point::from([0.9]), 0.2), Some(b));
        assert_eq!(m.find_vertex(&Point::from([5.0]), 0.2), None);
    }

    #[test]
    fn unknown_meshes() {
        let h = MeshHierarchy::new();
        assert!(h.mesh(MeshId::View(ViewId(0))).is_err());
        assert!(h.root().is_empty());
        assert_eq!(h.root().facet_dimension(), None);
    }
}
