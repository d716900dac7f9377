//! Lazy traversal ranges over the incidence graph.
//!
//! Every range borrows the hierarchy and computes its items on demand from the
//! stored incidence lists; nothing is materialized up front. All ranges are
//! `Clone`, so a range can be restarted by cloning it before iteration.
//!
//! - [`BoundaryRange`]: sub-elements of one element at one dimension.
//!   Slice-backed, so double-ended and exact-size.
//! - [`CoboundaryRange`]: elements of a mesh having a given element in their
//!   boundary, in the order they were created.
//! - [`NeighborRange`]: two-hop join (boundary or coboundary to a connector
//!   dimension, then to the target dimension), deduplicated, in discovery order.
//! - [`ElementRange`]: all elements of one dimension of a mesh, in index order.
//! - [`RegionRange`]: regions containing one element.

use std::collections::btree_set;
use std::iter::FusedIterator;
use std::slice;

use hashbrown::HashSet;

use crate::mesh_error::MeshError;
use crate::topology::element_id::{ElementId, RegionId};
use crate::topology::element_kind::MAX_TOPOLOGICAL_DIMENSION;
use crate::topology::mesh::MeshRef;
use crate::topology::regions::Members;
use crate::topology::store::ElementStore;

/// Copying iterator over a borrowed slice of handles.
#[derive(Clone, Debug)]
pub struct SliceRange<'a, T> {
    inner: slice::Iter<'a, T>,
}

/// Sub-elements of one element at one dimension.
pub type BoundaryRange<'a> = SliceRange<'a, ElementId>;

/// Regions containing one element.
pub type RegionRange<'a> = SliceRange<'a, RegionId>;

impl<'a, T: Copy> SliceRange<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { inner: items.iter() }
    }

    /// Remaining items.
    pub fn as_slice(&self) -> &'a [T] {
        self.inner.as_slice()
    }
}

impl<T: Copy> Iterator for SliceRange<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: Copy> DoubleEndedIterator for SliceRange<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().copied()
    }
}

impl<T: Copy> ExactSizeIterator for SliceRange<'_, T> {}
impl<T: Copy> FusedIterator for SliceRange<'_, T> {}

/// Elements of a mesh at `target_dim` whose boundary contains a given element.
#[derive(Clone, Debug)]
pub struct CoboundaryRange<'a> {
    mesh: MeshRef<'a>,
    inner: slice::Iter<'a, ElementId>,
}

impl<'a> CoboundaryRange<'a> {
    /// Empty when `target_dim` is not above the dimension of `e`.
    pub fn new(mesh: MeshRef<'a>, e: ElementId, target_dim: usize) -> Result<Self, MeshError> {
        if target_dim > MAX_TOPOLOGICAL_DIMENSION {
            return Err(MeshError::DimensionOutOfRange(target_dim));
        }
        let record = mesh.hierarchy().record(e)?;
        let links: &'a [ElementId] = if target_dim > e.dimension() {
            &record.coboundary[target_dim]
        } else {
            &[]
        };
        Ok(Self {
            mesh,
            inner: links.iter(),
        })
    }
}

impl Iterator for CoboundaryRange<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let mesh = self.mesh;
        self.inner.by_ref().copied().find(|&c| mesh.contains(c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.inner.len()))
    }
}

impl DoubleEndedIterator for CoboundaryRange<'_> {
    fn next_back(&mut self) -> Option<ElementId> {
        let mesh = self.mesh;
        self.inner.by_ref().copied().rfind(|&c| mesh.contains(c))
    }
}

impl FusedIterator for CoboundaryRange<'_> {}

/// One hop in the incidence graph: down through the boundary or up through
/// the mesh-filtered coboundary.
#[derive(Clone, Debug)]
enum Incident<'a> {
    Down(BoundaryRange<'a>),
    Up(CoboundaryRange<'a>),
}

impl<'a> Incident<'a> {
    /// `dim` must differ from the dimension of `e`.
    fn new(mesh: MeshRef<'a>, e: ElementId, dim: usize) -> Result<Self, MeshError> {
        if dim < e.dimension() {
            Ok(Incident::Down(mesh.hierarchy().boundary(e, dim)?))
        } else {
            Ok(Incident::Up(CoboundaryRange::new(mesh, e, dim)?))
        }
    }
}

impl Iterator for Incident<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        match self {
            Incident::Down(r) => r.next(),
            Incident::Up(r) => r.next(),
        }
    }
}

/// Elements of a mesh at `target_dim` sharing a `connector_dim` element with
/// an origin element. The origin itself never appears, nor, when
/// `target_dim` is below the origin's dimension, the origin's own boundary.
#[derive(Clone, Debug)]
pub struct NeighborRange<'a> {
    mesh: MeshRef<'a>,
    target_dim: usize,
    connectors: Incident<'a>,
    candidates: Option<Incident<'a>>,
    seen: HashSet<ElementId>,
}

impl<'a> NeighborRange<'a> {
    pub fn new(
        mesh: MeshRef<'a>,
        e: ElementId,
        connector_dim: usize,
        target_dim: usize,
    ) -> Result<Self, MeshError> {
        for d in [connector_dim, target_dim] {
            if d > MAX_TOPOLOGICAL_DIMENSION {
                return Err(MeshError::DimensionOutOfRange(d));
            }
        }
        let element = e.dimension();
        if connector_dim == element || connector_dim == target_dim {
            return Err(MeshError::InvalidConnector {
                element,
                connector: connector_dim,
                target: target_dim,
            });
        }
        let record = mesh.hierarchy().record(e)?;
        let mut seen = HashSet::new();
        seen.insert(e);
        if target_dim < element {
            seen.extend(record.boundary[target_dim].iter().copied());
        }
        Ok(Self {
            mesh,
            target_dim,
            connectors: Incident::new(mesh, e, connector_dim)?,
            candidates: None,
            seen,
        })
    }
}

impl Iterator for NeighborRange<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        loop {
            if let Some(candidates) = self.candidates.as_mut() {
                for t in candidates.by_ref() {
                    if self.mesh.contains(t) && self.seen.insert(t) {
                        return Some(t);
                    }
                }
            }
            let connector = self.connectors.next()?;
            self.candidates = Incident::new(self.mesh, connector, self.target_dim).ok();
        }
    }
}

impl FusedIterator for NeighborRange<'_> {}

#[derive(Clone, Debug)]
enum Source<'a> {
    Empty,
    Store {
        store: &'a ElementStore,
        front: u32,
        back: u32,
    },
    Members(btree_set::Iter<'a, u32>),
}

/// Elements of one dimension of a mesh, in ascending index order.
#[derive(Clone, Debug)]
pub struct ElementRange<'a> {
    dim: usize,
    source: Source<'a>,
}

impl<'a> ElementRange<'a> {
    pub(crate) fn empty() -> Self {
        Self {
            dim: 0,
            source: Source::Empty,
        }
    }

    pub(crate) fn from_store(store: &'a ElementStore) -> Self {
        Self {
            dim: store.dimension(),
            source: Source::Store {
                store,
                front: 0,
                back: store.allocated() as u32,
            },
        }
    }

    pub(crate) fn from_members(members: &'a Members, dim: usize) -> Self {
        Self {
            dim,
            source: Source::Members(members.indices(dim)),
        }
    }

    /// Dimension of the elements produced.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }
}

impl Iterator for ElementRange<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let index = match &mut self.source {
            Source::Empty => None,
            Source::Store { store, front, back } => {
                let mut found = None;
                while *front < *back {
                    let i = *front;
                    *front += 1;
                    if store.contains(i) {
                        found = Some(i);
                        break;
                    }
                }
                found
            }
            Source::Members(it) => it.next().copied(),
        };
        index.map(|i| ElementId::new(self.dim, i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.source {
            Source::Empty => (0, Some(0)),
            Source::Store { front, back, .. } => (0, Some((back - front) as usize)),
            Source::Members(it) => it.size_hint(),
        }
    }
}

impl DoubleEndedIterator for ElementRange<'_> {
    fn next_back(&mut self) -> Option<ElementId> {
        let index = match &mut self.source {
            Source::Empty => None,
            Source::Store { store, front, back } => {
                let mut found = None;
                while *front < *back {
                    *back -= 1;
                    if store.contains(*back) {
                        found = Some(*back);
                        break;
                    }
                }
                found
            }
            Source::Members(it) => it.next_back().copied(),
        };
        index.map(|i| ElementId::new(self.dim, i))
    }
}

impl FusedIterator for ElementRange<'_> {}

#[cfg(test)]
mod tests {
    use crate::geometry::point::Point;
    use crate::mesh_error::MeshError;
    use crate::topology::hierarchy::MeshHierarchy;
    use crate::topology::mesh::MeshId;

    #[test]
    fn element_range_skips_erased() {
        let mut h = MeshHierarchy::new();
        let v: Vec<_> = (0..5)
            .map(|i| h.make_vertex(MeshId::Root, Point::from([i as f64])).unwrap())
            .collect();
        h.erase_elements(MeshId::Root, [v[1], v[3]]).unwrap();
        let fwd: Vec<_> = h.root().vertices().collect();
        assert_eq!(fwd, vec![v[0], v[2], v[4]]);
        let back: Vec<_> = h.root().vertices().rev().collect();
        assert_eq!(back, vec![v[4], v[2], v[0]]);
        let mut r = h.root().vertices();
        assert_eq!(r.next(), Some(v[0]));
        assert_eq!(r.next_back(), Some(v[4]));
        assert_eq!(r.next(), Some(v[2]));
        assert_eq!(r.next_back(), None);
    }

    #[test]
    fn invalid_neighbor_queries() {
        let mut h = MeshHierarchy::new();
        let a = h.make_vertex(MeshId::Root, Point::from([0.0])).unwrap();
        let b = h.make_vertex(MeshId::Root, Point::from([1.0])).unwrap();
        let l = h.make_line(MeshId::Root, [a, b]).unwrap();
        let root = h.root();
        assert!(matches!(
            root.neighbors(l, 1, 1),
            Err(MeshError::InvalidConnector { .. })
        ));
        assert!(matches!(
            root.neighbors(l, 0, 0),
            Err(MeshError::InvalidConnector { .. })
        ));
        assert!(matches!(
            root.neighbors(l, 0, 4),
            Err(MeshError::DimensionOutOfRange(4))
        ));
        // vertex neighbors through lines
        assert_eq!(root.neighbors(a, 1, 0).unwrap().collect::<Vec<_>>(), vec![b]);
        // a line has no line neighbors through its own vertices here
        assert_eq!(root.neighbors(l, 0, 1).unwrap().count(), 0);
    }

    #[test]
    fn boundary_range_is_exact_size() {
        let mut h = MeshHierarchy::new();
        let v: Vec<_> = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
            .into_iter()
            .map(|p| h.make_vertex(MeshId::Root, Point::from(p)).unwrap())
            .collect();
        let t = h.make_triangle(MeshId::Root, [v[0], v[1], v[2]]).unwrap();
        let lines = h.boundary(t, 1).unwrap();
        assert_eq!(lines.len(), 3);
        let restarted = lines.clone();
        assert_eq!(lines.rev().collect::<Vec<_>>().len(), restarted.count());
        assert_eq!(h.boundary(t, 2).unwrap().len(), 0);
        assert!(h.boundary(t, 7).is_err());
    }
}
