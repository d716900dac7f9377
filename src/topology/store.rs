//! Per-dimension element storage with vertex-set deduplication.
//!
//! An [`ElementStore`] holds every element of one topological dimension as a
//! flat, index-addressed list of [`ElementRecord`]s. Incidence is stored as
//! arena indices ([`ElementId`]) in both directions:
//! - `boundary[d]`: the element's sub-elements at dimension `d`. `boundary[0]`
//!   is the vertex list in the order supplied at creation.
//! - `coboundary[d]`: elements of dimension `d` that have this element in their
//!   boundary, in creation order.
//!
//! Deduplication keys are the **sorted** vertex indices, so the same vertex set
//! supplied in any order resolves to the same element. PLCs are keyed by their
//! sorted line indices instead, in a separate key space.
//!
//! The store only knows about its own dimension. Keeping the two incidence
//! directions mirrored across stores is the job of
//! [`MeshHierarchy`](crate::topology::hierarchy::MeshHierarchy).

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;
use crate::mesh_error::MeshError;
use crate::topology::element_id::{ElementId, RegionId};
use crate::topology::element_kind::{ElementKind, MAX_TOPOLOGICAL_DIMENSION};

const SLOTS: usize = MAX_TOPOLOGICAL_DIMENSION + 1;

/// Identity key used for deduplication.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKey {
    /// Sorted vertex indices.
    Vertices(Vec<u32>),
    /// Sorted line indices (PLC).
    Lines(Vec<u32>),
}

impl ElementKey {
    pub fn from_vertices(vertices: &[ElementId]) -> Self {
        ElementKey::Vertices(sorted_indices(vertices))
    }

    pub fn from_lines(lines: &[ElementId]) -> Self {
        ElementKey::Lines(sorted_indices(lines))
    }

    /// Key of an existing record; `None` for vertices, which are never deduplicated.
    pub fn of(record: &ElementRecord) -> Option<Self> {
        match record.kind {
            ElementKind::Vertex => None,
            ElementKind::Plc => Some(Self::from_lines(&record.boundary[1])),
            _ => Some(Self::from_vertices(&record.boundary[0])),
        }
    }
}

fn sorted_indices(ids: &[ElementId]) -> Vec<u32> {
    let mut key: Vec<u32> = ids.iter().map(|e| e.index()).collect();
    key.sort_unstable();
    key
}

/// Everything stored for one element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub kind: ElementKind,
    pub boundary: [Vec<ElementId>; SLOTS],
    pub coboundary: [Vec<ElementId>; SLOTS],
    pub parent: Option<ElementId>,
    /// Regions containing this element, in insertion order.
    pub regions: Vec<RegionId>,
    /// Coordinates; vertices only.
    pub point: Option<Point>,
    /// Hole markers; PLCs only.
    pub hole_points: Vec<Point>,
}

impl ElementRecord {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            boundary: Default::default(),
            coboundary: Default::default(),
            parent: None,
            regions: Vec::new(),
            point: None,
            hole_points: Vec::new(),
        }
    }

    pub fn vertex(point: Point) -> Self {
        Self {
            point: Some(point),
            ..Self::new(ElementKind::Vertex)
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[ElementId] {
        &self.boundary[0]
    }

    pub(crate) fn link_coboundary(&mut self, higher: ElementId) {
        let slot = &mut self.coboundary[higher.dimension()];
        if !slot.contains(&higher) {
            slot.push(higher);
        }
    }

    pub(crate) fn unlink_coboundary(&mut self, higher: ElementId) {
        self.coboundary[higher.dimension()].retain(|&e| e != higher);
    }
}

/// Dense storage for all elements of one dimension.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElementStore {
    dimension: usize,
    /// `None` marks an erased element; indices are never reused.
    records: Vec<Option<ElementRecord>>,
    index: HashMap<ElementKey, u32>,
    live: usize,
}

impl ElementStore {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            records: Vec::new(),
            index: HashMap::new(),
            live: 0,
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of live elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of indices handed out so far, erased ones included.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.records.len()
    }

    /// Existing element with this identity key.
    pub fn lookup(&self, key: &ElementKey) -> Option<ElementId> {
        self.index
            .get(key)
            .map(|&i| ElementId::new(self.dimension, i))
    }

    /// Appends `record` under a fresh index. The caller has already checked
    /// that `key` is not present.
    pub fn insert(
        &mut self,
        record: ElementRecord,
        key: Option<ElementKey>,
    ) -> Result<ElementId, MeshError> {
        let index = next_index(self.records.len())
            .ok_or(MeshError::CapacityExceeded(self.dimension))?;
        debug_assert_eq!(record.kind.dimension(), self.dimension);
        if let Some(key) = key {
            self.index.insert(key, index);
        }
        self.records.push(Some(record));
        self.live += 1;
        Ok(ElementId::new(self.dimension, index))
    }

    #[inline]
    pub fn at(&self, index: u32) -> Option<&ElementRecord> {
        self.records.get(index as usize).and_then(Option::as_ref)
    }

    #[inline]
    pub fn at_mut(&mut self, index: u32) -> Option<&mut ElementRecord> {
        self.records.get_mut(index as usize).and_then(Option::as_mut)
    }

    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        self.at(index).is_some()
    }

    /// Removes the element and its dedup key. Back-links held by other
    /// dimensions are left to the caller.
    pub fn erase(&mut self, index: u32) -> Option<ElementRecord> {
        let record = self.records.get_mut(index as usize)?.take()?;
        if let Some(key) = ElementKey::of(&record) {
            if self.index.get(&key) == Some(&index) {
                self.index.remove(&key);
            }
        }
        self.live -= 1;
        Some(record)
    }

    /// Live elements in index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ElementId, &ElementRecord)> + '_ {
        let dim = self.dimension;
        self.records
            .iter()
            .enumerate()
            .filter_map(move |(i, r)| r.as_ref().map(|r| (ElementId::new(dim, i as u32), r)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (ElementId, &mut ElementRecord)> + '_ {
        let dim = self.dimension;
        self.records
            .iter_mut()
            .enumerate()
            .filter_map(move |(i, r)| r.as_mut().map(|r| (ElementId::new(dim, i as u32), r)))
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = (&ElementKey, u32)> + '_ {
        self.index.iter().map(|(k, &i)| (k, i))
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
        self.live = 0;
    }
}

/// Index for the record appended after `allocated` others; `None` once the
/// `u32` index space is used up.
fn next_index(allocated: usize) -> Option<u32> {
    u32::try_from(allocated).ok()
}
