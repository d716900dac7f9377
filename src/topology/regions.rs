//! Region and view membership tables.
//!
//! A [`Region`] is a named tag attached to elements of any dimension. The
//! element side of the relation lives in
//! [`ElementRecord::regions`](crate::topology::store::ElementRecord); the
//! region side is the per-dimension member set kept here, so both directions
//! are available without a scan.
//!
//! A [`View`] is a user-curated element subset that is not backed by tagging.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::topology::element_id::{ElementId, RegionId, ViewId};
use crate::topology::element_kind::MAX_TOPOLOGICAL_DIMENSION;

/// Element indices grouped by dimension, kept sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Members {
    by_dim: [BTreeSet<u32>; MAX_TOPOLOGICAL_DIMENSION + 1],
}

impl Members {
    /// Returns `true` if `e` was not yet a member. Elements beyond the
    /// supported dimensions are never members.
    pub fn insert(&mut self, e: ElementId) -> bool {
        self.by_dim
            .get_mut(e.dimension())
            .is_some_and(|s| s.insert(e.index()))
    }

    pub fn remove(&mut self, e: ElementId) -> bool {
        self.by_dim
            .get_mut(e.dimension())
            .is_some_and(|s| s.remove(&e.index()))
    }

    #[inline]
    pub fn contains(&self, e: ElementId) -> bool {
        self.by_dim
            .get(e.dimension())
            .is_some_and(|s| s.contains(&e.index()))
    }

    /// `dim` must be at most [`MAX_TOPOLOGICAL_DIMENSION`].
    pub(crate) fn indices(&self, dim: usize) -> std::collections::btree_set::Iter<'_, u32> {
        debug_assert!(dim <= MAX_TOPOLOGICAL_DIMENSION);
        self.by_dim[dim].iter()
    }

    /// Members of dimension `dim` in ascending index order.
    pub fn iter(&self, dim: usize) -> impl DoubleEndedIterator<Item = ElementId> + '_ {
        self.by_dim
            .get(dim)
            .into_iter()
            .flatten()
            .map(move |&i| ElementId::new(dim, i))
    }

    pub fn len(&self, dim: usize) -> usize {
        self.by_dim.get(dim).map_or(0, BTreeSet::len)
    }

    /// Highest dimension with at least one member.
    pub fn cell_dimension(&self) -> Option<usize> {
        (0..=MAX_TOPOLOGICAL_DIMENSION)
            .rev()
            .find(|&d| !self.by_dim[d].is_empty())
    }
}

/// A tagged sub-domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    id: RegionId,
    name: String,
    pub(crate) members: Members,
}

impl Region {
    /// New region named after its id.
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            name: id.0.to_string(),
            members: Members::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> RegionId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn members(&self) -> &Members {
        &self.members
    }

    #[inline]
    pub fn contains(&self, e: ElementId) -> bool {
        self.members.contains(e)
    }
}

/// Regions of one hierarchy, ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RegionSet {
    regions: BTreeMap<RegionId, Region>,
}

impl RegionSet {
    /// Next id handed out by [`RegionSet::create`]: one past the highest id
    /// in use, starting at 0. Once `u32::MAX` is taken, the lowest free id.
    pub fn next_id(&self) -> RegionId {
        match self.regions.keys().next_back() {
            None => RegionId(0),
            Some(last) => match last.0.checked_add(1) {
                Some(next) => RegionId(next),
                None => self.lowest_free_id(),
            },
        }
    }

    fn lowest_free_id(&self) -> RegionId {
        let taken = self.regions.keys().map(|id| id.0);
        let free = (0..=u32::MAX).zip(taken).find(|&(want, id)| want != id);
        free.map_or(RegionId(u32::MAX), |(want, _)| RegionId(want))
    }

    /// Never replaces an existing region.
    pub fn create(&mut self) -> RegionId {
        let id = self.next_id();
        self.regions.entry(id).or_insert_with(|| Region::new(id));
        id
    }

    /// Returns `(id, created)`.
    pub fn get_or_create(&mut self, id: RegionId) -> (RegionId, bool) {
        let mut created = false;
        self.regions.entry(id).or_insert_with(|| {
            created = true;
            Region::new(id)
        });
        (id, created)
    }

    #[inline]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(&id)
    }

    /// First region (by id) carrying `name`.
    pub fn by_name(&self, name: &str) -> Option<&Region> {
        self.regions.values().find(|r| r.name == name)
    }

    pub fn set_name(&mut self, id: RegionId, name: impl Into<String>) -> bool {
        match self.regions.get_mut(&id) {
            Some(r) => {
                r.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Region> + ExactSizeIterator + '_ {
        self.regions.values()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }
}

/// An explicit element subset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub(crate) members: Members,
}

impl View {
    #[inline]
    pub fn members(&self) -> &Members {
        &self.members
    }

    #[inline]
    pub fn contains(&self, e: ElementId) -> bool {
        self.members.contains(e)
    }
}

/// Views of one hierarchy. Ids are sequential and never reused.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ViewSet {
    views: BTreeMap<ViewId, View>,
    next: u32,
}

impl ViewSet {
    pub fn create(&mut self) -> ViewId {
        let id = ViewId(self.next);
        self.next += 1;
        self.views.insert(id, View::default());
        id
    }

    #[inline]
    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(&id)
    }

    pub fn remove(&mut self, id: ViewId) -> Option<View> {
        self.views.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &View)> + '_ {
        self.views.iter().map(|(&id, v)| (id, v))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut View> + '_ {
        self.views.values_mut()
    }

    pub fn clear(&mut self) {
        self.views.clear();
        self.next = 0;
    }
}
