//! `MeshHierarchy`: the owning container for elements, regions and views.
//!
//! The hierarchy owns one [`ElementStore`] per topological dimension plus the
//! region and view tables. Every other handle in the crate ([`ElementId`],
//! [`RegionId`], [`ViewId`], [`MeshRef`]) is a lightweight reference into it.
//!
//! Mutation goes through `&mut MeshHierarchy`, reads through `&MeshHierarchy`
//! or a [`MeshRef`]. Ranges borrow the hierarchy, so it cannot be modified
//! while one of them is alive.
//!
//! # Creation
//! [`MeshHierarchy::make_element`] deduplicates by vertex set and, for a new
//! element, materializes (or reuses) every boundary sub-element prescribed by
//! [`ElementKind::boundary_rule`], then records the new element in the
//! coboundary lists of all of them.
//!
//! # Erase policy
//! [`MeshHierarchy::erase_elements`] always cascades upward: every element of
//! the target mesh whose boundary contains an erased element is erased too.
//! Boundary elements are never removed implicitly.

use std::collections::BTreeSet;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::HierarchyConfig;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::point::{MAX_GEOMETRIC_DIMENSION, Point};
use crate::mesh_error::MeshError;
use crate::topology::element_id::{ElementId, RegionId, ViewId};
use crate::topology::element_kind::{ElementKind, MAX_TOPOLOGICAL_DIMENSION};
use crate::topology::mesh::{MeshId, MeshRef};
use crate::topology::ranges::{BoundaryRange, RegionRange};
use crate::topology::regions::{Region, RegionSet, View, ViewSet};
use crate::topology::store::{ElementKey, ElementRecord, ElementStore};

/// Owner of all topology of one mesh and its sub-meshes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeshHierarchy {
    config: HierarchyConfig,
    geometric_dimension: Option<usize>,
    stores: [ElementStore; MAX_TOPOLOGICAL_DIMENSION + 1],
    regions: RegionSet,
    views: ViewSet,
}

impl Default for MeshHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshHierarchy {
    /// Empty hierarchy; the geometric dimension is taken from the first vertex.
    pub fn new() -> Self {
        Self {
            config: HierarchyConfig::default(),
            geometric_dimension: None,
            stores: std::array::from_fn(ElementStore::new),
            regions: RegionSet::default(),
            views: ViewSet::default(),
        }
    }

    pub fn with_config(config: HierarchyConfig) -> Result<Self, MeshError> {
        if let Some(d) = config.geometric_dimension {
            if !(1..=MAX_GEOMETRIC_DIMENSION).contains(&d) {
                return Err(MeshError::InvalidGeometricDimension(d));
            }
        }
        Ok(Self {
            config,
            geometric_dimension: config.geometric_dimension,
            ..Self::new()
        })
    }

    /// Shorthand for a hierarchy with a fixed geometric dimension.
    pub fn with_dimension(geometric_dimension: usize) -> Result<Self, MeshError> {
        Self::with_config(HierarchyConfig::with_dimension(geometric_dimension))
    }

    #[inline]
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Geometric dimension of vertex coordinates, once known.
    #[inline]
    pub fn geometric_dimension(&self) -> Option<usize> {
        self.geometric_dimension
    }

    // --- mesh handles ----------------------------------------------------

    /// The mesh containing every element of the hierarchy.
    #[inline]
    pub fn root(&self) -> MeshRef<'_> {
        MeshRef::new(self, MeshId::Root)
    }

    /// Read handle for `id`; fails for unknown regions and views.
    pub fn mesh(&self, id: MeshId) -> Result<MeshRef<'_>, MeshError> {
        self.check_mesh(id)?;
        Ok(MeshRef::new(self, id))
    }

    /// Read handle for the region mesh `id`.
    pub fn region_mesh(&self, id: RegionId) -> Result<MeshRef<'_>, MeshError> {
        self.mesh(MeshId::Region(id))
    }

    fn check_mesh(&self, id: MeshId) -> Result<(), MeshError> {
        match id {
            MeshId::Root => Ok(()),
            MeshId::Region(r) => self
                .regions
                .get(r)
                .map(|_| ())
                .ok_or(MeshError::UnknownRegion(r)),
            MeshId::View(v) => self
                .views
                .get(v)
                .map(|_| ())
                .ok_or(MeshError::UnknownView(v)),
        }
    }

    // --- element access --------------------------------------------------

    #[inline]
    pub(crate) fn store(&self, dim: usize) -> Option<&ElementStore> {
        self.stores.get(dim)
    }

    /// Record of a live element.
    #[inline]
    pub fn element(&self, e: ElementId) -> Option<&ElementRecord> {
        self.stores.get(e.dimension())?.at(e.index())
    }

    pub(crate) fn record(&self, e: ElementId) -> Result<&ElementRecord, MeshError> {
        self.element(e).ok_or(MeshError::InvalidElement(e))
    }

    fn record_mut(&mut self, e: ElementId) -> Result<&mut ElementRecord, MeshError> {
        self.stores
            .get_mut(e.dimension())
            .and_then(|s| s.at_mut(e.index()))
            .ok_or(MeshError::InvalidElement(e))
    }

    /// `true` if `e` names a live element.
    #[inline]
    pub fn is_valid(&self, e: ElementId) -> bool {
        self.element(e).is_some()
    }

    pub fn kind(&self, e: ElementId) -> Result<ElementKind, MeshError> {
        Ok(self.record(e)?.kind)
    }

    /// Vertices of `e` in creation order. A vertex returns itself.
    pub fn vertices_of(&self, e: ElementId) -> Result<Vec<ElementId>, MeshError> {
        let record = self.record(e)?;
        if record.kind == ElementKind::Vertex {
            Ok(vec![e])
        } else {
            Ok(record.vertices().to_vec())
        }
    }

    /// Boundary elements of `e` at dimension `dim`, without repeats.
    /// Empty when `dim` is not below the dimension of `e`.
    pub fn boundary(&self, e: ElementId, dim: usize) -> Result<BoundaryRange<'_>, MeshError> {
        if dim > MAX_TOPOLOGICAL_DIMENSION {
            return Err(MeshError::DimensionOutOfRange(dim));
        }
        let record = self.record(e)?;
        Ok(BoundaryRange::new(&record.boundary[dim]))
    }

    /// Regions containing `e`, in the order it was added to them.
    pub fn element_regions(&self, e: ElementId) -> Result<RegionRange<'_>, MeshError> {
        Ok(RegionRange::new(&self.record(e)?.regions))
    }

    // --- construction ----------------------------------------------------

    /// Creates a new vertex at `point`. Vertices are never deduplicated.
    pub fn make_vertex(&mut self, mesh: MeshId, point: Point) -> Result<ElementId, MeshError> {
        self.check_mesh(mesh)?;
        self.check_point(&point)?;
        if self.geometric_dimension.is_none() {
            self.geometric_dimension = Some(point.dimension());
        }
        let id = self.stores[0].insert(ElementRecord::vertex(point), None)?;
        debug!("created vertex {id} at {point}");
        self.add_unchecked(mesh, id, true)?;
        self.enforce_invariants(self.config.check_invariants, "make_vertex");
        Ok(id)
    }

    /// Returns a vertex of `mesh` within `tolerance` of `point`, creating one
    /// if none exists.
    pub fn make_unique_vertex(
        &mut self,
        mesh: MeshId,
        point: Point,
        tolerance: f64,
    ) -> Result<ElementId, MeshError> {
        if let Some(v) = self.mesh(mesh)?.find_vertex(&point, tolerance) {
            trace!("reusing vertex {v} for {point}");
            return Ok(v);
        }
        self.make_vertex(mesh, point)
    }

    /// Creates (or returns the existing) element of `kind` over `vertices`.
    ///
    /// The result, with its whole boundary, is added to `mesh` when `mesh` is a
    /// region or view.
    pub fn make_element(
        &mut self,
        mesh: MeshId,
        kind: ElementKind,
        vertices: &[ElementId],
    ) -> Result<ElementId, MeshError> {
        self.check_mesh(mesh)?;
        match kind {
            ElementKind::Vertex | ElementKind::Plc => {
                return Err(MeshError::UnsupportedKind {
                    kind,
                    dimension: kind.dimension(),
                });
            }
            ElementKind::Polygon if vertices.len() < 3 => {
                return Err(MeshError::VertexCountMismatch {
                    kind,
                    expected: 3,
                    found: vertices.len(),
                });
            }
            _ => {}
        }
        if let Some(expected) = kind.vertex_count() {
            if expected != vertices.len() {
                return Err(MeshError::VertexCountMismatch {
                    kind,
                    expected,
                    found: vertices.len(),
                });
            }
        }
        self.check_vertices(vertices)?;

        let (id, created) = self.get_or_create(kind, vertices)?;
        debug!(
            "{} {kind} {id}",
            if created { "created" } else { "reused" }
        );
        self.add_unchecked(mesh, id, true)?;
        self.enforce_invariants(self.config.check_invariants, "make_element");
        Ok(id)
    }

    pub fn make_line(&mut self, mesh: MeshId, v: [ElementId; 2]) -> Result<ElementId, MeshError> {
        self.make_element(mesh, ElementKind::Line, &v)
    }

    pub fn make_triangle(
        &mut self,
        mesh: MeshId,
        v: [ElementId; 3],
    ) -> Result<ElementId, MeshError> {
        self.make_element(mesh, ElementKind::Triangle, &v)
    }

    /// Vertices in tensor-product order, see [`crate::topology::element_kind`].
    pub fn make_quadrilateral(
        &mut self,
        mesh: MeshId,
        v: [ElementId; 4],
    ) -> Result<ElementId, MeshError> {
        self.make_element(mesh, ElementKind::Quadrilateral, &v)
    }

    /// Vertices in cyclic order.
    pub fn make_polygon(
        &mut self,
        mesh: MeshId,
        vertices: &[ElementId],
    ) -> Result<ElementId, MeshError> {
        self.make_element(mesh, ElementKind::Polygon, vertices)
    }

    pub fn make_tetrahedron(
        &mut self,
        mesh: MeshId,
        v: [ElementId; 4],
    ) -> Result<ElementId, MeshError> {
        self.make_element(mesh, ElementKind::Tetrahedron, &v)
    }

    /// Vertices in tensor-product order, see [`crate::topology::element_kind`].
    pub fn make_hexahedron(
        &mut self,
        mesh: MeshId,
        v: [ElementId; 8],
    ) -> Result<ElementId, MeshError> {
        self.make_element(mesh, ElementKind::Hexahedron, &v)
    }

    /// Creates (or returns the existing) PLC bounded by `lines`.
    ///
    /// Its vertices are the union of the lines' vertices in ascending order.
    pub fn make_plc(&mut self, mesh: MeshId, lines: &[ElementId]) -> Result<ElementId, MeshError> {
        self.check_mesh(mesh)?;
        let mut unique: Vec<ElementId> = Vec::with_capacity(lines.len());
        let mut vertices = BTreeSet::new();
        for &l in lines {
            let record = self.record(l)?;
            if record.kind != ElementKind::Line {
                return Err(MeshError::UnsupportedKind {
                    kind: record.kind,
                    dimension: 1,
                });
            }
            vertices.extend(record.vertices().iter().copied());
            if !unique.contains(&l) {
                unique.push(l);
            }
        }
        if unique.is_empty() {
            return Err(MeshError::VertexCountMismatch {
                kind: ElementKind::Plc,
                expected: 1,
                found: 0,
            });
        }

        let key = ElementKey::from_lines(&unique);
        let (id, created) = match self.stores[2].lookup(&key) {
            Some(id) => (id, false),
            None => {
                let mut record = ElementRecord::new(ElementKind::Plc);
                record.boundary[0] = vertices.into_iter().collect();
                record.boundary[1] = unique;
                let id = self.stores[2].insert(record, Some(key))?;
                self.link_coboundary(id);
                (id, true)
            }
        };
        debug!("{} plc {id}", if created { "created" } else { "reused" });
        self.add_unchecked(mesh, id, true)?;
        self.enforce_invariants(self.config.check_invariants, "make_plc");
        Ok(id)
    }

    fn check_point(&self, point: &Point) -> Result<(), MeshError> {
        match self.geometric_dimension {
            Some(expected) if expected != point.dimension() => {
                Err(MeshError::GeometricDimensionMismatch {
                    expected,
                    found: point.dimension(),
                })
            }
            _ => Ok(()),
        }
    }

    fn check_vertices(&self, vertices: &[ElementId]) -> Result<(), MeshError> {
        for (i, &v) in vertices.iter().enumerate() {
            if v.dimension() != 0 {
                return Err(MeshError::NotAVertex(v));
            }
            if !self.is_valid(v) {
                return Err(MeshError::InvalidElement(v));
            }
            if vertices[..i].contains(&v) {
                return Err(MeshError::DuplicateVertex(v));
            }
        }
        Ok(())
    }

    /// Dedup lookup, then cascading creation of the boundary. Inputs are
    /// already validated; the boundary tables only ever produce valid
    /// vertex lists from a valid one.
    fn get_or_create(
        &mut self,
        kind: ElementKind,
        vertices: &[ElementId],
    ) -> Result<(ElementId, bool), MeshError> {
        let dim = kind.dimension();
        let key = ElementKey::from_vertices(vertices);
        if let Some(id) = self.stores[dim].lookup(&key) {
            return Ok((id, false));
        }

        let mut record = ElementRecord::new(kind);
        record.boundary[0] = vertices.to_vec();
        for d in 1..dim {
            let Some((sub_kind, rule)) = kind.boundary_rule(d) else {
                continue;
            };
            let Some(subsets) = rule.apply(vertices) else {
                continue;
            };
            let mut ids = Vec::with_capacity(subsets.len());
            for sub in subsets {
                let (sub_id, created) = self.get_or_create(sub_kind, &sub)?;
                if created {
                    trace!("materialized boundary {sub_kind} {sub_id} of new {kind}");
                }
                if !ids.contains(&sub_id) {
                    ids.push(sub_id);
                }
            }
            record.boundary[d] = ids;
        }

        let id = self.stores[dim].insert(record, Some(key))?;
        self.link_coboundary(id);
        Ok((id, true))
    }

    /// Registers `id` in the coboundary lists of its whole boundary.
    fn link_coboundary(&mut self, id: ElementId) {
        let Some(record) = self.element(id) else {
            return;
        };
        let boundary: Vec<ElementId> = record.boundary.iter().flatten().copied().collect();
        for sub in boundary {
            if let Some(r) = self.stores[sub.dimension()].at_mut(sub.index()) {
                r.link_coboundary(id);
            }
        }
    }

    // --- regions and views -----------------------------------------------

    /// Creates a region with the next unused id (highest id + 1, from 0).
    pub fn make_region(&mut self) -> RegionId {
        let id = self.regions.create();
        debug!("created region {id}");
        id
    }

    /// Returns region `id`, creating it if needed.
    pub fn get_make_region(&mut self, id: RegionId) -> RegionId {
        let (id, created) = self.regions.get_or_create(id);
        if created {
            debug!("created region {id}");
        }
        id
    }

    #[inline]
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn region_by_name(&self, name: &str) -> Option<&Region> {
        self.regions.by_name(name)
    }

    pub fn set_region_name(&mut self, id: RegionId, name: impl Into<String>) -> Result<(), MeshError> {
        if self.regions.set_name(id, name) {
            Ok(())
        } else {
            Err(MeshError::UnknownRegion(id))
        }
    }

    /// All regions in ascending id order.
    pub fn regions(&self) -> impl DoubleEndedIterator<Item = &Region> + ExactSizeIterator + '_ {
        self.regions.iter()
    }

    #[inline]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// `true` if `e` is tagged with region `region`.
    pub fn is_in_region(&self, region: RegionId, e: ElementId) -> bool {
        self.regions.get(region).is_some_and(|r| r.contains(e))
    }

    /// Creates an empty explicit view.
    pub fn make_view(&mut self) -> ViewId {
        let id = self.views.create();
        debug!("created view {id}");
        id
    }

    #[inline]
    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(id)
    }

    /// Drops a view. Elements are not affected.
    pub fn remove_view(&mut self, id: ViewId) -> Result<(), MeshError> {
        self.views
            .remove(id)
            .map(|_| ())
            .ok_or(MeshError::UnknownView(id))
    }

    /// Adds `e` to `mesh`.
    ///
    /// For a region the whole boundary closure of `e` is added as well; for a
    /// view only `e` itself. The root mesh already contains every element.
    /// Returns `true` if `e` was not a member before.
    pub fn add(&mut self, mesh: MeshId, e: ElementId) -> Result<bool, MeshError> {
        self.check_mesh(mesh)?;
        self.record(e)?;
        let added = self.add_unchecked(mesh, e, false)?;
        self.enforce_invariants(self.config.check_invariants, "add");
        Ok(added)
    }

    /// Membership insertion. With `closure` set, views receive the boundary
    /// closure too (used by creation); regions always do.
    fn add_unchecked(&mut self, mesh: MeshId, e: ElementId, closure: bool) -> Result<bool, MeshError> {
        match mesh {
            MeshId::Root => Ok(false),
            MeshId::Region(r) => {
                let members = self.closure_of(e)?;
                let region = self.regions.get_mut(r).ok_or(MeshError::UnknownRegion(r))?;
                let mut tagged = Vec::new();
                for &x in &members {
                    if region.members.insert(x) {
                        tagged.push(x);
                    }
                }
                let added = tagged.contains(&e);
                for x in tagged {
                    self.record_mut(x)?.regions.push(r);
                }
                Ok(added)
            }
            MeshId::View(v) => {
                let members = if closure { self.closure_of(e)? } else { vec![e] };
                let view = self.views.get_mut(v).ok_or(MeshError::UnknownView(v))?;
                let mut added = false;
                for x in members {
                    let inserted = view.members.insert(x);
                    if x == e {
                        added = inserted;
                    }
                }
                Ok(added)
            }
        }
    }

    /// `e` followed by its boundary elements, highest dimension first.
    fn closure_of(&self, e: ElementId) -> Result<Vec<ElementId>, MeshError> {
        let record = self.record(e)?;
        let mut out = vec![e];
        for d in (0..e.dimension()).rev() {
            out.extend(record.boundary[d].iter().copied());
        }
        Ok(out)
    }

    // --- erase -----------------------------------------------------------

    /// Erases `elements` from `mesh`, cascading upward to every element of
    /// `mesh` that has one of them in its boundary.
    ///
    /// On the root mesh the elements are removed from the hierarchy: their ids
    /// become invalid and they disappear from all regions and views. On a
    /// region or view only the membership is removed. Elements not contained
    /// in `mesh` are ignored. Returns the number of elements removed.
    pub fn erase_elements<I>(&mut self, mesh: MeshId, elements: I) -> Result<usize, MeshError>
    where
        I: IntoIterator<Item = ElementId>,
    {
        let (requested, targets) = {
            let m = self.mesh(mesh)?;
            let mut requested = 0usize;
            let mut targets = BTreeSet::new();
            for e in elements {
                let record = self.record(e)?;
                if !m.contains(e) {
                    continue;
                }
                requested += usize::from(targets.insert(e));
                for d in e.dimension() + 1..=MAX_TOPOLOGICAL_DIMENSION {
                    targets.extend(record.coboundary[d].iter().copied().filter(|&c| m.contains(c)));
                }
            }
            (requested, targets)
        };
        if targets.len() > requested {
            warn!(
                "erase on {mesh:?} cascaded from {requested} requested to {} elements",
                targets.len()
            );
        }

        match mesh {
            MeshId::Root => self.erase_from_hierarchy(&targets),
            MeshId::Region(r) => {
                if let Some(region) = self.regions.get_mut(r) {
                    for &e in &targets {
                        region.members.remove(e);
                    }
                }
                for &e in &targets {
                    self.record_mut(e)?.regions.retain(|&x| x != r);
                }
            }
            MeshId::View(v) => {
                if let Some(view) = self.views.get_mut(v) {
                    for &e in &targets {
                        view.members.remove(e);
                    }
                }
            }
        }

        if log::log_enabled!(log::Level::Debug) {
            let mut per_dim = [0usize; MAX_TOPOLOGICAL_DIMENSION + 1];
            for e in &targets {
                per_dim[e.dimension()] += 1;
            }
            debug!("erased from {mesh:?}: {per_dim:?} elements per dimension");
        }
        self.enforce_invariants(self.config.check_invariants, "erase_elements");
        Ok(targets.len())
    }

    /// Erases every element of dimension `dim` in `mesh` for which `pred`
    /// holds, with the same cascade as [`MeshHierarchy::erase_elements`].
    pub fn erase_elements_if<F>(&mut self, mesh: MeshId, dim: usize, mut pred: F) -> Result<usize, MeshError>
    where
        F: FnMut(&MeshHierarchy, ElementId) -> bool,
    {
        if dim > MAX_TOPOLOGICAL_DIMENSION {
            return Err(MeshError::DimensionOutOfRange(dim));
        }
        let marked: Vec<ElementId> = self
            .mesh(mesh)?
            .elements(dim)
            .filter(|&e| pred(self, e))
            .collect();
        self.erase_elements(mesh, marked)
    }

    /// `targets` is upward closed, so erasing from the top down never leaves a
    /// live element pointing at an erased one.
    fn erase_from_hierarchy(&mut self, targets: &BTreeSet<ElementId>) {
        for &e in targets.iter().rev() {
            let Some(record) = self.stores[e.dimension()].erase(e.index()) else {
                continue;
            };
            for &sub in record.boundary.iter().flatten() {
                if let Some(r) = self.stores[sub.dimension()].at_mut(sub.index()) {
                    r.unlink_coboundary(e);
                }
            }
            for r in &record.regions {
                if let Some(region) = self.regions.get_mut(*r) {
                    region.members.remove(e);
                }
            }
        }
        for view in self.views.iter_mut() {
            for &e in targets {
                view.members.remove(e);
            }
        }
        for store in &mut self.stores {
            for (_, record) in store.iter_mut() {
                if record.parent.is_some_and(|p| targets.contains(&p)) {
                    record.parent = None;
                }
            }
        }
    }

    /// Removes all elements, regions and views. The configuration is kept.
    pub fn clear(&mut self) {
        for store in &mut self.stores {
            store.clear();
        }
        self.regions.clear();
        self.views.clear();
        self.geometric_dimension = self.config.geometric_dimension;
        debug!("cleared hierarchy");
    }

    // --- per-element data ------------------------------------------------

    /// Coordinates of vertex `v`.
    pub fn point(&self, v: ElementId) -> Result<Point, MeshError> {
        if v.dimension() != 0 {
            return Err(MeshError::NotAVertex(v));
        }
        self.record(v)?.point.ok_or(MeshError::NotAVertex(v))
    }

    pub fn set_point(&mut self, v: ElementId, point: Point) -> Result<(), MeshError> {
        if v.dimension() != 0 {
            return Err(MeshError::NotAVertex(v));
        }
        self.check_point(&point)?;
        self.record_mut(v)?.point = Some(point);
        Ok(())
    }

    /// Attaches a hole marker to a PLC.
    pub fn add_hole_point(&mut self, plc: ElementId, point: Point) -> Result<(), MeshError> {
        self.check_point(&point)?;
        let record = self.record_mut(plc)?;
        if record.kind != ElementKind::Plc {
            return Err(MeshError::NotAPlc(plc));
        }
        record.hole_points.push(point);
        Ok(())
    }

    pub fn hole_points(&self, plc: ElementId) -> Result<&[Point], MeshError> {
        let record = self.record(plc)?;
        if record.kind != ElementKind::Plc {
            return Err(MeshError::NotAPlc(plc));
        }
        Ok(&record.hole_points)
    }

    /// Records `parent` as the element `child` was derived from.
    pub fn set_parent(&mut self, child: ElementId, parent: Option<ElementId>) -> Result<(), MeshError> {
        if let Some(p) = parent {
            self.record(p)?;
        }
        self.record_mut(child)?.parent = parent;
        Ok(())
    }

    pub fn parent(&self, e: ElementId) -> Option<ElementId> {
        self.element(e)?.parent
    }
}

impl DebugInvariants for MeshHierarchy {
    fn validate_invariants(&self) -> Result<(), MeshError> {
        let fail = |msg: String| Err(MeshError::Inconsistent(msg));

        for (dim, store) in self.stores.iter().enumerate() {
            for (e, record) in store.iter() {
                if record.kind.dimension() != dim {
                    return fail(format!("{e} stored at dimension {dim} but is a {}", record.kind));
                }
                if (dim == 0) != record.point.is_some() {
                    return fail(format!("{e}: only vertices carry a point"));
                }
                for d in 0..dim {
                    let n = record.boundary[d].len();
                    if let Some(expected) = record.kind.boundary_count(d, record.boundary[0].len()) {
                        if expected != n {
                            return fail(format!("{e}: {n} boundary elements at dim {d}, expected {expected}"));
                        }
                    }
                    for &sub in &record.boundary[d] {
                        match self.element(sub) {
                            Some(s) if s.coboundary[dim].contains(&e) => {}
                            Some(_) => return fail(format!("{sub} misses coboundary link to {e}")),
                            None => return fail(format!("{e} references missing boundary element {sub}")),
                        }
                    }
                }
                for d in dim + 1..=MAX_TOPOLOGICAL_DIMENSION {
                    for &up in &record.coboundary[d] {
                        match self.element(up) {
                            Some(u) if u.boundary[dim].contains(&e) => {}
                            _ => return fail(format!("{e} has dangling coboundary link {up}")),
                        }
                    }
                }
                if let Some(key) = ElementKey::of(record) {
                    if store.lookup(&key) != Some(e) {
                        return fail(format!("{e} is not reachable through its dedup key"));
                    }
                }
                for &r in &record.regions {
                    if !self.is_in_region(r, e) {
                        return fail(format!("{e} lists region {r} which does not contain it"));
                    }
                }
                if let Some(p) = record.parent {
                    if !self.is_valid(p) {
                        return fail(format!("{e} has erased parent {p}"));
                    }
                }
            }
            for (key, index) in store.keys() {
                match store.at(index) {
                    Some(record) if ElementKey::of(record).as_ref() == Some(key) => {}
                    _ => return fail(format!("stale dedup key for {}", ElementId::new(dim, index))),
                }
            }
        }

        for region in self.regions.iter() {
            for dim in 0..=MAX_TOPOLOGICAL_DIMENSION {
                for e in region.members().iter(dim) {
                    match self.element(e) {
                        Some(r) if r.regions.contains(&region.id()) => {}
                        _ => return fail(format!("region {} holds stale member {e}", region.id())),
                    }
                }
            }
        }
        for (id, view) in self.views.iter() {
            for dim in 0..=MAX_TOPOLOGICAL_DIMENSION {
                if let Some(e) = view.members().iter(dim).find(|&e| !self.is_valid(e)) {
                    return fail(format!("view {id} holds stale member {e}"));
                }
            }
        }
        Ok(())
    }
}
