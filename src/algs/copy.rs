//! Copying elements between hierarchies.
//!
//! [`ElementCopyMap`] maps source elements to destination elements, creating
//! destination vertices and elements on first use and returning the cached
//! result afterwards. Because element creation deduplicates, copying a cell
//! reuses any destination boundary elements that already exist.

use hashbrown::HashMap;
use log::{trace, warn};

use crate::config::CopyOptions;
use crate::mesh_error::MeshError;
use crate::topology::element_id::{ElementId, RegionId};
use crate::topology::element_kind::ElementKind;
use crate::topology::hierarchy::MeshHierarchy;
use crate::topology::mesh::{MeshId, MeshRef};

/// Source-to-destination element map bound to one destination mesh.
pub struct ElementCopyMap<'d> {
    dst: &'d mut MeshHierarchy,
    dst_mesh: MeshId,
    options: CopyOptions,
    elements: HashMap<ElementId, ElementId>,
    regions: HashMap<RegionId, RegionId>,
}

impl<'d> ElementCopyMap<'d> {
    pub fn new(dst: &'d mut MeshHierarchy, dst_mesh: MeshId) -> Self {
        Self::with_options(dst, dst_mesh, CopyOptions::default())
    }

    pub fn with_options(dst: &'d mut MeshHierarchy, dst_mesh: MeshId, options: CopyOptions) -> Self {
        Self {
            dst,
            dst_mesh,
            options,
            elements: HashMap::new(),
            regions: HashMap::new(),
        }
    }

    #[inline]
    pub fn destination(&self) -> &MeshHierarchy {
        &*self.dst
    }

    #[inline]
    pub fn destination_mesh(&self) -> MeshId {
        self.dst_mesh
    }

    /// Destination element for `src_element`, if already copied.
    pub fn get(&self, src_element: ElementId) -> Option<ElementId> {
        self.elements.get(&src_element).copied()
    }

    /// Every mapping established so far.
    pub fn into_map(self) -> HashMap<ElementId, ElementId> {
        self.elements
    }

    /// Copies `e` (and, implicitly, its boundary) from `src` into the
    /// destination mesh.
    pub fn copy(&mut self, src: MeshRef<'_>, e: ElementId) -> Result<ElementId, MeshError> {
        if let Some(&done) = self.elements.get(&e) {
            return Ok(done);
        }
        let source = src.hierarchy();
        let kind = source.kind(e)?;
        let out = match kind {
            ElementKind::Vertex => self.copy_vertex(src, e)?,
            ElementKind::Plc => {
                let mut lines = Vec::new();
                for l in source.boundary(e, 1)? {
                    lines.push(self.copy(src, l)?);
                }
                let plc = self.dst.make_plc(self.dst_mesh, &lines)?;
                for &hole in source.hole_points(e)? {
                    if !self.dst.hole_points(plc)?.contains(&hole) {
                        self.dst.add_hole_point(plc, hole)?;
                    }
                }
                plc
            }
            _ => {
                let vertices = self.copy_vertices(src, e)?;
                self.dst.make_element(self.dst_mesh, kind, &vertices)?
            }
        };
        self.elements.insert(e, out);
        self.copy_regions(src, e, out)?;
        trace!("copied {kind} {e} -> {out}");
        Ok(out)
    }

    /// Creates an element of `kind` over destination `vertices` in the
    /// destination mesh. The result is not recorded in the map.
    pub fn create(&mut self, kind: ElementKind, vertices: &[ElementId]) -> Result<ElementId, MeshError> {
        self.dst.make_element(self.dst_mesh, kind, vertices)
    }

    /// Destination vertices for the vertex list of `e`, in order.
    pub fn copy_vertices(&mut self, src: MeshRef<'_>, e: ElementId) -> Result<Vec<ElementId>, MeshError> {
        src.hierarchy()
            .vertices_of(e)?
            .into_iter()
            .map(|v| self.copy(src, v))
            .collect()
    }

    fn copy_vertex(&mut self, src: MeshRef<'_>, v: ElementId) -> Result<ElementId, MeshError> {
        let point = src.hierarchy().point(v)?;
        if let Some(tolerance) = self.options.vertex_tolerance {
            let existing = self.dst.mesh(self.dst_mesh)?.find_vertex(&point, tolerance);
            if let Some(existing) = existing {
                warn!("merged copied vertex {v} at {point} into existing vertex {existing}");
                return Ok(existing);
            }
        }
        self.dst.make_vertex(self.dst_mesh, point)
    }

    /// Tags `out` with the destination counterparts of the regions of `e`.
    pub fn copy_regions(&mut self, src: MeshRef<'_>, e: ElementId, out: ElementId) -> Result<(), MeshError> {
        if !self.options.copy_regions {
            return Ok(());
        }
        let source = src.hierarchy();
        for r in source.element_regions(e)? {
            let mapped = self.map_region(source, r)?;
            self.dst.add(MeshId::Region(mapped), out)?;
        }
        Ok(())
    }

    /// Destination region with the same id as `r`, created and named after
    /// the source region on first use.
    fn map_region(&mut self, source: &MeshHierarchy, r: RegionId) -> Result<RegionId, MeshError> {
        if let Some(&mapped) = self.regions.get(&r) {
            return Ok(mapped);
        }
        let existed = self.dst.region(r).is_some();
        let mapped = self.dst.get_make_region(r);
        if !existed {
            if let Some(region) = source.region(r) {
                self.dst.set_region_name(mapped, region.name())?;
            }
        }
        self.regions.insert(r, mapped);
        Ok(mapped)
    }
}

/// Copies every element of `src` into `dst_mesh`, highest dimension first.
/// Returns the source-to-destination element map.
pub fn copy_mesh(
    src: MeshRef<'_>,
    dst: &mut MeshHierarchy,
    dst_mesh: MeshId,
    options: CopyOptions,
) -> Result<HashMap<ElementId, ElementId>, MeshError> {
    let mut map = ElementCopyMap::with_options(dst, dst_mesh, options);
    if let Some(top) = src.cell_dimension() {
        for dim in (0..=top).rev() {
            for e in src.elements(dim) {
                map.copy(src, e)?;
            }
        }
    }
    Ok(map.into_map())
}

/// Copies the cells of `src` accepted by `pred`. Returns the new cells in
/// source order.
pub fn copy_cells_if<F>(
    src: MeshRef<'_>,
    dst: &mut MeshHierarchy,
    dst_mesh: MeshId,
    options: CopyOptions,
    mut pred: F,
) -> Result<Vec<ElementId>, MeshError>
where
    F: FnMut(ElementId) -> bool,
{
    let mut map = ElementCopyMap::with_options(dst, dst_mesh, options);
    let mut out = Vec::new();
    for cell in src.cells() {
        if pred(cell) {
            out.push(map.copy(src, cell)?);
        }
    }
    Ok(out)
}
