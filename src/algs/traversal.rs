//! DFS/BFS walks over the incidence graph of a mesh.
//!
//! Each step moves one dimension: down to the facets of an element, or up to
//! the elements of the mesh one dimension higher that contain it. Only
//! elements contained in the mesh are visited.

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::mesh_error::MeshError;
use crate::topology::element_id::ElementId;
use crate::topology::element_kind::MAX_TOPOLOGICAL_DIMENSION;
use crate::topology::mesh::MeshRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Down,
    Up,
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    DFS,
    BFS,
}

pub struct TraversalBuilder<'a> {
    mesh: MeshRef<'a>,
    seeds: Vec<ElementId>,
    dir: Dir,
    strat: Strategy,
    max_depth: Option<u32>,
    /// If returns true on a visited element, traversal stops early.
    early_stop: Option<&'a dyn Fn(ElementId) -> bool>,
}

impl<'a> TraversalBuilder<'a> {
    pub fn new(mesh: MeshRef<'a>) -> Self {
        Self {
            mesh,
            seeds: Vec::new(),
            dir: Dir::Down,
            strat: Strategy::DFS,
            max_depth: None,
            early_stop: None,
        }
    }
    pub fn seeds<I: IntoIterator<Item = ElementId>>(mut self, it: I) -> Self {
        self.seeds = it.into_iter().collect();
        self
    }
    pub fn dir(mut self, d: Dir) -> Self {
        self.dir = d;
        self
    }
    pub fn dfs(mut self) -> Self {
        self.strat = Strategy::DFS;
        self
    }
    pub fn bfs(mut self) -> Self {
        self.strat = Strategy::BFS;
        self
    }
    /// Maximum number of dimension steps from a seed.
    pub fn max_depth(mut self, d: Option<u32>) -> Self {
        self.max_depth = d;
        self
    }
    pub fn early_stop(mut self, f: &'a dyn Fn(ElementId) -> bool) -> Self {
        self.early_stop = Some(f);
        self
    }

    /// Visited elements in ascending order. Seeds outside the mesh are dropped;
    /// stale seeds are an error.
    pub fn run(self) -> Result<Vec<ElementId>, MeshError> {
        let TraversalBuilder {
            mesh,
            seeds,
            dir,
            strat,
            max_depth,
            early_stop,
        } = self;
        let mut seen: HashSet<ElementId> = HashSet::new();
        let mut work: VecDeque<(ElementId, u32)> = VecDeque::new();
        for s in seeds {
            mesh.hierarchy().kind(s)?;
            if mesh.contains(s) && seen.insert(s) {
                work.push_back((s, 0));
            }
        }

        loop {
            let next = match strat {
                Strategy::DFS => work.pop_back(),
                Strategy::BFS => work.pop_front(),
            };
            let Some((e, depth)) = next else {
                break;
            };
            if early_stop.is_some_and(|f| f(e)) {
                break;
            }
            if max_depth.is_some_and(|md| depth >= md) {
                continue;
            }
            for q in step(mesh, dir, e)? {
                if mesh.contains(q) && seen.insert(q) {
                    work.push_back((q, depth + 1));
                }
            }
        }
        let mut out: Vec<_> = seen.into_iter().collect();
        out.sort_unstable();
        Ok(out)
    }
}

fn step(mesh: MeshRef<'_>, dir: Dir, e: ElementId) -> Result<Vec<ElementId>, MeshError> {
    let dim = e.dimension();
    let mut out = Vec::new();
    if matches!(dir, Dir::Down | Dir::Both) && dim > 0 {
        out.extend(mesh.hierarchy().boundary(e, dim - 1)?);
    }
    if matches!(dir, Dir::Up | Dir::Both) && dim < MAX_TOPOLOGICAL_DIMENSION {
        out.extend(mesh.coboundary(e, dim + 1)?);
    }
    Ok(out)
}

/// Seeds and everything below them in `mesh`.
pub fn closure<I>(mesh: MeshRef<'_>, seeds: I) -> Result<Vec<ElementId>, MeshError>
where
    I: IntoIterator<Item = ElementId>,
{
    TraversalBuilder::new(mesh)
        .dir(Dir::Down)
        .dfs()
        .seeds(seeds)
        .run()
}

/// Seeds and everything above them in `mesh`.
pub fn star<I>(mesh: MeshRef<'_>, seeds: I) -> Result<Vec<ElementId>, MeshError>
where
    I: IntoIterator<Item = ElementId>,
{
    TraversalBuilder::new(mesh)
        .dir(Dir::Up)
        .dfs()
        .seeds(seeds)
        .run()
}

/// Closure of the star of `e`, minus the closure and star of `e` itself.
pub fn link(mesh: MeshRef<'_>, e: ElementId) -> Result<Vec<ElementId>, MeshError> {
    let st = star(mesh, [e])?;
    let own: HashSet<ElementId> = closure(mesh, [e])?.into_iter().chain(st.iter().copied()).collect();
    let mut out = closure(mesh, st)?;
    out.retain(|x| !own.contains(x));
    Ok(out)
}
