use mesh_incidence::algs::boundary::{boundary_elements, is_interface};
use mesh_incidence::algs::meshgen::{StructuredCellType, structured_grid_2d};
use mesh_incidence::algs::traversal::closure;
use mesh_incidence::prelude::*;
use proptest::prelude::*;

fn grid(nx: usize, ny: usize, quads: bool) -> (MeshHierarchy, Vec<ElementId>) {
    let mut h = MeshHierarchy::with_config(HierarchyConfig {
        geometric_dimension: Some(2),
        check_invariants: true,
    })
    .unwrap();
    let cell_type = if quads {
        StructuredCellType::Quadrilateral
    } else {
        StructuredCellType::Triangle
    };
    let cells = structured_grid_2d(&mut h, MeshId::Root, nx, ny, [0.0, 0.0], [1.0, 1.0], cell_type)
        .unwrap();
    (h, cells)
}

fn pick(cells: &[ElementId], mask: u64) -> Vec<ElementId> {
    cells
        .iter()
        .enumerate()
        .filter(|(i, _)| (mask >> (i % 64)) & 1 == 1)
        .map(|(_, &c)| c)
        .collect()
}

proptest! {
    #[test]
    fn permuted_vertices_hit_the_same_element(
        order in Just(vec![0usize, 1, 2, 3]).prop_shuffle(),
    ) {
        let mut h = MeshHierarchy::new();
        let v: Vec<_> = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
            .into_iter()
            .map(|p| h.make_vertex(MeshId::Root, Point::from(p)).unwrap())
            .collect();
        let tet = h.make_tetrahedron(MeshId::Root, [v[0], v[1], v[2], v[3]]).unwrap();
        let permuted = [v[order[0]], v[order[1]], v[order[2]], v[order[3]]];
        prop_assert_eq!(h.make_tetrahedron(MeshId::Root, permuted).unwrap(), tet);
        let tri = h.make_triangle(MeshId::Root, [permuted[0], permuted[1], permuted[2]]).unwrap();
        prop_assert!(h.boundary(tet, 2).unwrap().any(|f| f == tri));
        prop_assert_eq!(h.root().element_count(2), 4);
    }

    #[test]
    fn grid_topology_is_consistent(nx in 1usize..6, ny in 1usize..6, quads in any::<bool>()) {
        let (h, cells) = grid(nx, ny, quads);
        let root = h.root();
        let (v, e, f) = (root.element_count(0), root.element_count(1), root.element_count(2));
        prop_assert_eq!(v, (nx + 1) * (ny + 1));
        prop_assert_eq!(f, cells.len());
        // a disc
        prop_assert_eq!(v as i64 - e as i64 + f as i64, 1);
        prop_assert_eq!(boundary_elements(root, 1).unwrap().len(), 2 * (nx + ny));
        h.validate_invariants().unwrap();
    }

    #[test]
    fn neighbor_relation_is_symmetric(nx in 1usize..5, ny in 1usize..5, quads in any::<bool>(), connector in 0usize..2) {
        let (h, cells) = grid(nx, ny, quads);
        let root = h.root();
        for &a in &cells {
            for b in root.neighbors(a, connector, 2).unwrap() {
                prop_assert_ne!(a, b);
                prop_assert!(root.neighbors(b, connector, 2).unwrap().any(|x| x == a));
            }
        }
    }

    #[test]
    fn coboundary_mirrors_boundary(nx in 1usize..5, ny in 1usize..5, quads in any::<bool>()) {
        let (h, cells) = grid(nx, ny, quads);
        let root = h.root();
        for &c in &cells {
            for d in 0..2 {
                for sub in h.boundary(c, d).unwrap() {
                    prop_assert!(root.coboundary(sub, 2).unwrap().any(|x| x == c));
                }
            }
        }
        for l in root.lines() {
            for up in root.coboundary(l, 2).unwrap() {
                prop_assert!(h.boundary(up, 1).unwrap().any(|x| x == l));
            }
        }
    }

    #[test]
    fn regions_are_closed_under_boundary(nx in 1usize..5, ny in 1usize..5, mask in any::<u64>()) {
        let (mut h, cells) = grid(nx, ny, false);
        let r = h.make_region();
        let chosen = pick(&cells, mask);
        for &c in &chosen {
            h.add(MeshId::Region(r), c).unwrap();
        }
        let region = h.region_mesh(r).unwrap();
        prop_assert_eq!(region.element_count(2), chosen.len());
        let members: Vec<_> = (0..3).flat_map(|d| region.elements(d)).collect();
        let mut expected = closure(h.root(), chosen.iter().copied()).unwrap();
        expected.sort_unstable();
        let mut got = members.clone();
        got.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn interface_is_symmetric(nx in 1usize..5, ny in 1usize..5, mask_a in any::<u64>(), mask_b in any::<u64>()) {
        let (mut h, cells) = grid(nx, ny, true);
        let a = h.make_region();
        let b = h.make_region();
        for c in pick(&cells, mask_a) {
            h.add(MeshId::Region(a), c).unwrap();
        }
        for c in pick(&cells, mask_b) {
            h.add(MeshId::Region(b), c).unwrap();
        }
        for d in 0..2 {
            for e in h.root().elements(d) {
                let ab = is_interface(&h, a, b, e).unwrap();
                prop_assert_eq!(ab, is_interface(&h, b, a, e).unwrap());
                if ab {
                    prop_assert!(h.is_in_region(a, e) && h.is_in_region(b, e));
                }
            }
        }
    }

    #[test]
    fn root_erase_leaves_no_dangling_links(nx in 1usize..5, ny in 1usize..5, mask in any::<u64>()) {
        let (mut h, _) = grid(nx, ny, false);
        let vertices: Vec<_> = h.root().vertices().collect();
        let doomed = pick(&vertices, mask);
        h.erase_elements(MeshId::Root, doomed.iter().copied()).unwrap();
        for &v in &doomed {
            prop_assert!(!h.is_valid(v));
        }
        let root = h.root();
        for d in 1..3 {
            for e in root.elements(d) {
                for sub in h.boundary(e, 0).unwrap() {
                    prop_assert!(h.is_valid(sub));
                }
            }
        }
        h.validate_invariants().unwrap();
    }
}
