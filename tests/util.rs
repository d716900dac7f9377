#![allow(dead_code)]
use mesh_incidence::prelude::*;

pub fn vx(h: &mut MeshHierarchy, coords: [f64; 2]) -> ElementId {
    h.make_vertex(MeshId::Root, Point::from(coords)).unwrap()
}

/// 3×3 vertex grid (ids 0..9, row-major) with eight triangles:
///
/// ```text
/// 6---7---8
/// | \ | \ |
/// 3---4---5
/// | \ | \ |
/// 0---1---2
/// ```
///
/// t0=(0,1,3) t1=(1,4,3) t2=(1,5,4) t3=(1,2,5)
/// t4=(3,7,6) t5=(3,4,7) t6=(4,5,7) t7=(5,8,7)
pub struct Tutorial {
    pub h: MeshHierarchy,
    pub v: Vec<ElementId>,
    pub t: Vec<ElementId>,
}

pub const TUTORIAL_TRIANGLES: [[usize; 3]; 8] = [
    [0, 1, 3],
    [1, 4, 3],
    [1, 5, 4],
    [1, 2, 5],
    [3, 7, 6],
    [3, 4, 7],
    [4, 5, 7],
    [5, 8, 7],
];

pub fn tutorial() -> Tutorial {
    let mut h = MeshHierarchy::with_config(HierarchyConfig {
        geometric_dimension: Some(2),
        check_invariants: true,
    })
    .unwrap();
    let mut v = Vec::new();
    for j in 0..3 {
        for i in 0..3 {
            v.push(vx(&mut h, [i as f64, j as f64]));
        }
    }
    let t = TUTORIAL_TRIANGLES
        .iter()
        .map(|tri| {
            h.make_triangle(MeshId::Root, [v[tri[0]], v[tri[1]], v[tri[2]]])
                .unwrap()
        })
        .collect();
    Tutorial { h, v, t }
}

/// Line between two vertices, looked up (or created) through dedup.
pub fn line(h: &mut MeshHierarchy, a: ElementId, b: ElementId) -> ElementId {
    h.make_line(MeshId::Root, [a, b]).unwrap()
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Clone + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
