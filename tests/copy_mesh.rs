mod util;

use mesh_incidence::algs::copy::copy_cells_if;
use mesh_incidence::algs::simplexify::simplexify;
use mesh_incidence::prelude::*;
use util::*;

#[test]
fn copy_mesh_reproduces_topology_and_regions() {
    let mut m = tutorial();
    let r = m.h.make_region();
    m.h.set_region_name(r, "bottom").unwrap();
    for &t in &m.t[..4] {
        m.h.add(MeshId::Region(r), t).unwrap();
    }

    let mut dst = MeshHierarchy::new();
    let map = copy_mesh(m.h.root(), &mut dst, MeshId::Root, CopyOptions::default()).unwrap();
    assert_eq!(map.len(), 9 + 16 + 8);
    for d in 0..3 {
        assert_eq!(dst.root().element_count(d), m.h.root().element_count(d));
    }
    for &v in &m.v {
        assert_eq!(dst.point(map[&v]).unwrap(), m.h.point(v).unwrap());
    }

    let copied = dst.region_by_name("bottom").unwrap();
    assert_eq!(copied.id(), r);
    let region = dst.region_mesh(r).unwrap();
    assert_eq!(region.element_count(2), 4);
    assert_eq!(region.element_count(1), 9);

    // adjacency survives the copy
    let by_edge: Vec<_> = dst.root().neighbors(map[&m.t[1]], 1, 2).unwrap().collect();
    assert_permutation(&by_edge, &[map[&m.t[0]], map[&m.t[2]], map[&m.t[5]]]);
}

#[test]
fn copy_without_regions() {
    let mut m = tutorial();
    let r = m.h.make_region();
    m.h.add(MeshId::Region(r), m.t[0]).unwrap();
    let mut dst = MeshHierarchy::new();
    let options = CopyOptions {
        copy_regions: false,
        ..CopyOptions::default()
    };
    copy_mesh(m.h.root(), &mut dst, MeshId::Root, options).unwrap();
    assert_eq!(dst.region_count(), 0);
}

#[test]
fn copy_a_region_into_a_region() {
    let mut m = tutorial();
    let r = m.h.make_region();
    m.h.add(MeshId::Region(r), m.t[7]).unwrap();

    let mut dst = MeshHierarchy::new();
    let target = dst.get_make_region(RegionId(3));
    let options = CopyOptions {
        copy_regions: false,
        ..CopyOptions::default()
    };
    copy_mesh(m.h.region_mesh(r).unwrap(), &mut dst, MeshId::Region(target), options).unwrap();
    assert_eq!(dst.root().element_count(2), 1);
    assert_eq!(dst.region_mesh(target).unwrap().element_count(1), 3);
    assert_eq!(dst.region_mesh(target).unwrap().element_count(0), 3);
}

#[test]
fn copy_cells_by_predicate() {
    let m = tutorial();
    let keep = [m.t[0], m.t[1]];
    let mut dst = MeshHierarchy::new();
    let cells = copy_cells_if(m.h.root(), &mut dst, MeshId::Root, CopyOptions::default(), |c| {
        keep.contains(&c)
    })
    .unwrap();
    assert_eq!(cells.len(), 2);
    let root = dst.root();
    assert_eq!(root.element_count(0), 4);
    assert_eq!(root.element_count(1), 5);
    assert_eq!(root.element_count(2), 2);
}

#[test]
fn copy_map_reuses_existing_destination_elements() {
    let m = tutorial();
    let mut dst = MeshHierarchy::new();
    let mut map = ElementCopyMap::new(&mut dst, MeshId::Root);
    let a = map.copy(m.h.root(), m.t[0]).unwrap();
    let b = map.copy(m.h.root(), m.t[1]).unwrap();
    assert_ne!(a, b);
    // shared diagonal 1-3 is one element in the destination
    assert_eq!(map.destination().root().element_count(1), 5);
    assert_eq!(map.get(m.v[1]).map(|v| v.dimension()), Some(0));
    assert_eq!(map.get(m.t[5]), None);
}

#[test]
fn simplexify_hexahedron() {
    let mut src = MeshHierarchy::new();
    let v: Vec<_> = (0..8)
        .map(|k| {
            let p = [(k & 1) as f64, ((k >> 1) & 1) as f64, ((k >> 2) & 1) as f64];
            src.make_vertex(MeshId::Root, Point::from(p)).unwrap()
        })
        .collect();
    let hex = src
        .make_hexahedron(MeshId::Root, [v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7]])
        .unwrap();
    let r = src.make_region();
    src.set_region_name(r, "solid").unwrap();
    src.add(MeshId::Region(r), hex).unwrap();

    let mut dst = MeshHierarchy::new();
    let tets = simplexify(src.root(), &mut dst, MeshId::Root, CopyOptions::default()).unwrap();
    assert_eq!(tets.len(), 6);
    let root = dst.root();
    assert_eq!(root.element_count(0), 8);
    // 12 cube edges, 6 face diagonals, 1 body diagonal
    assert_eq!(root.element_count(1), 19);
    assert_eq!(root.element_count(2), 18);
    assert_eq!(root.element_count_by_kind(ElementKind::Tetrahedron), 6);

    let region = dst.region_by_name("solid").unwrap();
    assert_eq!(region.members().len(3), 6);
    // the body diagonal is shared by all six
    let diagonal = root
        .lines()
        .find(|&l| root.coboundary(l, 3).unwrap().count() == 6);
    assert!(diagonal.is_some());
}

#[test]
fn simplexify_mixed_2d_mesh() {
    let mut src = MeshHierarchy::new();
    let p: Vec<_> = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 0.5]]
        .into_iter()
        .map(|c| vx(&mut src, c))
        .collect();
    src.make_quadrilateral(MeshId::Root, [p[0], p[1], p[2], p[3]]).unwrap();
    src.make_triangle(MeshId::Root, [p[1], p[4], p[3]]).unwrap();

    let mut dst = MeshHierarchy::new();
    let out = simplexify(src.root(), &mut dst, MeshId::Root, CopyOptions::default()).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(dst.root().element_count_by_kind(ElementKind::Triangle), 3);
    assert_eq!(dst.root().element_count(1), 7);
}

#[test]
fn simplexify_rejects_plc() {
    let mut src = MeshHierarchy::new();
    let v: Vec<_> = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
        .into_iter()
        .map(|c| vx(&mut src, c))
        .collect();
    let lines: Vec<_> = (0..3).map(|i| line(&mut src, v[i], v[(i + 1) % 3])).collect();
    src.make_plc(MeshId::Root, &lines).unwrap();
    let mut dst = MeshHierarchy::new();
    assert!(matches!(
        simplexify(src.root(), &mut dst, MeshId::Root, CopyOptions::default()),
        Err(MeshError::UnsupportedKind { kind: ElementKind::Plc, .. })
    ));
}
