mod util;

use mesh_incidence::algs::boundary::{
    boundary_elements, classify_boundary, is_boundary, tag_boundary,
};
use mesh_incidence::algs::meshgen::{
    StructuredCellType, make_aa_cube_hull, make_icosahedron_hull, structured_grid_2d,
};
use mesh_incidence::prelude::*;
use util::*;

#[test]
fn closed_surface_has_no_boundary() {
    let mut h = MeshHierarchy::new();
    make_icosahedron_hull(&mut h, MeshId::Root, [0.0; 3], 1.0).unwrap();
    let root = h.root();
    for dim in 0..2 {
        assert!(boundary_elements(root, dim).unwrap().is_empty());
    }

    let mut h = MeshHierarchy::new();
    make_aa_cube_hull(&mut h, MeshId::Root, [0.0; 3], [1.0; 3], StructuredCellType::Quadrilateral).unwrap();
    assert!(boundary_elements(h.root(), 1).unwrap().is_empty());
}

#[test]
fn tutorial_boundary() {
    let m = tutorial();
    let root = m.h.root();
    let lines = classify_boundary(root, 1).unwrap();
    assert_eq!(lines.boundary.len(), 8);
    assert_eq!(lines.interior.len(), 8);

    let vertices = boundary_elements(root, 0).unwrap();
    let want: Vec<_> = m.v.iter().copied().filter(|&v| v != m.v[4]).collect();
    assert_eq!(vertices, want);

    // cells are never boundary
    for &t in &m.t {
        assert!(!is_boundary(root, t).unwrap());
    }
}

#[test]
fn open_square_of_quads() {
    let mut h = MeshHierarchy::new();
    let cells = structured_grid_2d(
        &mut h,
        MeshId::Root,
        2,
        2,
        [0.0, 0.0],
        [1.0, 1.0],
        StructuredCellType::Quadrilateral,
    )
    .unwrap();
    assert_eq!(cells.len(), 4);
    let root = h.root();
    assert_eq!(root.element_count(1), 12);
    assert_eq!(boundary_elements(root, 1).unwrap().len(), 8);
    // only the center vertex is interior
    let interior = classify_boundary(root, 0).unwrap().interior;
    assert_eq!(interior.len(), 1);
    assert_eq!(h.point(interior[0]).unwrap(), Point::from([0.5, 0.5]));
}

#[test]
fn single_cell_region_is_all_boundary() {
    let mut m = tutorial();
    let r = m.h.make_region();
    m.h.add(MeshId::Region(r), m.t[5]).unwrap();
    let region = m.h.region_mesh(r).unwrap();
    assert_eq!(boundary_elements(region, 1).unwrap().len(), 3);
    assert_eq!(boundary_elements(region, 0).unwrap().len(), 3);
    // outside the region
    assert!(!is_boundary(region, m.v[0]).unwrap());
}

#[test]
fn tag_boundary_collects_boundary_closure() {
    let mut m = tutorial();
    let tag = RegionId(10);
    let classification = tag_boundary(&mut m.h, MeshId::Root, 1, tag).unwrap();
    assert_eq!(classification.boundary.len(), 8);
    let region = m.h.region_mesh(tag).unwrap();
    assert_eq!(region.element_count(1), 8);
    assert_eq!(region.element_count(0), 8);
    assert_eq!(region.cell_dimension(), Some(1));
    assert!(!m.h.is_in_region(tag, m.v[4]));
}

#[test]
fn stale_element_is_an_error() {
    let mut m = tutorial();
    m.h.erase_elements(MeshId::Root, [m.t[0]]).unwrap();
    assert_eq!(is_boundary(m.h.root(), m.t[0]), Err(MeshError::InvalidElement(m.t[0])));
}
