//! Integration tests for pyramid decomposition.

use approx::assert_relative_eq;
use mesh_poly::{
    prism_column, pyramid, tetrahedron, CellShape, FaceZone, PolyGeometry, PolyMesh, PolyTopology,
};
use mesh_polysplit::{SplitError, SplitParams, find_polyhedral_cells, split_cells, split_faces};
use mesh_topo_change::PolyTopoChange;

fn decompose(mesh: &mut PolyMesh) -> mesh_polysplit::SplitReport {
    let engine = PolyTopoChange::new(mesh);
    split_cells(mesh, engine, &CellShape::ALL).unwrap()
}

#[test]
fn reference_shapes_are_never_split() {
    for mut mesh in [tetrahedron(), pyramid(), prism_column(3, 2), prism_column(4, 3)] {
        let before = mesh.clone();
        let report = decompose(&mut mesh);
        assert!(!report.was_split());
        assert_eq!(mesh, before);
    }
}

#[test]
fn seven_faced_cell_becomes_seven_pyramids() {
    let mut mesh = prism_column(5, 1);
    assert_eq!(find_polyhedral_cells(&mesh, &CellShape::ALL), vec![0]);
    let volume = mesh.total_volume();

    let report = decompose(&mut mesh);

    assert_eq!(report.split, 1);
    assert_eq!(mesh.n_cells(), 7);
    assert_eq!(mesh.n_points(), 11);
    // Fifteen prism edges, one internal triangle each
    assert_eq!(mesh.n_internal_faces(), 15);
    assert_eq!(mesh.n_faces(), 22);
    assert_relative_eq!(mesh.total_volume(), volume, epsilon = 1e-10);

    // Two pentagonal pyramids, five square pyramids
    let pyramids = (0..7)
        .filter(|&c| CellShape::of(&mesh, c) == Some(CellShape::Pyramid))
        .count();
    assert_eq!(pyramids, 5);

    // Every cell has the centre point as apex
    let centre = report.added_points[&0];
    assert_eq!(centre, 10);
    for cell in 0..mesh.n_cells() {
        let touches = mesh
            .cell_faces(cell)
            .iter()
            .any(|&f| mesh.face(f).points().contains(&centre));
        assert!(touches, "cell {cell} misses the apex");
    }
}

#[test]
fn boundary_faces_keep_patch_and_zone() {
    let mut mesh = prism_column(6, 1)
        .with_face_zones(vec![FaceZone::new("lid", vec![1], vec![true])])
        .unwrap();
    let top_area = mesh.face_area_vector(1);

    decompose(&mut mesh);

    let top = &mesh.patches()[mesh.find_patch("top").unwrap()];
    assert_eq!(top.size, 1);
    assert_relative_eq!(mesh.face_area_vector(top.start), top_area, epsilon = 1e-12);
    assert_eq!(mesh.face_zones()[0].faces, vec![top.start]);
    assert_eq!(mesh.face_zones()[0].flip_map, vec![true]);
}

#[test]
fn internal_face_between_split_and_unsplit_cells() {
    // Pentagonal column with a zone on the upper internal ring
    let mut mesh = prism_column(5, 3)
        .with_face_zones(vec![FaceZone::new("ring", vec![1], vec![false])])
        .unwrap();
    let ring_area = mesh.face_area_vector(1);
    let volume = mesh.total_volume();

    let engine = PolyTopoChange::new(&mesh);
    // Split only the middle cell by treating its neighbours as matched
    let report = mesh_polysplit::split_cells_with(
        &mut mesh,
        engine,
        &[MiddleOnly],
        &mut mesh_polysplit::PyramidSplitter::new(),
    )
    .unwrap();
    assert_eq!(report.split, 1);
    assert_relative_eq!(mesh.total_volume(), volume, epsilon = 1e-10);

    // The ring now runs from cell 2 into a new pyramid, so it was flipped
    let zone = &mesh.face_zones()[0];
    let ring = zone.faces[0];
    assert!(zone.flip_map[0]);
    assert_relative_eq!(mesh.face_area_vector(ring), -ring_area, epsilon = 1e-12);
    assert_eq!(mesh.face_owner(ring), 2);
}

struct MiddleOnly;

impl mesh_poly::ShapeMatcher<PolyMesh> for MiddleOnly {
    fn matches(&self, _mesh: &PolyMesh, cell: usize) -> bool {
        cell != 1
    }
}

#[test]
fn triangulated_then_decomposed() {
    let mut mesh = prism_column(5, 2);
    let volume = mesh.total_volume();

    let engine = PolyTopoChange::new(&mesh);
    split_faces(&mut mesh, engine, &SplitParams::default()).unwrap();
    assert_eq!(mesh.n_cells(), 2);

    // Each cell: 5 quads, 5 cap triangles, 5 ring triangles
    let report = decompose(&mut mesh);
    assert_eq!(report.split, 2);
    assert_eq!(mesh.n_cells(), 30);
    assert_relative_eq!(mesh.total_volume(), volume, epsilon = 1e-10);
    let floor = 1e-6 * volume;
    assert!((0..mesh.n_cells()).all(|c| mesh.cell_volume(c) > floor));
    assert!(mesh.min_face_pyramid_volume() > floor);
}

#[test]
fn open_cell_reported() {
    let mut data = tetrahedron().into_data();
    data.faces[2] = mesh_poly::Face::from([0, 3, 1]);
    let mut mesh = PolyMesh::from_data(data).unwrap();

    let engine = PolyTopoChange::new(&mesh);
    let none: [CellShape; 0] = [];
    let err = split_cells(&mut mesh, engine, &none).unwrap_err();
    assert!(matches!(err, SplitError::OpenCell { cell: 0, .. }));
}
