//! Small reference meshes.
//!
//! Every boundary face is oriented outward and every internal face points
//! from its owner into its neighbour.

use std::f64::consts::TAU;

use nalgebra::Point3;

use crate::{Face, Patch, PolyMesh};

/// A stack of `layers` prism cells over a regular `sides`-gon of radius 1.
///
/// Cell `k` spans `z` in `[k, k+1]`. With `sides == 4` every cell is a
/// hexahedron, with `sides == 3` a triangular prism, and with `sides == 5`
/// a seven-faced polyhedron with two pentagonal caps.
///
/// Faces are ordered internal faces first (the rings between layers), then
/// the patches `bottom`, `top` and `sides`.
///
/// # Panics
///
/// Panics if `sides < 3` or `layers == 0`.
///
/// # Example
///
/// ```
/// use mesh_poly::{PolyTopology, prism_column};
///
/// let mesh = prism_column(5, 2);
/// assert_eq!(mesh.n_cells(), 2);
/// assert_eq!(mesh.n_internal_faces(), 1);
/// assert_eq!(mesh.n_faces(), 1 + 2 + 10);
/// ```
#[must_use]
pub fn prism_column(sides: usize, layers: usize) -> PolyMesh {
    assert!(sides >= 3, "a prism needs at least three sides");
    assert!(layers >= 1, "a column needs at least one layer");

    let ring = |k: usize, i: usize| k * sides + (i % sides);

    let mut points = Vec::with_capacity(sides * (layers + 1));
    for k in 0..=layers {
        for i in 0..sides {
            #[allow(clippy::cast_precision_loss)]
            let angle = TAU * i as f64 / sides as f64;
            #[allow(clippy::cast_precision_loss)]
            points.push(Point3::new(angle.cos(), angle.sin(), k as f64));
        }
    }

    let mut faces = Vec::new();
    let mut owner = Vec::new();
    let mut neighbour = Vec::new();

    // Internal rings, normal +z from the lower cell
    for k in 1..layers {
        faces.push(Face::new((0..sides).map(|i| ring(k, i)).collect()));
        owner.push(k - 1);
        neighbour.push(k);
    }

    let n_internal = faces.len();

    // Bottom cap, normal -z
    faces.push(Face::new((0..sides).map(|i| ring(0, i)).collect()).reversed());
    owner.push(0);

    // Top cap, normal +z
    faces.push(Face::new((0..sides).map(|i| ring(layers, i)).collect()));
    owner.push(layers - 1);

    // Sides, normal radially outward
    for k in 0..layers {
        for i in 0..sides {
            faces.push(Face::new(vec![
                ring(k, i),
                ring(k, i + 1),
                ring(k + 1, i + 1),
                ring(k + 1, i),
            ]));
            owner.push(k);
        }
    }

    let patches = vec![
        Patch::new("bottom", n_internal, 1),
        Patch::new("top", n_internal + 1, 1),
        Patch::new("sides", n_internal + 2, sides * layers),
    ];

    build(points, faces, owner, neighbour, patches)
}

/// A single tetrahedron on the unit corner `(0,0,0)..(1,1,1)`.
#[must_use]
pub fn tetrahedron() -> PolyMesh {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];
    let faces = vec![
        Face::from([0, 2, 1]),
        Face::from([0, 1, 3]),
        Face::from([0, 3, 2]),
        Face::from([1, 2, 3]),
    ];
    build(points, faces, vec![0; 4], Vec::new(), vec![Patch::new("walls", 0, 4)])
}

/// A single square pyramid with apex above the unit square.
#[must_use]
pub fn pyramid() -> PolyMesh {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.5, 0.5, 1.0),
    ];
    let faces = vec![
        Face::from([0, 3, 2, 1]),
        Face::from([0, 1, 4]),
        Face::from([1, 2, 4]),
        Face::from([2, 3, 4]),
        Face::from([3, 0, 4]),
    ];
    build(points, faces, vec![0; 5], Vec::new(), vec![Patch::new("walls", 0, 5)])
}

fn build(
    points: Vec<Point3<f64>>,
    faces: Vec<Face>,
    owner: Vec<usize>,
    neighbour: Vec<usize>,
    patches: Vec<Patch>,
) -> PolyMesh {
    match PolyMesh::new(points, faces, owner, neighbour, patches) {
        Ok(mesh) => mesh,
        Err(err) => unreachable!("reference mesh is invalid: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PolyGeometry, PolyTopology};
    use approx::assert_relative_eq;

    #[test]
    fn caps_point_outward() {
        let mesh = prism_column(5, 2);
        let bottom = mesh.find_patch("bottom").unwrap();
        let top = mesh.find_patch("top").unwrap();
        let b = mesh.patches()[bottom].start;
        let t = mesh.patches()[top].start;
        assert!(mesh.face_area_vector(b).z < 0.0);
        assert!(mesh.face_area_vector(t).z > 0.0);
        assert!(mesh.face_area_vector(0).z > 0.0);
    }

    #[test]
    fn column_volume() {
        // Regular pentagon of circumradius 1: area = 5/2 * sin(72 deg)
        let mesh = prism_column(5, 3);
        let area = 2.5 * (TAU / 5.0).sin();
        assert_relative_eq!(mesh.total_volume(), 3.0 * area, epsilon = 1e-10);
    }

    #[test]
    fn pyramid_volume() {
        let mesh = pyramid();
        assert_eq!(mesh.n_faces(), 5);
        assert_relative_eq!(mesh.cell_volume(0), 1.0 / 3.0, epsilon = 1e-12);
    }
}
