//! Target points for splitting.

use std::collections::BTreeMap;

use mesh_poly::{Point3, PolyGeometry};

/// Volumetric centroid of each given cell, keyed by cell index.
pub fn cell_centroids<M>(mesh: &M, cells: &[usize]) -> BTreeMap<usize, Point3<f64>>
where
    M: PolyGeometry + ?Sized,
{
    cells.iter().map(|&c| (c, mesh.cell_centre(c))).collect()
}

/// Area centroid of each given face, keyed by face index.
pub fn face_centroids<M>(mesh: &M, faces: &[usize]) -> BTreeMap<usize, Point3<f64>>
where
    M: PolyGeometry + ?Sized,
{
    faces.iter().map(|&f| (f, mesh.face_centre(f))).collect()
}
