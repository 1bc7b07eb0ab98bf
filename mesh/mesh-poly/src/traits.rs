//! Traits for polyhedral mesh types.

use nalgebra::Point3;

use crate::{Face, MeshResult, ZoneMembership};

/// Read access to polyhedral mesh connectivity.
///
/// This is the interface splitting algorithms are written against, so they
/// work with any mesh representation that can answer these queries.
///
/// Faces `0..n_internal_faces()` are internal; the rest are boundary faces.
pub trait PolyTopology {
    /// Number of points.
    fn n_points(&self) -> usize;

    /// Number of faces.
    fn n_faces(&self) -> usize;

    /// Number of internal faces.
    fn n_internal_faces(&self) -> usize;

    /// Number of cells.
    fn n_cells(&self) -> usize;

    /// Get a face by index.
    ///
    /// # Panics
    ///
    /// Panics if `face` is out of bounds.
    fn face(&self, face: usize) -> &Face;

    /// Cell that owns a face.
    fn face_owner(&self, face: usize) -> usize;

    /// Neighbour cell of an internal face, `None` on the boundary.
    fn face_neighbour(&self, face: usize) -> Option<usize>;

    /// Faces of a cell.
    fn cell_faces(&self, cell: usize) -> &[usize];

    /// Patch of a boundary face, `None` for internal faces.
    fn which_patch(&self, face: usize) -> Option<usize>;

    /// Face zone membership of a face, if any.
    fn which_face_zone(&self, face: usize) -> Option<ZoneMembership>;

    /// Cell zone of a cell, if any.
    fn which_cell_zone(&self, cell: usize) -> Option<usize>;

    /// Check whether a face is internal.
    #[inline]
    fn is_internal_face(&self, face: usize) -> bool {
        face < self.n_internal_faces()
    }
}

/// Geometry maintained alongside the connectivity.
pub trait PolyGeometry: PolyTopology {
    /// Point coordinates.
    fn points(&self) -> &[Point3<f64>];

    /// Area-weighted centroid of a face.
    fn face_centre(&self, face: usize) -> Point3<f64>;

    /// Volumetric centroid of a cell.
    fn cell_centre(&self, cell: usize) -> Point3<f64>;

    /// Volume of a cell.
    fn cell_volume(&self, cell: usize) -> f64;
}

/// Meshes whose points can be moved in place.
pub trait MovePoints {
    /// Replace all point positions and refresh derived geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the point count differs from the mesh's.
    fn move_points(&mut self, points: Vec<Point3<f64>>) -> MeshResult<()>;
}
