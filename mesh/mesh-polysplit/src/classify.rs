//! Selecting the cells and faces to split.

use mesh_poly::{PolyTopology, ShapeMatcher};

use crate::SplitParams;

/// Cells that match none of the given reference shapes, ascending.
///
/// Matchers are tried in order and the first match wins, so a cell is
/// returned only if every matcher rejects it.
///
/// # Example
///
/// ```
/// use mesh_poly::{CellShape, prism_column};
/// use mesh_polysplit::find_polyhedral_cells;
///
/// let hexes = prism_column(4, 3);
/// assert!(find_polyhedral_cells(&hexes, &CellShape::ALL).is_empty());
///
/// let pentagons = prism_column(5, 3);
/// assert_eq!(find_polyhedral_cells(&pentagons, &CellShape::ALL), vec![0, 1, 2]);
/// ```
pub fn find_polyhedral_cells<M, S>(mesh: &M, matchers: &[S]) -> Vec<usize>
where
    M: PolyTopology + ?Sized,
    S: ShapeMatcher<M>,
{
    (0..mesh.n_cells())
        .filter(|&cell| !matchers.iter().any(|m| m.matches(mesh, cell)))
        .collect()
}

/// Faces that `params` marks for triangulation, ascending.
pub fn find_polygonal_faces<M>(mesh: &M, params: &SplitParams) -> Vec<usize>
where
    M: PolyTopology + ?Sized,
{
    (0..mesh.n_faces())
        .filter(|&face| params.splits_face(mesh.face(face).len()))
        .collect()
}
