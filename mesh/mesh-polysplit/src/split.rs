//! End-to-end splitting: select, queue, commit, renumber.

use mesh_poly::{MovePoints, PolyGeometry, ShapeMatcher};
use mesh_topo_change::{MeshMap, TopoChange};
use tracing::{debug, info};

use crate::{SplitError, SplitResult};
use crate::centroid::{cell_centroids, face_centroids};
use crate::classify::{find_polygonal_faces, find_polyhedral_cells};
use crate::params::SplitParams;
use crate::pyramid::{CellSplitter, PyramidSplitter};
use crate::result::{MeshCounts, SplitKind, SplitReport};
use crate::triangulate::FaceTriangulator;

/// Triangulate every face with more than `params.max_face_edges` edges
/// around its centroid.
///
/// `engine` must have been created for `mesh`. Faces with few enough edges
/// are not touched; if there are none to split the commit is empty and the
/// mesh stays as it was.
///
/// # Errors
///
/// Returns an error if the engine rejects the commit or point motion fails.
///
/// # Example
///
/// ```
/// use mesh_poly::prism_column;
/// use mesh_polysplit::{SplitParams, split_faces};
/// use mesh_topo_change::PolyTopoChange;
///
/// // The two pentagonal caps become five triangles each
/// let mut mesh = prism_column(5, 1);
/// let engine = PolyTopoChange::new(&mesh);
/// let report = split_faces(&mut mesh, engine, &SplitParams::default())?;
///
/// assert_eq!(report.split, 2);
/// assert_eq!(report.after.faces, 15);
/// assert_eq!(report.after.points, 12);
/// # Ok::<(), mesh_polysplit::SplitError>(())
/// ```
pub fn split_faces<M, T>(
    mesh: &mut M,
    mut engine: T,
    params: &SplitParams,
) -> SplitResult<SplitReport>
where
    M: PolyGeometry + MovePoints,
    T: TopoChange<Mesh = M>,
{
    let before = MeshCounts::of(&*mesh);

    let faces = find_polygonal_faces(&*mesh, params);
    info!(
        "Found {} faces with more than {} edges",
        faces.len(),
        params.max_face_edges
    );

    let centroids = face_centroids(&*mesh, &faces);
    let mut triangulator = FaceTriangulator::new();
    triangulator.set_refinement(&*mesh, &centroids, &mut engine);

    let map = commit(engine, mesh)?;
    triangulator.update_mesh(&map);

    Ok(SplitReport {
        kind: SplitKind::Faces,
        split: faces.len(),
        before,
        after: MeshCounts::of(&*mesh),
        added_points: triangulator.added_points().clone(),
    })
}

/// Decompose every cell that matches none of `matchers` into pyramids
/// around its centroid.
///
/// # Errors
///
/// Returns an error if a selected cell is not closed, the engine rejects
/// the commit, or point motion fails.
///
/// # Example
///
/// ```
/// use mesh_poly::{CellShape, prism_column};
/// use mesh_polysplit::split_cells;
/// use mesh_topo_change::PolyTopoChange;
///
/// let mut mesh = prism_column(5, 1);
/// let engine = PolyTopoChange::new(&mesh);
/// let report = split_cells(&mut mesh, engine, &CellShape::ALL)?;
///
/// assert_eq!(report.after.cells, 7);
/// assert_eq!(report.after.faces, 7 + 15);
/// # Ok::<(), mesh_polysplit::SplitError>(())
/// ```
pub fn split_cells<M, T, S>(mesh: &mut M, engine: T, matchers: &[S]) -> SplitResult<SplitReport>
where
    M: PolyGeometry + MovePoints,
    T: TopoChange<Mesh = M>,
    S: ShapeMatcher<M>,
{
    split_cells_with(mesh, engine, matchers, &mut PyramidSplitter::new())
}

/// Like [`split_cells`], with a caller-provided [`CellSplitter`].
///
/// # Errors
///
/// Returns an error if the splitter rejects a cell, the engine rejects the
/// commit, or point motion fails.
pub fn split_cells_with<M, T, S, C>(
    mesh: &mut M,
    mut engine: T,
    matchers: &[S],
    splitter: &mut C,
) -> SplitResult<SplitReport>
where
    M: PolyGeometry + MovePoints,
    T: TopoChange<Mesh = M>,
    S: ShapeMatcher<M>,
    C: CellSplitter,
{
    let before = MeshCounts::of(&*mesh);

    let cells = find_polyhedral_cells(&*mesh, matchers);
    info!("Found {} cells that are not reference shapes", cells.len());

    let centres = cell_centroids(&*mesh, &cells);
    splitter.set_refinement(&*mesh, &centres, &mut engine)?;

    let map = commit(engine, mesh)?;
    splitter.update_mesh(&map);

    Ok(SplitReport {
        kind: SplitKind::Cells,
        split: cells.len(),
        before,
        after: MeshCounts::of(&*mesh),
        added_points: splitter.added_points().clone(),
    })
}

fn commit<M, T>(engine: T, mesh: &mut M) -> SplitResult<MeshMap>
where
    M: MovePoints,
    T: TopoChange<Mesh = M>,
{
    let map = engine
        .commit(mesh)
        .map_err(|e| SplitError::Commit(Box::new(e)))?;

    if let Some(points) = &map.pre_motion_points {
        debug!(points = points.len(), "Applying pre-motion points");
        mesh.move_points(points.clone())?;
    }

    Ok(map)
}
