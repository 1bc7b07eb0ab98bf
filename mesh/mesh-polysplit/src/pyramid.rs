//! Pyramid decomposition of cells around an inserted centre point.

use std::collections::{BTreeMap, BTreeSet};

use hashbrown::HashMap;
use mesh_poly::{Face, Point3, PolyTopology};
use mesh_topo_change::{AddCell, AddFace, AddPoint, MeshMap, ModifyFace, TopoChange};
use tracing::debug;

use crate::{FaceInfo, SplitError, SplitResult};
use crate::renumber::translate_table;

/// Splits cells around a point inside each cell.
pub trait CellSplitter {
    /// Queue the commands that split every cell in `centres` around its
    /// point.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell cannot be split.
    fn set_refinement<M, T>(
        &mut self,
        mesh: &M,
        centres: &BTreeMap<usize, Point3<f64>>,
        engine: &mut T,
    ) -> SplitResult<()>
    where
        M: PolyTopology + ?Sized,
        T: TopoChange;

    /// Renumber internal tables after the engine committed.
    fn update_mesh(&mut self, map: &MeshMap);

    /// Cell index to centre point index, for every split cell.
    fn added_points(&self) -> &BTreeMap<usize, usize>;
}

/// Replaces each cell by one pyramid per face, all sharing the centre point
/// as apex.
///
/// The pyramid on the cell's first face keeps the cell index; the others
/// are new cells in the same cell zone. Each edge of the cell becomes an
/// internal triangle between the two pyramids on the faces sharing it. The
/// original faces are kept and re-attached to their pyramids.
///
/// Cells must be closed: every edge has to be used by exactly two of the
/// cell's faces.
///
/// # Example
///
/// ```
/// use mesh_poly::{PolyGeometry, PolyTopology, prism_column};
/// use mesh_polysplit::{CellSplitter, PyramidSplitter, cell_centroids};
/// use mesh_topo_change::{PolyTopoChange, TopoChange};
///
/// let mut mesh = prism_column(5, 1);
/// let volume = mesh.total_volume();
/// let centres = cell_centroids(&mesh, &[0]);
///
/// let mut engine = PolyTopoChange::new(&mesh);
/// let mut splitter = PyramidSplitter::new();
/// splitter.set_refinement(&mesh, &centres, &mut engine)?;
/// let map = engine.commit(&mut mesh).unwrap();
/// splitter.update_mesh(&map);
///
/// // One pyramid per face, one triangle per edge
/// assert_eq!(mesh.n_cells(), 7);
/// assert_eq!(mesh.n_internal_faces(), 15);
/// assert!((mesh.total_volume() - volume).abs() < 1e-10);
/// # Ok::<(), mesh_polysplit::SplitError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PyramidSplitter {
    cell_added_point: BTreeMap<usize, usize>,
}

impl PyramidSplitter {
    /// Create a splitter with an empty cell-to-point table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CellSplitter for PyramidSplitter {
    fn set_refinement<M, T>(
        &mut self,
        mesh: &M,
        centres: &BTreeMap<usize, Point3<f64>>,
        engine: &mut T,
    ) -> SplitResult<()>
    where
        M: PolyTopology + ?Sized,
        T: TopoChange,
    {
        self.cell_added_point.clear();

        // Cell index for the pyramid on each face of each split cell
        let mut pyramids: HashMap<usize, Vec<usize>> = HashMap::with_capacity(centres.len());

        for (&cell, &centre) in centres {
            let faces = mesh.cell_faces(cell);
            let master_point = faces
                .first()
                .and_then(|&f| mesh.face(f).points().first().copied());

            let point = engine.add_point(AddPoint {
                point: centre,
                master_point,
                zone: None,
                in_cell: true,
            });
            self.cell_added_point.insert(cell, point);

            let zone = mesh.which_cell_zone(cell);
            let mut cells = Vec::with_capacity(faces.len());
            cells.push(cell);
            for _ in 1..faces.len() {
                cells.push(engine.add_cell(AddCell {
                    master_cell: Some(cell),
                    zone,
                    ..AddCell::default()
                }));
            }
            pyramids.insert(cell, cells);
        }

        let mut added_faces = 0;
        for (&cell, &centre) in &self.cell_added_point {
            let cells = &pyramids[&cell];
            for edge in cell_edges(mesh, cell)? {
                let (p, q) = edge.outward(mesh, cell);
                let owner = cells[edge.second];
                let neighbour = cells[edge.first];

                // (p, q, c) points into the pyramid on the first face
                let (face, owner, neighbour) = if owner < neighbour {
                    (Face::triangle(p, q, centre), owner, neighbour)
                } else {
                    (Face::triangle(q, p, centre), neighbour, owner)
                };

                engine.add_face(AddFace {
                    face,
                    owner,
                    neighbour: Some(neighbour),
                    master_point: Some(p),
                    master_edge: None,
                    master_face: None,
                    flip_face_flux: false,
                    patch: None,
                    zone: None,
                    zone_flip: false,
                });
                added_faces += 1;
            }
        }

        let affected: BTreeSet<usize> = centres
            .keys()
            .flat_map(|&cell| mesh.cell_faces(cell).iter().copied())
            .collect();

        for &face in &affected {
            let info = FaceInfo::of(mesh, face);
            let pyramid_of = |cell: usize| {
                pyramids.get(&cell).map_or(cell, |cells| {
                    let local = mesh.cell_faces(cell).iter().position(|&f| f == face);
                    local.map_or(cell, |i| cells[i])
                })
            };

            let owner = pyramid_of(info.owner);
            let neighbour = info.neighbour.map(pyramid_of);

            let command = match neighbour {
                Some(n) if n < owner => ModifyFace {
                    face: mesh.face(face).reversed(),
                    face_id: face,
                    owner: n,
                    neighbour: Some(owner),
                    flip_face_flux: true,
                    patch: info.patch,
                    remove_from_zone: false,
                    zone: info.zone,
                    zone_flip: info.zone.is_some() && !info.zone_flip,
                },
                _ => ModifyFace {
                    face: mesh.face(face).clone(),
                    face_id: face,
                    owner,
                    neighbour,
                    flip_face_flux: false,
                    patch: info.patch,
                    remove_from_zone: false,
                    zone: info.zone,
                    zone_flip: info.zone_flip,
                },
            };
            engine.modify_face(command);
        }

        debug!(
            cells = self.cell_added_point.len(),
            added_faces,
            modified_faces = affected.len(),
            "Queued pyramid decomposition"
        );
        Ok(())
    }

    fn update_mesh(&mut self, map: &MeshMap) {
        self.cell_added_point = translate_table(&self.cell_added_point, &map.cells, &map.points);
    }

    fn added_points(&self) -> &BTreeMap<usize, usize> {
        &self.cell_added_point
    }
}

/// An edge of a cell and the two cell faces using it, as positions in the
/// cell's face list.
#[derive(Debug, Clone, Copy)]
struct CellEdge {
    points: (usize, usize),
    first: usize,
    second: usize,
}

impl CellEdge {
    /// The edge's points in the order the first face walks them when
    /// oriented out of `cell`.
    fn outward<M: PolyTopology + ?Sized>(&self, mesh: &M, cell: usize) -> (usize, usize) {
        let face = mesh.cell_faces(cell)[self.first];
        let (a, b) = self.points;
        let forward = mesh.face(face).has_directed_edge(a, b);
        if forward == (mesh.face_owner(face) == cell) {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// Edges of a cell in first-encountered order.
fn cell_edges<M: PolyTopology + ?Sized>(mesh: &M, cell: usize) -> SplitResult<Vec<CellEdge>> {
    let mut order = Vec::new();
    let mut users: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

    for (local, &face) in mesh.cell_faces(cell).iter().enumerate() {
        for (a, b) in mesh.face(face).edges() {
            let key = (a.min(b), a.max(b));
            let faces = users.entry(key).or_insert_with(|| {
                order.push(key);
                Vec::with_capacity(2)
            });
            faces.push(local);
        }
    }

    order
        .into_iter()
        .map(|edge| match users[&edge].as_slice() {
            &[first, second] => Ok(CellEdge {
                points: edge,
                first,
                second,
            }),
            faces => Err(SplitError::OpenCell {
                cell,
                edge,
                count: faces.len(),
            }),
        })
        .collect()
}
