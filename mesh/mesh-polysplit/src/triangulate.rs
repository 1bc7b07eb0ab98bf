//! Face triangulation around an inserted centroid.

use std::collections::BTreeMap;

use mesh_poly::{Face, Point3, PolyTopology};
use mesh_topo_change::{AddFace, AddPoint, MeshMap, ModifyFace, TopoChange};
use tracing::debug;

use crate::FaceInfo;
use crate::renumber::translate_table;

/// Splits faces into triangle fans around a new point.
///
/// An `n`-sided face becomes `n` triangles `(v[i], v[i+1], c)`. The first
/// triangle takes over the original face index; the others are new faces.
/// Every triangle inherits the owner, neighbour, patch, zone and zone flip
/// of the face it replaces, so the triangles keep its orientation.
///
/// # Example
///
/// ```
/// use mesh_poly::{PolyTopology, prism_column};
/// use mesh_polysplit::{FaceTriangulator, face_centroids};
/// use mesh_topo_change::{PolyTopoChange, TopoChange};
///
/// let mut mesh = prism_column(5, 1);
/// let centroids = face_centroids(&mesh, &[0]);
///
/// let mut engine = PolyTopoChange::new(&mesh);
/// let mut triangulator = FaceTriangulator::new();
/// triangulator.set_refinement(&mesh, &centroids, &mut engine);
///
/// let map = engine.commit(&mut mesh).unwrap();
/// triangulator.update_mesh(&map);
///
/// assert_eq!(mesh.n_faces(), 7 + 4);
/// assert_eq!(triangulator.added_points().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FaceTriangulator {
    face_added_point: BTreeMap<usize, usize>,
}

impl FaceTriangulator {
    /// Create a triangulator with an empty face-to-point table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the commands that triangulate every face in `centroids` around
    /// its point.
    ///
    /// All centre points are added first, then each face is replaced in
    /// ascending face order. Faces not in `centroids` are left alone.
    pub fn set_refinement<M, T>(
        &mut self,
        mesh: &M,
        centroids: &BTreeMap<usize, Point3<f64>>,
        engine: &mut T,
    ) where
        M: PolyTopology + ?Sized,
        T: TopoChange,
    {
        self.face_added_point.clear();

        for (&face, &centre) in centroids {
            let point = engine.add_point(AddPoint {
                point: centre,
                master_point: mesh.face(face).points().first().copied(),
                zone: None,
                in_cell: true,
            });
            self.face_added_point.insert(face, point);
        }

        let mut added_faces = 0;
        for (&face, &centre) in &self.face_added_point {
            let f = mesh.face(face);
            let master_point = f.points().first().copied();
            let info = FaceInfo::of(mesh, face);

            for (i, (a, b)) in f.edges().enumerate() {
                let triangle = Face::triangle(a, b, centre);
                if i == 0 {
                    engine.modify_face(ModifyFace {
                        face: triangle,
                        face_id: face,
                        owner: info.owner,
                        neighbour: info.neighbour,
                        flip_face_flux: false,
                        patch: info.patch,
                        remove_from_zone: false,
                        zone: info.zone,
                        zone_flip: info.zone_flip,
                    });
                } else {
                    engine.add_face(AddFace {
                        face: triangle,
                        owner: info.owner,
                        neighbour: info.neighbour,
                        master_point,
                        master_edge: None,
                        master_face: None,
                        flip_face_flux: false,
                        patch: info.patch,
                        zone: info.zone,
                        zone_flip: info.zone_flip,
                    });
                    added_faces += 1;
                }
            }
        }

        debug!(
            faces = self.face_added_point.len(),
            added_faces, "Queued face triangulation"
        );
    }

    /// Renumber the face-to-point table after the engine committed.
    pub fn update_mesh(&mut self, map: &MeshMap) {
        self.face_added_point = translate_table(&self.face_added_point, &map.faces, &map.points);
    }

    /// Face index to centre point index, for every triangulated face.
    #[inline]
    #[must_use]
    pub const fn added_points(&self) -> &BTreeMap<usize, usize> {
        &self.face_added_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_poly::prism_column;
    use mesh_topo_change::{PolyTopoChange, TopoCommand};

    use crate::face_centroids;

    #[test]
    fn test_command_sequence() {
        // Pentagonal prism: faces 0 (bottom) and 1 (top) are pentagons
        let mesh = prism_column(5, 1);
        let centroids = face_centroids(&mesh, &[0, 1]);
        let mut engine = PolyTopoChange::new(&mesh);
        let mut triangulator = FaceTriangulator::new();
        triangulator.set_refinement(&mesh, &centroids, &mut engine);

        let kinds: Vec<_> = engine.commands().iter().map(TopoCommand::kind).collect();
        let mut expected = vec!["add-point", "add-point"];
        for _ in 0..2 {
            expected.push("modify-face");
            expected.extend(["add-face"; 4]);
        }
        assert_eq!(kinds, expected);

        assert_eq!(
            triangulator.added_points(),
            &BTreeMap::from([(0, 10), (1, 11)])
        );
    }

    #[test]
    fn test_first_triangle_replaces_face() {
        let mesh = prism_column(5, 1);
        let bottom = mesh.face(0).clone();
        let centroids = face_centroids(&mesh, &[0]);
        let mut engine = PolyTopoChange::new(&mesh);
        FaceTriangulator::new().set_refinement(&mesh, &centroids, &mut engine);

        let TopoCommand::ModifyFace(modify) = &engine.commands()[1] else {
            panic!("expected modify-face, got {:?}", engine.commands()[1]);
        };
        assert_eq!(modify.face_id, 0);
        assert_eq!(modify.face.points(), &[bottom.points()[0], bottom.points()[1], 10]);
        assert_eq!(modify.patch, Some(0));
        assert_eq!(modify.neighbour, None);

        for cmd in &engine.commands()[2..] {
            let TopoCommand::AddFace(add) = cmd else {
                panic!("expected add-face, got {cmd:?}");
            };
            assert_eq!(add.master_point, Some(bottom.points()[0]));
            assert_eq!(add.patch, Some(0));
            assert_eq!(add.face.points()[2], 10);
            assert!(!add.flip_face_flux);
        }
    }

    #[test]
    fn test_one_triangle_keeps_face_identity() {
        let mut mesh = prism_column(5, 1);
        let pentagons = [0, 1];
        let centroids = face_centroids(&mesh, &pentagons);
        let mut engine = PolyTopoChange::new(&mesh);
        let mut triangulator = FaceTriangulator::new();
        triangulator.set_refinement(&mesh, &centroids, &mut engine);

        let map = engine.commit(&mut mesh).unwrap();
        triangulator.update_mesh(&map);
        assert_eq!(mesh.n_faces(), 7 + 2 * 4);

        for original in pentagons {
            let face = map.faces.new_index(original).unwrap();
            let centre = triangulator.added_points()[&face];

            let fan: Vec<_> = (0..mesh.n_faces())
                .filter(|&f| mesh.face(f).points().contains(&centre))
                .collect();
            assert_eq!(fan.len(), 5);
            assert!(fan.contains(&face));
            assert!(fan.iter().all(|&f| mesh.face(f).len() == 3));

            let kept: Vec<_> = fan.iter().copied().filter(|&f| !map.faces.is_added(f)).collect();
            assert_eq!(kept, vec![face]);
            assert_eq!(map.faces.old_index(face), Some(original));
        }
    }

    #[test]
    fn test_empty_refinement_queues_nothing() {
        let mesh = prism_column(4, 1);
        let mut engine = PolyTopoChange::new(&mesh);
        let mut triangulator = FaceTriangulator::new();
        triangulator.set_refinement(&mesh, &BTreeMap::new(), &mut engine);
        assert!(engine.is_empty());
        assert!(triangulator.added_points().is_empty());
    }
}
