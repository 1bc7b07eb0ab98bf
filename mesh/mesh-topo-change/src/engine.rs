//! In-memory topology-change engine for [`PolyMesh`].

use hashbrown::HashSet;
use mesh_poly::{
    CellZone, Face, FaceZone, Patch, Point3, PolyGeometry, PolyMesh, PolyMeshData, PolyTopology,
    ZoneMembership,
};
use tracing::debug;

use crate::{
    AddCell, AddFace, AddPoint, IndexMapping, MeshMap, ModifyFace, TopoChange, TopoCommand,
    TopoError, TopoResult,
};

/// Applies topology-change commands to a [`PolyMesh`].
///
/// Added points, faces and cells receive provisional indices directly after
/// the existing ones. On commit the engine rebuilds the face list in
/// canonical order: internal faces sorted by owner then neighbour, followed by
/// boundary faces grouped by patch. Points and cells keep their indices.
///
/// The engine never removes elements and never moves points, so the
/// returned map carries no pre-motion points.
///
/// # Example
///
/// ```
/// use mesh_poly::{PolyTopology, prism_column};
/// use mesh_topo_change::{PolyTopoChange, TopoChange};
///
/// let mut mesh = prism_column(4, 1);
/// let engine = PolyTopoChange::new(&mesh);
/// let map = engine.commit(&mut mesh).unwrap();
/// assert!(map.faces.is_identity_on_existing());
/// assert_eq!(mesh.n_faces(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct PolyTopoChange {
    n_points: usize,
    n_faces: usize,
    n_internal_faces: usize,
    n_cells: usize,
    patch_sizes: Vec<usize>,
    n_face_zones: usize,
    n_cell_zones: usize,
    added_points: usize,
    added_faces: usize,
    added_cells: usize,
    commands: Vec<TopoCommand>,
}

impl PolyTopoChange {
    /// Create an engine for `mesh`.
    #[must_use]
    pub fn new(mesh: &PolyMesh) -> Self {
        Self {
            n_points: mesh.n_points(),
            n_faces: mesh.n_faces(),
            n_internal_faces: mesh.n_internal_faces(),
            n_cells: mesh.n_cells(),
            patch_sizes: mesh.patches().iter().map(|p| p.size).collect(),
            n_face_zones: mesh.face_zones().len(),
            n_cell_zones: mesh.cell_zones().len(),
            added_points: 0,
            added_faces: 0,
            added_cells: 0,
            commands: Vec::new(),
        }
    }

    /// Commands queued so far, in issue order.
    #[inline]
    #[must_use]
    pub fn commands(&self) -> &[TopoCommand] {
        &self.commands
    }

    /// Check if no command has been queued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    const fn limits(&self) -> Limits {
        Limits {
            points: self.n_points + self.added_points,
            cells: self.n_cells + self.added_cells,
            patches: self.patch_sizes.len(),
            face_zones: self.n_face_zones,
            cell_zones: self.n_cell_zones,
        }
    }

    fn check_mesh(&self, mesh: &PolyMesh) -> TopoResult<()> {
        let mismatch = |what: String, expected: usize, found: usize| {
            if expected == found {
                Ok(())
            } else {
                Err(TopoError::MeshMismatch {
                    what,
                    expected,
                    found,
                })
            }
        };

        mismatch("points".into(), self.n_points, mesh.n_points())?;
        mismatch("faces".into(), self.n_faces, mesh.n_faces())?;
        mismatch("internal faces".into(), self.n_internal_faces, mesh.n_internal_faces())?;
        mismatch("cells".into(), self.n_cells, mesh.n_cells())?;
        mismatch("patches".into(), self.patch_sizes.len(), mesh.patches().len())?;
        for (expected, patch) in self.patch_sizes.iter().zip(mesh.patches()) {
            mismatch(format!("faces in patch {}", patch.name), *expected, patch.size)?;
        }
        Ok(())
    }
}

impl TopoChange for PolyTopoChange {
    type Mesh = PolyMesh;
    type Error = TopoError;

    fn add_point(&mut self, command: AddPoint) -> usize {
        let index = self.n_points + self.added_points;
        self.added_points += 1;
        self.commands.push(TopoCommand::AddPoint(command));
        index
    }

    fn add_face(&mut self, command: AddFace) -> usize {
        let index = self.n_faces + self.added_faces;
        self.added_faces += 1;
        self.commands.push(TopoCommand::AddFace(command));
        index
    }

    fn modify_face(&mut self, command: ModifyFace) {
        self.commands.push(TopoCommand::ModifyFace(command));
    }

    fn add_cell(&mut self, command: AddCell) -> usize {
        let index = self.n_cells + self.added_cells;
        self.added_cells += 1;
        self.commands.push(TopoCommand::AddCell(command));
        index
    }

    fn commit(self, mesh: &mut PolyMesh) -> TopoResult<MeshMap> {
        self.check_mesh(mesh)?;

        if self.commands.is_empty() {
            debug!("No topology changes queued");
            return Ok(MeshMap::identity(self.n_points, self.n_faces, self.n_cells));
        }

        let limits = self.limits();
        let n_commands = self.commands.len();

        let mut points = mesh.points().to_vec();
        let mut records: Vec<FaceRecord> =
            (0..self.n_faces).map(|f| FaceRecord::of(mesh, f)).collect();
        let mut cell_zone_of: Vec<Option<usize>> =
            (0..self.n_cells).map(|c| mesh.which_cell_zone(c)).collect();
        let mut modified = HashSet::new();

        for (command, cmd) in self.commands.into_iter().enumerate() {
            match cmd {
                TopoCommand::AddPoint(c) => points.push(c.point),
                TopoCommand::AddFace(c) => {
                    let record = FaceRecord::from(c);
                    limits.check_face(command, &record)?;
                    records.push(record);
                }
                TopoCommand::ModifyFace(c) => {
                    if c.face_id >= self.n_faces {
                        return Err(TopoError::ModifyOutOfRange {
                            face: c.face_id,
                            face_count: self.n_faces,
                        });
                    }
                    if !modified.insert(c.face_id) {
                        return Err(TopoError::FaceModifiedTwice { face: c.face_id });
                    }
                    let face_id = c.face_id;
                    let record = FaceRecord::from(c);
                    limits.check_face(command, &record)?;
                    records[face_id] = record;
                }
                TopoCommand::AddCell(c) => {
                    if let Some(zone) = c.zone {
                        limits.check_zone(command, "cell", zone)?;
                    }
                    cell_zone_of.push(c.zone);
                }
            }
        }

        check_cells_used(&records, limits.cells)?;

        let order = canonical_order(&records);
        let mut reverse_faces = vec![None; records.len()];
        for (new, &old) in order.iter().enumerate() {
            reverse_faces[old] = Some(new);
        }

        let data = rebuild(mesh, points, records, &order, &cell_zone_of);
        let rebuilt = PolyMesh::from_data(data)?;

        debug!(
            commands = n_commands,
            points = rebuilt.n_points(),
            faces = rebuilt.n_faces(),
            internal_faces = rebuilt.n_internal_faces(),
            cells = rebuilt.n_cells(),
            "Committed topology changes"
        );

        let n_new_points = rebuilt.n_points();
        let n_new_faces = rebuilt.n_faces();
        let n_new_cells = rebuilt.n_cells();
        *mesh = rebuilt;

        Ok(MeshMap {
            points: IndexMapping::from_reverse(
                (0..n_new_points).map(Some).collect(),
                self.n_points,
                n_new_points,
            ),
            faces: IndexMapping::from_reverse(reverse_faces, self.n_faces, n_new_faces),
            cells: IndexMapping::from_reverse(
                (0..n_new_cells).map(Some).collect(),
                self.n_cells,
                n_new_cells,
            ),
            pre_motion_points: None,
        })
    }
}

/// Everything the engine tracks about one face until commit.
#[derive(Debug, Clone)]
struct FaceRecord {
    face: Face,
    owner: usize,
    neighbour: Option<usize>,
    patch: Option<usize>,
    zone: Option<ZoneMembership>,
}

impl FaceRecord {
    fn of(mesh: &PolyMesh, face: usize) -> Self {
        Self {
            face: mesh.face(face).clone(),
            owner: mesh.face_owner(face),
            neighbour: mesh.face_neighbour(face),
            patch: mesh.which_patch(face),
            zone: mesh.which_face_zone(face),
        }
    }
}

impl From<AddFace> for FaceRecord {
    fn from(c: AddFace) -> Self {
        Self {
            face: c.face,
            owner: c.owner,
            neighbour: c.neighbour,
            patch: c.patch,
            zone: c.zone.map(|zone| ZoneMembership {
                zone,
                flip: c.zone_flip,
            }),
        }
    }
}

impl From<ModifyFace> for FaceRecord {
    fn from(c: ModifyFace) -> Self {
        let zone = if c.remove_from_zone { None } else { c.zone };
        Self {
            face: c.face,
            owner: c.owner,
            neighbour: c.neighbour,
            patch: c.patch,
            zone: zone.map(|zone| ZoneMembership {
                zone,
                flip: c.zone_flip,
            }),
        }
    }
}

/// Index ranges valid at commit time, provisional indices included.
#[derive(Debug, Clone, Copy)]
struct Limits {
    points: usize,
    cells: usize,
    patches: usize,
    face_zones: usize,
    cell_zones: usize,
}

impl Limits {
    fn check_face(&self, command: usize, record: &FaceRecord) -> TopoResult<()> {
        if let Some(&point) = record.face.points().iter().find(|&&p| p >= self.points) {
            return Err(TopoError::PointOutOfRange {
                command,
                point,
                point_count: self.points,
            });
        }

        for cell in std::iter::once(record.owner).chain(record.neighbour) {
            if cell >= self.cells {
                return Err(TopoError::CellOutOfRange {
                    command,
                    cell,
                    cell_count: self.cells,
                });
            }
        }

        match (record.neighbour, record.patch) {
            (Some(neighbour), _) if record.owner >= neighbour => {
                return Err(TopoError::OwnerNotLower {
                    command,
                    owner: record.owner,
                    neighbour,
                });
            }
            (Some(_), Some(patch)) => {
                return Err(TopoError::PatchOnInternal { command, patch });
            }
            (None, None) => return Err(TopoError::MissingPatch { command }),
            (None, Some(patch)) if patch >= self.patches => {
                return Err(TopoError::MissingPatch { command });
            }
            _ => {}
        }

        if let Some(membership) = record.zone {
            self.check_zone(command, "face", membership.zone)?;
        }
        Ok(())
    }

    fn check_zone(&self, command: usize, kind: &'static str, zone: usize) -> TopoResult<()> {
        let zone_count = if kind == "cell" {
            self.cell_zones
        } else {
            self.face_zones
        };
        if zone >= zone_count {
            return Err(TopoError::ZoneOutOfRange {
                command,
                kind,
                zone,
                zone_count,
            });
        }
        Ok(())
    }
}

fn check_cells_used(records: &[FaceRecord], n_cells: usize) -> TopoResult<()> {
    let mut used = vec![false; n_cells];
    for record in records {
        used[record.owner] = true;
        if let Some(neighbour) = record.neighbour {
            used[neighbour] = true;
        }
    }
    match used.iter().position(|&u| !u) {
        Some(cell) => Err(TopoError::EmptyCell { cell }),
        None => Ok(()),
    }
}

/// Old face indices in their new order.
fn canonical_order(records: &[FaceRecord]) -> Vec<usize> {
    let (mut internal, mut boundary): (Vec<usize>, Vec<usize>) =
        (0..records.len()).partition(|&f| records[f].neighbour.is_some());
    internal.sort_by_key(|&f| (records[f].owner, records[f].neighbour, f));
    boundary.sort_by_key(|&f| (records[f].patch, f));
    internal.into_iter().chain(boundary).collect()
}

fn rebuild(
    mesh: &PolyMesh,
    points: Vec<Point3<f64>>,
    mut records: Vec<FaceRecord>,
    order: &[usize],
    cell_zone_of: &[Option<usize>],
) -> PolyMeshData {
    let mut faces = Vec::with_capacity(order.len());
    let mut owner = Vec::with_capacity(order.len());
    let mut neighbour = Vec::new();
    let mut patch_sizes = vec![0; mesh.patches().len()];
    let mut zone_members: Vec<(Vec<usize>, Vec<bool>)> =
        vec![(Vec::new(), Vec::new()); mesh.face_zones().len()];

    for (new, &old) in order.iter().enumerate() {
        let record = &mut records[old];
        faces.push(std::mem::take(&mut record.face));
        owner.push(record.owner);
        if let Some(n) = record.neighbour {
            neighbour.push(n);
        }
        if let Some(patch) = record.patch {
            patch_sizes[patch] += 1;
        }
        if let Some(membership) = record.zone {
            let (faces, flips) = &mut zone_members[membership.zone];
            faces.push(new);
            flips.push(membership.flip);
        }
    }

    let mut start = neighbour.len();
    let patches = mesh
        .patches()
        .iter()
        .zip(patch_sizes)
        .map(|(p, size)| {
            let patch = Patch::new(p.name.clone(), start, size);
            start += size;
            patch
        })
        .collect();

    let face_zones = mesh
        .face_zones()
        .iter()
        .zip(zone_members)
        .map(|(z, (faces, flips))| FaceZone::new(z.name.clone(), faces, flips))
        .collect();

    let mut cell_members = vec![Vec::new(); mesh.cell_zones().len()];
    for (cell, zone) in cell_zone_of.iter().enumerate() {
        if let Some(zone) = *zone {
            cell_members[zone].push(cell);
        }
    }
    let cell_zones = mesh
        .cell_zones()
        .iter()
        .zip(cell_members)
        .map(|(z, cells)| CellZone::new(z.name.clone(), cells))
        .collect();

    PolyMeshData {
        points,
        faces,
        owner,
        neighbour,
        patches,
        face_zones,
        cell_zones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_poly::{prism_column, tetrahedron};

    fn boundary_modify(face: &PolyMesh, face_id: usize, owner: usize) -> ModifyFace {
        ModifyFace {
            face: face.face(face_id).clone(),
            face_id,
            owner,
            neighbour: None,
            flip_face_flux: false,
            patch: Some(0),
            remove_from_zone: false,
            zone: None,
            zone_flip: false,
        }
    }

    fn internal(face: [usize; 3], owner: usize, neighbour: usize) -> AddFace {
        AddFace {
            face: Face::from(face),
            owner,
            neighbour: Some(neighbour),
            master_point: Some(face[0]),
            master_edge: None,
            master_face: None,
            flip_face_flux: false,
            patch: None,
            zone: None,
            zone_flip: false,
        }
    }

    /// Split the unit tetrahedron into four tetrahedra around its centroid.
    fn split_tet() -> (PolyMesh, PolyTopoChange) {
        let mesh = tetrahedron();
        let mut engine = PolyTopoChange::new(&mesh);
        let c = engine.add_point(AddPoint {
            point: mesh.cell_centre(0),
            master_point: Some(0),
            zone: None,
            in_cell: true,
        });
        for _ in 1..4 {
            engine.add_cell(AddCell {
                master_cell: Some(0),
                ..AddCell::default()
            });
        }
        for (face, owner, neighbour) in [
            ([2, 0, c], 0, 2),
            ([1, 2, c], 0, 3),
            ([0, 1, c], 0, 1),
            ([3, 1, c], 1, 3),
            ([0, 3, c], 1, 2),
            ([2, 3, c], 2, 3),
        ] {
            engine.add_face(internal(face, owner, neighbour));
        }
        for f in 0..4 {
            engine.modify_face(boundary_modify(&mesh, f, f));
        }
        (mesh, engine)
    }

    #[test]
    fn test_empty_commit_is_identity() {
        let mut mesh = prism_column(5, 2);
        let before = mesh.clone();
        let engine = PolyTopoChange::new(&mesh);
        assert!(engine.is_empty());
        let map = engine.commit(&mut mesh).unwrap();
        assert_eq!(mesh, before);
        assert!(map.points.is_identity_on_existing());
        assert!(map.faces.is_identity_on_existing());
        assert!(map.cells.is_identity_on_existing());
    }

    #[test]
    fn test_tet_split_into_four() {
        let (mut mesh, engine) = split_tet();
        assert_eq!(engine.commands().len(), 1 + 3 + 6 + 4);

        let map = engine.commit(&mut mesh).unwrap();
        assert_eq!(mesh.n_points(), 5);
        assert_eq!(mesh.n_cells(), 4);
        assert_eq!(mesh.n_internal_faces(), 6);
        assert_eq!(mesh.n_faces(), 10);
        assert_eq!(mesh.patches()[0].start, 6);
        assert_eq!(mesh.patches()[0].size, 4);

        // Upper-triangular internal order
        let pairs: Vec<_> = (0..6)
            .map(|f| (mesh.face_owner(f), mesh.face_neighbour(f).unwrap()))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);

        // Boundary faces moved behind the internal ones
        for f in 0..4 {
            assert_eq!(map.faces.new_index(f), Some(f + 6));
        }
        assert_eq!(map.points.new_index(4), Some(4));
        assert!(map.faces.is_added(0));

        assert_relative_eq!(mesh.total_volume(), 1.0 / 6.0, epsilon = 1e-12);
        for cell in 0..4 {
            assert_relative_eq!(mesh.cell_volume(cell), 1.0 / 24.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_modify_twice_rejected() {
        let mut mesh = tetrahedron();
        let before = mesh.clone();
        let mut engine = PolyTopoChange::new(&mesh);
        engine.modify_face(boundary_modify(&mesh, 1, 0));
        engine.modify_face(boundary_modify(&mesh, 1, 0));
        let err = engine.commit(&mut mesh).unwrap_err();
        assert_eq!(err, TopoError::FaceModifiedTwice { face: 1 });
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_owner_above_neighbour_rejected() {
        let mut mesh = tetrahedron();
        let mut engine = PolyTopoChange::new(&mesh);
        engine.add_cell(AddCell::default());
        engine.add_face(internal([0, 1, 2], 1, 0));
        let err = engine.commit(&mut mesh).unwrap_err();
        assert!(matches!(err, TopoError::OwnerNotLower { command: 1, .. }));
    }

    #[test]
    fn test_boundary_face_needs_patch() {
        let mut mesh = tetrahedron();
        let mut engine = PolyTopoChange::new(&mesh);
        let mut modify = boundary_modify(&mesh, 0, 0);
        modify.patch = None;
        engine.modify_face(modify);
        let err = engine.commit(&mut mesh).unwrap_err();
        assert_eq!(err, TopoError::MissingPatch { command: 0 });
    }

    #[test]
    fn test_unused_added_cell_rejected() {
        let mut mesh = tetrahedron();
        let mut engine = PolyTopoChange::new(&mesh);
        engine.add_cell(AddCell::default());
        let err = engine.commit(&mut mesh).unwrap_err();
        assert_eq!(err, TopoError::EmptyCell { cell: 1 });
    }

    #[test]
    fn test_face_zone_follows_modification() {
        let mut mesh = prism_column(4, 2)
            .with_face_zones(vec![FaceZone::unflipped("mid", vec![0])])
            .unwrap();
        let mut engine = PolyTopoChange::new(&mesh);
        engine.modify_face(ModifyFace {
            face: mesh.face(0).clone(),
            face_id: 0,
            owner: 0,
            neighbour: Some(1),
            flip_face_flux: false,
            patch: None,
            remove_from_zone: false,
            zone: Some(0),
            zone_flip: true,
        });
        engine.commit(&mut mesh).unwrap();
        assert_eq!(
            mesh.which_face_zone(0),
            Some(ZoneMembership { zone: 0, flip: true })
        );

        let mut engine = PolyTopoChange::new(&mesh);
        engine.modify_face(ModifyFace {
            face: mesh.face(0).clone(),
            face_id: 0,
            owner: 0,
            neighbour: Some(1),
            flip_face_flux: false,
            patch: None,
            remove_from_zone: true,
            zone: Some(0),
            zone_flip: false,
        });
        engine.commit(&mut mesh).unwrap();
        assert_eq!(mesh.which_face_zone(0), None);
        assert!(mesh.face_zones()[0].is_empty());
    }

    #[test]
    fn test_added_cell_joins_zone() {
        let mut mesh = tetrahedron()
            .with_cell_zones(vec![CellZone::new("core", vec![0])])
            .unwrap();
        let (_, mut engine) = split_tet();
        // Rebuild the engine against the zoned mesh with the same commands
        engine.n_cell_zones = 1;
        for cmd in &mut engine.commands {
            if let TopoCommand::AddCell(c) = cmd {
                c.zone = Some(0);
            }
        }
        engine.commit(&mut mesh).unwrap();
        assert_eq!(mesh.cell_zones()[0].cells, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_mesh_mismatch() {
        let mesh = tetrahedron();
        let engine = PolyTopoChange::new(&mesh);
        let mut other = prism_column(4, 1);
        let err = engine.commit(&mut other).unwrap_err();
        assert!(matches!(err, TopoError::MeshMismatch { .. }));
    }

    #[test]
    fn test_same_counts_different_patches() {
        let mesh = prism_column(4, 2);
        let engine = PolyTopoChange::new(&mesh);

        // Same elements, but the top cap is moved into the bottom patch
        let mut data = mesh.data().clone();
        data.patches[0].size = 2;
        data.patches[1].start += 1;
        data.patches[1].size = 0;
        let mut other = PolyMesh::from_data(data).unwrap();
        assert_eq!(other.n_faces(), mesh.n_faces());
        assert_eq!(other.n_internal_faces(), mesh.n_internal_faces());

        let err = engine.commit(&mut other).unwrap_err();
        assert_eq!(
            err,
            TopoError::MeshMismatch {
                what: "faces in patch bottom".into(),
                expected: 1,
                found: 2,
            }
        );
    }
}
