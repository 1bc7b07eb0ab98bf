//! Owner/neighbour addressed polyhedral mesh.

use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    CellZone, Face, FaceZone, MeshError, MeshResult, MovePoints, Patch, PolyGeometry, PolyTopology,
    ZoneMembership,
};

/// Smallest pyramid volume contribution, keeps flat cells from dividing by zero.
const VSMALL: f64 = 1.0e-300;

/// Raw mesh data, as stored on disk.
///
/// This is the unchecked form of a [`PolyMesh`]; converting it with
/// [`PolyMesh::from_data`] validates the addressing.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyMeshData {
    /// Point coordinates.
    pub points: Vec<Point3<f64>>,
    /// Faces, internal faces first.
    pub faces: Vec<Face>,
    /// Owner cell of every face.
    pub owner: Vec<usize>,
    /// Neighbour cell of every internal face.
    pub neighbour: Vec<usize>,
    /// Boundary patches in face order.
    pub patches: Vec<Patch>,
    /// Face zones.
    #[cfg_attr(feature = "serde", serde(default))]
    pub face_zones: Vec<FaceZone>,
    /// Cell zones.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cell_zones: Vec<CellZone>,
}

/// A validated polyhedral mesh with owner/neighbour face addressing.
///
/// Cells are implicit: a cell is the set of faces that name it as owner or
/// neighbour. Internal faces come first and satisfy `owner < neighbour`;
/// boundary faces follow, grouped into contiguous patches.
///
/// Face centres, cell centres and cell volumes are computed on construction
/// and refreshed by [`MovePoints::move_points`].
///
/// # Example
///
/// ```
/// use mesh_poly::{PolyGeometry, PolyTopology, prism_column};
///
/// // A single hexahedron
/// let mesh = prism_column(4, 1);
/// assert_eq!(mesh.n_cells(), 1);
/// assert_eq!(mesh.n_faces(), 6);
/// assert_eq!(mesh.n_internal_faces(), 0);
/// assert!(mesh.cell_volume(0) > 0.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "PolyMeshData", into = "PolyMeshData")
)]
pub struct PolyMesh {
    data: PolyMeshData,
    n_cells: usize,
    cells: Vec<Vec<usize>>,
    face_zone_of: Vec<Option<ZoneMembership>>,
    cell_zone_of: Vec<Option<usize>>,
    face_centres: Vec<Point3<f64>>,
    face_areas: Vec<Vector3<f64>>,
    cell_centres: Vec<Point3<f64>>,
    cell_volumes: Vec<f64>,
}

impl PolyMesh {
    /// Build a mesh without zones.
    ///
    /// # Errors
    ///
    /// Returns an error if the addressing is inconsistent; see [`MeshError`].
    pub fn new(
        points: Vec<Point3<f64>>,
        faces: Vec<Face>,
        owner: Vec<usize>,
        neighbour: Vec<usize>,
        patches: Vec<Patch>,
    ) -> MeshResult<Self> {
        Self::from_data(PolyMeshData {
            points,
            faces,
            owner,
            neighbour,
            patches,
            face_zones: Vec::new(),
            cell_zones: Vec::new(),
        })
    }

    /// Validate raw mesh data and compute its geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the addressing is inconsistent; see [`MeshError`].
    pub fn from_data(data: PolyMeshData) -> MeshResult<Self> {
        let n_faces = data.faces.len();
        if n_faces == 0 {
            return Err(MeshError::NoFaces);
        }
        if data.owner.len() != n_faces {
            return Err(MeshError::OwnerCount {
                owners: data.owner.len(),
                faces: n_faces,
            });
        }
        if data.neighbour.len() > n_faces {
            return Err(MeshError::NeighbourCount {
                neighbours: data.neighbour.len(),
                faces: n_faces,
            });
        }

        check_faces(&data.faces, data.points.len())?;

        for (face, (&owner, &neighbour)) in data.owner.iter().zip(&data.neighbour).enumerate() {
            if owner >= neighbour {
                return Err(MeshError::OwnerNotLower {
                    face,
                    owner,
                    neighbour,
                });
            }
        }

        check_patches(&data.patches, data.neighbour.len(), n_faces)?;

        let n_cells = data
            .owner
            .iter()
            .chain(&data.neighbour)
            .max()
            .map_or(0, |&c| c + 1);

        let mut cells = vec![Vec::new(); n_cells];
        for (face, &owner) in data.owner.iter().enumerate() {
            cells[owner].push(face);
        }
        for (face, &neighbour) in data.neighbour.iter().enumerate() {
            cells[neighbour].push(face);
        }
        for cell_faces in &mut cells {
            cell_faces.sort_unstable();
        }
        if let Some((cell, faces)) = cells.iter().enumerate().find(|(_, f)| f.len() < 4) {
            return Err(MeshError::OpenCell {
                cell,
                count: faces.len(),
            });
        }

        let face_zone_of = face_zone_lookup(&data.face_zones, n_faces)?;
        let cell_zone_of = cell_zone_lookup(&data.cell_zones, n_cells)?;

        let mut mesh = Self {
            data,
            n_cells,
            cells,
            face_zone_of,
            cell_zone_of,
            face_centres: Vec::new(),
            face_areas: Vec::new(),
            cell_centres: Vec::new(),
            cell_volumes: Vec::new(),
        };
        mesh.update_geometry();
        Ok(mesh)
    }

    /// Attach face zones, replacing any existing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a zone is out of bounds or overlaps another.
    pub fn with_face_zones(self, face_zones: Vec<FaceZone>) -> MeshResult<Self> {
        let mut data = self.data;
        data.face_zones = face_zones;
        Self::from_data(data)
    }

    /// Attach cell zones, replacing any existing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a zone is out of bounds or overlaps another.
    pub fn with_cell_zones(self, cell_zones: Vec<CellZone>) -> MeshResult<Self> {
        let mut data = self.data;
        data.cell_zones = cell_zones;
        Self::from_data(data)
    }

    /// Borrow the raw mesh data.
    #[inline]
    #[must_use]
    pub const fn data(&self) -> &PolyMeshData {
        &self.data
    }

    /// Consume the mesh, returning its raw data.
    #[inline]
    #[must_use]
    pub fn into_data(self) -> PolyMeshData {
        self.data
    }

    /// All faces.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.data.faces
    }

    /// Owner cell of every face.
    #[inline]
    #[must_use]
    pub fn owner(&self) -> &[usize] {
        &self.data.owner
    }

    /// Neighbour cell of every internal face.
    #[inline]
    #[must_use]
    pub fn neighbour(&self) -> &[usize] {
        &self.data.neighbour
    }

    /// Boundary patches.
    #[inline]
    #[must_use]
    pub fn patches(&self) -> &[Patch] {
        &self.data.patches
    }

    /// Face zones.
    #[inline]
    #[must_use]
    pub fn face_zones(&self) -> &[FaceZone] {
        &self.data.face_zones
    }

    /// Cell zones.
    #[inline]
    #[must_use]
    pub fn cell_zones(&self) -> &[CellZone] {
        &self.data.cell_zones
    }

    /// Face lists of all cells, each sorted ascending.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    /// Area vector of a face (magnitude = area, direction = normal).
    #[inline]
    #[must_use]
    pub fn face_area_vector(&self, face: usize) -> Vector3<f64> {
        self.face_areas[face]
    }

    /// Index of the patch with the given name.
    #[must_use]
    pub fn find_patch(&self, name: &str) -> Option<usize> {
        self.data.patches.iter().position(|p| p.name == name)
    }

    /// Total volume of all cells.
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.cell_volumes.iter().sum()
    }

    /// Smallest signed volume of the pyramids joining each face to the
    /// centres of its owner and neighbour.
    ///
    /// Face orientation is taken as outward from the owner. A negative value
    /// means some face points into its owner or out of its neighbour. Returns
    /// infinity for a mesh without faces.
    #[must_use]
    pub fn min_face_pyramid_volume(&self) -> f64 {
        let pyramid = |face: usize, cell: usize| {
            self.face_areas[face].dot(&(self.face_centres[face] - self.cell_centres[cell])) / 3.0
        };
        let owned = self
            .data
            .owner
            .iter()
            .enumerate()
            .map(|(face, &owner)| pyramid(face, owner));
        let neighboured = self
            .data
            .neighbour
            .iter()
            .enumerate()
            .map(|(face, &neighbour)| -pyramid(face, neighbour));
        owned.chain(neighboured).fold(f64::INFINITY, f64::min)
    }

    fn update_geometry(&mut self) {
        let points = &self.data.points;
        let (face_centres, face_areas): (Vec<_>, Vec<_>) = self
            .data
            .faces
            .iter()
            .map(|f| f.centre_and_area(points))
            .unzip();

        // Estimated centres: average of face centres
        let cell_estimates: Vec<Point3<f64>> = self
            .cells
            .iter()
            .map(|faces| {
                let sum = faces
                    .iter()
                    .fold(Vector3::zeros(), |acc, &f| acc + face_centres[f].coords);
                #[allow(clippy::cast_precision_loss)]
                let n = faces.len().max(1) as f64;
                Point3::from(sum / n)
            })
            .collect();

        let mut weighted = vec![Vector3::zeros(); self.n_cells];
        let mut volumes = vec![0.0; self.n_cells];

        let mut accumulate = |cell: usize, face: usize, outward: f64| {
            let estimate = cell_estimates[cell];
            let fc = face_centres[face];
            let pyr3_vol = (outward * face_areas[face].dot(&(fc - estimate))).max(VSMALL);
            let pc = 0.75 * fc.coords + 0.25 * estimate.coords;
            weighted[cell] += pyr3_vol * pc;
            volumes[cell] += pyr3_vol;
        };

        for (face, &owner) in self.data.owner.iter().enumerate() {
            accumulate(owner, face, 1.0);
        }
        for (face, &neighbour) in self.data.neighbour.iter().enumerate() {
            accumulate(neighbour, face, -1.0);
        }

        self.cell_centres = weighted
            .iter()
            .zip(&volumes)
            .zip(&cell_estimates)
            .map(|((w, &v), est)| if v > VSMALL { Point3::from(w / v) } else { *est })
            .collect();
        self.cell_volumes = volumes.into_iter().map(|v| v / 3.0).collect();
        self.face_centres = face_centres;
        self.face_areas = face_areas;
    }
}

impl TryFrom<PolyMeshData> for PolyMesh {
    type Error = MeshError;

    fn try_from(data: PolyMeshData) -> MeshResult<Self> {
        Self::from_data(data)
    }
}

impl From<PolyMesh> for PolyMeshData {
    fn from(mesh: PolyMesh) -> Self {
        mesh.data
    }
}

impl PartialEq for PolyMesh {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl PolyTopology for PolyMesh {
    #[inline]
    fn n_points(&self) -> usize {
        self.data.points.len()
    }

    #[inline]
    fn n_faces(&self) -> usize {
        self.data.faces.len()
    }

    #[inline]
    fn n_internal_faces(&self) -> usize {
        self.data.neighbour.len()
    }

    #[inline]
    fn n_cells(&self) -> usize {
        self.n_cells
    }

    #[inline]
    fn face(&self, face: usize) -> &Face {
        &self.data.faces[face]
    }

    #[inline]
    fn face_owner(&self, face: usize) -> usize {
        self.data.owner[face]
    }

    #[inline]
    fn face_neighbour(&self, face: usize) -> Option<usize> {
        self.data.neighbour.get(face).copied()
    }

    #[inline]
    fn cell_faces(&self, cell: usize) -> &[usize] {
        &self.cells[cell]
    }

    fn which_patch(&self, face: usize) -> Option<usize> {
        if self.is_internal_face(face) {
            return None;
        }
        self.data.patches.iter().position(|p| p.contains(face))
    }

    #[inline]
    fn which_face_zone(&self, face: usize) -> Option<ZoneMembership> {
        self.face_zone_of.get(face).copied().flatten()
    }

    #[inline]
    fn which_cell_zone(&self, cell: usize) -> Option<usize> {
        self.cell_zone_of.get(cell).copied().flatten()
    }
}

impl PolyGeometry for PolyMesh {
    #[inline]
    fn points(&self) -> &[Point3<f64>] {
        &self.data.points
    }

    #[inline]
    fn face_centre(&self, face: usize) -> Point3<f64> {
        self.face_centres[face]
    }

    #[inline]
    fn cell_centre(&self, cell: usize) -> Point3<f64> {
        self.cell_centres[cell]
    }

    #[inline]
    fn cell_volume(&self, cell: usize) -> f64 {
        self.cell_volumes[cell]
    }
}

impl MovePoints for PolyMesh {
    fn move_points(&mut self, points: Vec<Point3<f64>>) -> MeshResult<()> {
        if points.len() != self.data.points.len() {
            return Err(MeshError::PointCount {
                expected: self.data.points.len(),
                got: points.len(),
            });
        }
        self.data.points = points;
        self.update_geometry();
        Ok(())
    }
}

fn check_faces(faces: &[Face], point_count: usize) -> MeshResult<()> {
    let mut seen = HashSet::new();
    for (face, f) in faces.iter().enumerate() {
        if f.len() < 3 {
            return Err(MeshError::DegenerateFace {
                face,
                count: f.len(),
            });
        }
        seen.clear();
        for &point in f.points() {
            if point >= point_count {
                return Err(MeshError::PointOutOfBounds {
                    face,
                    point,
                    point_count,
                });
            }
            if !seen.insert(point) {
                return Err(MeshError::RepeatedPoint { face, point });
            }
        }
    }
    Ok(())
}

fn check_patches(patches: &[Patch], n_internal: usize, n_faces: usize) -> MeshResult<()> {
    let mut expected = n_internal;
    for patch in patches {
        if patch.start != expected {
            return Err(MeshError::PatchLayout {
                name: patch.name.clone(),
                start: patch.start,
                expected,
            });
        }
        expected = patch.end();
    }
    if expected != n_faces {
        return Err(MeshError::UncoveredBoundary {
            covered: expected,
            faces: n_faces,
        });
    }
    Ok(())
}

fn face_zone_lookup(zones: &[FaceZone], n_faces: usize) -> MeshResult<Vec<Option<ZoneMembership>>> {
    let mut lookup: Vec<Option<ZoneMembership>> = vec![None; n_faces];
    for (zone, fz) in zones.iter().enumerate() {
        if fz.flip_map.len() != fz.faces.len() {
            return Err(MeshError::FlipMapLength {
                zone: fz.name.clone(),
                faces: fz.faces.len(),
                flips: fz.flip_map.len(),
            });
        }
        for (&face, &flip) in fz.faces.iter().zip(&fz.flip_map) {
            let slot = lookup.get_mut(face).ok_or_else(|| MeshError::ZoneOutOfBounds {
                zone: fz.name.clone(),
                kind: "face",
                index: face,
                count: n_faces,
            })?;
            if let Some(existing) = slot {
                return Err(MeshError::ZoneOverlap {
                    kind: "face",
                    index: face,
                    first: zones[existing.zone].name.clone(),
                    second: fz.name.clone(),
                });
            }
            *slot = Some(ZoneMembership { zone, flip });
        }
    }
    Ok(lookup)
}

fn cell_zone_lookup(zones: &[CellZone], n_cells: usize) -> MeshResult<Vec<Option<usize>>> {
    let mut lookup: Vec<Option<usize>> = vec![None; n_cells];
    for (zone, cz) in zones.iter().enumerate() {
        for &cell in &cz.cells {
            let slot = lookup.get_mut(cell).ok_or_else(|| MeshError::ZoneOutOfBounds {
                zone: cz.name.clone(),
                kind: "cell",
                index: cell,
                count: n_cells,
            })?;
            if let Some(existing) = *slot {
                return Err(MeshError::ZoneOverlap {
                    kind: "cell",
                    index: cell,
                    first: zones[existing].name.clone(),
                    second: cz.name.clone(),
                });
            }
            *slot = Some(zone);
        }
    }
    Ok(lookup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{prism_column, tetrahedron};
    use approx::assert_relative_eq;

    #[test]
    fn hex_geometry() {
        let mesh = prism_column(4, 1);
        assert_eq!(mesh.n_cells(), 1);
        assert_eq!(mesh.cell_faces(0).len(), 6);
        // Ring of radius 1 rotated 45 degrees: square of side sqrt(2), height 1
        assert_relative_eq!(mesh.cell_volume(0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(mesh.cell_centre(0), Point3::new(0.0, 0.0, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn tet_geometry() {
        let mesh = tetrahedron();
        assert_relative_eq!(mesh.cell_volume(0), 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(
            mesh.cell_centre(0),
            Point3::new(0.25, 0.25, 0.25),
            epsilon = 1e-12
        );
    }

    #[test]
    fn column_addressing() {
        let mesh = prism_column(5, 3);
        assert_eq!(mesh.n_cells(), 3);
        assert_eq!(mesh.n_internal_faces(), 2);
        assert_eq!(mesh.face_neighbour(0), Some(1));
        assert_eq!(mesh.face_neighbour(1), Some(2));
        assert_eq!(mesh.face_neighbour(2), None);
        assert_eq!(mesh.which_patch(0), None);
        assert_eq!(mesh.which_patch(2), Some(0));
        // Middle cell: two internal faces and five sides
        assert_eq!(mesh.cell_faces(1).len(), 7);
    }

    #[test]
    fn rejects_owner_above_neighbour() {
        let mut data = prism_column(4, 2).into_data();
        data.owner[0] = 1;
        data.neighbour[0] = 0;
        let err = PolyMesh::from_data(data).unwrap_err();
        assert!(matches!(err, MeshError::OwnerNotLower { face: 0, .. }));
    }

    #[test]
    fn rejects_gap_between_patches() {
        let mut data = prism_column(4, 1).into_data();
        data.patches[1].start += 1;
        let err = PolyMesh::from_data(data).unwrap_err();
        assert!(matches!(err, MeshError::PatchLayout { .. }));
    }

    #[test]
    fn rejects_repeated_point() {
        let mut data = prism_column(4, 1).into_data();
        data.faces[0] = Face::new(vec![0, 1, 1, 2]);
        let err = PolyMesh::from_data(data).unwrap_err();
        assert_eq!(err, MeshError::RepeatedPoint { face: 0, point: 1 });
    }

    #[test]
    fn rejects_overlapping_face_zones() {
        let mesh = prism_column(4, 1);
        let err = mesh
            .with_face_zones(vec![
                FaceZone::unflipped("a", vec![0, 1]),
                FaceZone::unflipped("b", vec![1]),
            ])
            .unwrap_err();
        assert!(matches!(err, MeshError::ZoneOverlap { index: 1, .. }));
    }

    #[test]
    fn zone_lookup() {
        let mesh = prism_column(4, 2)
            .with_face_zones(vec![FaceZone::new("mid", vec![0], vec![true])])
            .unwrap()
            .with_cell_zones(vec![CellZone::new("upper", vec![1])])
            .unwrap();
        assert_eq!(
            mesh.which_face_zone(0),
            Some(ZoneMembership { zone: 0, flip: true })
        );
        assert_eq!(mesh.which_face_zone(1), None);
        assert_eq!(mesh.which_cell_zone(1), Some(0));
        assert_eq!(mesh.which_cell_zone(0), None);
    }

    #[test]
    fn face_pyramids_detect_inverted_face() {
        let tet = tetrahedron();
        assert_relative_eq!(tet.min_face_pyramid_volume(), 1.0 / 24.0, epsilon = 1e-12);
        assert!(prism_column(5, 3).min_face_pyramid_volume() > 0.0);

        let mut data = tet.into_data();
        data.faces[0] = data.faces[0].reversed();
        let inverted = PolyMesh::from_data(data).unwrap();
        assert!(inverted.min_face_pyramid_volume() < 0.0);
    }

    #[test]
    fn move_points_updates_geometry() {
        let mut mesh = prism_column(4, 1);
        let scaled: Vec<_> = mesh.points().iter().map(|p| p * 2.0).collect();
        mesh.move_points(scaled).unwrap();
        assert_relative_eq!(mesh.cell_volume(0), 16.0, epsilon = 1e-10);

        let err = mesh.move_points(Vec::new()).unwrap_err();
        assert!(matches!(err, MeshError::PointCount { .. }));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_validates() {
        let mesh = prism_column(6, 2);
        let json = serde_json::to_string(&mesh).unwrap();
        let back: PolyMesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);

        let mut data = mesh.into_data();
        data.owner.pop();
        let json = serde_json::to_string(&data).unwrap();
        assert!(serde_json::from_str::<PolyMesh>(&json).is_err());
    }
}
