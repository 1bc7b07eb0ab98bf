//! Topology-change commands.
//!
//! Each command carries everything an engine needs to realise it. `None`
//! stands for "no such element": no neighbour (boundary face), no patch
//! (internal face), no zone, no master.

use mesh_poly::{Face, Point3};

/// Insert a new point.
#[derive(Debug, Clone, PartialEq)]
pub struct AddPoint {
    /// Position of the new point.
    pub point: Point3<f64>,
    /// Existing point whose motion the new point follows.
    pub master_point: Option<usize>,
    /// Point zone for the new point.
    pub zone: Option<usize>,
    /// Whether the point is used by at least one cell.
    pub in_cell: bool,
}

/// Insert a new face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFace {
    /// Point indices of the new face.
    pub face: Face,
    /// Owner cell.
    pub owner: usize,
    /// Neighbour cell, `None` for a boundary face.
    pub neighbour: Option<usize>,
    /// Point the face is inflated from.
    pub master_point: Option<usize>,
    /// Edge the face is inflated from.
    pub master_edge: Option<usize>,
    /// Face the new face copies its properties from.
    pub master_face: Option<usize>,
    /// Whether the face flux changes sign.
    pub flip_face_flux: bool,
    /// Boundary patch, `None` for an internal face.
    pub patch: Option<usize>,
    /// Face zone.
    pub zone: Option<usize>,
    /// Orientation flag within the face zone.
    pub zone_flip: bool,
}

/// Change an existing face in place, keeping its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyFace {
    /// New point indices of the face.
    pub face: Face,
    /// Index of the face being modified.
    pub face_id: usize,
    /// Owner cell.
    pub owner: usize,
    /// Neighbour cell, `None` for a boundary face.
    pub neighbour: Option<usize>,
    /// Whether the face flux changes sign.
    pub flip_face_flux: bool,
    /// Boundary patch, `None` for an internal face.
    pub patch: Option<usize>,
    /// Remove the face from its current zone.
    pub remove_from_zone: bool,
    /// Face zone.
    pub zone: Option<usize>,
    /// Orientation flag within the face zone.
    pub zone_flip: bool,
}

/// Insert a new cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddCell {
    /// Point the cell is inflated from.
    pub master_point: Option<usize>,
    /// Edge the cell is inflated from.
    pub master_edge: Option<usize>,
    /// Face the cell is inflated from.
    pub master_face: Option<usize>,
    /// Cell the new cell is split off.
    pub master_cell: Option<usize>,
    /// Cell zone.
    pub zone: Option<usize>,
}

/// Any topology-change command, in the order it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum TopoCommand {
    /// See [`AddPoint`].
    AddPoint(AddPoint),
    /// See [`AddFace`].
    AddFace(AddFace),
    /// See [`ModifyFace`].
    ModifyFace(ModifyFace),
    /// See [`AddCell`].
    AddCell(AddCell),
}

impl TopoCommand {
    /// Short name of the command kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddPoint(_) => "add-point",
            Self::AddFace(_) => "add-face",
            Self::ModifyFace(_) => "modify-face",
            Self::AddCell(_) => "add-cell",
        }
    }
}
