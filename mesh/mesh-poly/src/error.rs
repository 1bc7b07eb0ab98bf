//! Error types for polyhedral mesh construction.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors raised when mesh data violates the addressing invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Mesh has no faces.
    #[error("mesh has no faces")]
    NoFaces,

    /// Face has fewer than three points.
    #[error("face {face} has {count} points (need at least 3)")]
    DegenerateFace {
        /// The offending face.
        face: usize,
        /// Number of points on the face.
        count: usize,
    },

    /// Face visits the same point twice.
    #[error("face {face} repeats point {point}")]
    RepeatedPoint {
        /// The offending face.
        face: usize,
        /// The repeated point.
        point: usize,
    },

    /// Point index is out of bounds.
    #[error("face {face} references point {point} (mesh has {point_count} points)")]
    PointOutOfBounds {
        /// The face holding the reference.
        face: usize,
        /// The invalid point index.
        point: usize,
        /// Total number of points.
        point_count: usize,
    },

    /// Owner list does not cover every face.
    #[error("owner list has {owners} entries for {faces} faces")]
    OwnerCount {
        /// Length of the owner list.
        owners: usize,
        /// Number of faces.
        faces: usize,
    },

    /// More neighbours than faces.
    #[error("neighbour list has {neighbours} entries for {faces} faces")]
    NeighbourCount {
        /// Length of the neighbour list.
        neighbours: usize,
        /// Number of faces.
        faces: usize,
    },

    /// Internal face is not ordered owner < neighbour.
    #[error("internal face {face} has owner {owner} >= neighbour {neighbour}")]
    OwnerNotLower {
        /// The offending face.
        face: usize,
        /// Owner cell.
        owner: usize,
        /// Neighbour cell.
        neighbour: usize,
    },

    /// Patches do not tile the boundary faces.
    #[error("patch '{name}' starts at {start}, expected {expected}")]
    PatchLayout {
        /// Patch name.
        name: String,
        /// Declared start face.
        start: usize,
        /// Start face required to continue the boundary range.
        expected: usize,
    },

    /// Patches do not cover all boundary faces.
    #[error("patches cover faces up to {covered}, mesh has {faces} faces")]
    UncoveredBoundary {
        /// One past the last face covered by a patch.
        covered: usize,
        /// Number of faces.
        faces: usize,
    },

    /// Cell has too few faces to be closed.
    #[error("cell {cell} has {count} faces (need at least 4)")]
    OpenCell {
        /// The offending cell.
        cell: usize,
        /// Number of faces on the cell.
        count: usize,
    },

    /// A zone references a face or cell outside the mesh.
    #[error("zone '{zone}' references {kind} {index} (mesh has {count})")]
    ZoneOutOfBounds {
        /// Zone name.
        zone: String,
        /// "face" or "cell".
        kind: &'static str,
        /// The invalid index.
        index: usize,
        /// Number of faces or cells.
        count: usize,
    },

    /// A face or cell appears in more than one zone.
    #[error("{kind} {index} is in zones '{first}' and '{second}'")]
    ZoneOverlap {
        /// "face" or "cell".
        kind: &'static str,
        /// The doubly-zoned element.
        index: usize,
        /// First zone.
        first: String,
        /// Second zone.
        second: String,
    },

    /// Face zone flip map length differs from its face list.
    #[error("face zone '{zone}' has {faces} faces but {flips} flip flags")]
    FlipMapLength {
        /// Zone name.
        zone: String,
        /// Number of faces.
        faces: usize,
        /// Number of flip flags.
        flips: usize,
    },

    /// Replacement point list has the wrong size.
    #[error("expected {expected} points, got {got}")]
    PointCount {
        /// Current number of points.
        expected: usize,
        /// Number supplied.
        got: usize,
    },
}
