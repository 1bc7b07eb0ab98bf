//! Error types for topology-change commits.

use mesh_poly::MeshError;
use thiserror::Error;

/// Result type for topology-change operations.
pub type TopoResult<T> = Result<T, TopoError>;

/// Errors raised when a command list cannot be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopoError {
    /// The engine was committed against a mesh other than the one it was built for.
    #[error("engine built for a mesh with {expected} {what}, mesh has {found}")]
    MeshMismatch {
        /// The count that differs.
        what: String,
        /// Count in the mesh the engine was built for.
        expected: usize,
        /// Count in the mesh passed to commit.
        found: usize,
    },

    /// A face references a point that neither exists nor was added.
    #[error("face command {command} references point {point}, only {point_count} are known")]
    PointOutOfRange {
        /// Index of the offending command.
        command: usize,
        /// Offending point index.
        point: usize,
        /// Number of known points.
        point_count: usize,
    },

    /// A face references a cell that neither exists nor was added.
    #[error("face command {command} references cell {cell}, only {cell_count} are known")]
    CellOutOfRange {
        /// Index of the offending command.
        command: usize,
        /// Offending cell index.
        cell: usize,
        /// Number of known cells.
        cell_count: usize,
    },

    /// An internal face command has owner not below neighbour.
    #[error("face command {command} has owner {owner} not below neighbour {neighbour}")]
    OwnerNotLower {
        /// Index of the offending command.
        command: usize,
        /// Owner cell.
        owner: usize,
        /// Neighbour cell.
        neighbour: usize,
    },

    /// The same face was modified more than once.
    #[error("face {face} modified more than once")]
    FaceModifiedTwice {
        /// Face index.
        face: usize,
    },

    /// A modify command targets a face that does not exist.
    #[error("modify command targets face {face}, mesh has {face_count}")]
    ModifyOutOfRange {
        /// Face index.
        face: usize,
        /// Number of existing faces.
        face_count: usize,
    },

    /// An internal face was given a patch.
    #[error("face command {command} has a neighbour and patch {patch}")]
    PatchOnInternal {
        /// Index of the offending command.
        command: usize,
        /// Patch index.
        patch: usize,
    },

    /// A boundary face has no patch, or a patch that does not exist.
    #[error("boundary face command {command} has no valid patch")]
    MissingPatch {
        /// Index of the offending command.
        command: usize,
    },

    /// A command references a zone that does not exist.
    #[error("command {command} references {kind} zone {zone}, mesh has {zone_count}")]
    ZoneOutOfRange {
        /// Index of the offending command.
        command: usize,
        /// Zone kind (`"face"` or `"cell"`).
        kind: &'static str,
        /// Zone index.
        zone: usize,
        /// Number of zones of that kind.
        zone_count: usize,
    },

    /// A cell ends up with no faces.
    #[error("cell {cell} has no faces after the commit")]
    EmptyCell {
        /// Cell index.
        cell: usize,
    },

    /// The rebuilt mesh failed validation.
    #[error("resulting mesh is invalid: {0}")]
    Mesh(#[from] MeshError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TopoError::FaceModifiedTwice { face: 3 };
        assert_eq!(err.to_string(), "face 3 modified more than once");

        let err: TopoError = MeshError::NoFaces.into();
        assert!(err.to_string().starts_with("resulting mesh is invalid"));
    }
}
