//! Error types for mesh splitting.

use mesh_poly::MeshError;
use thiserror::Error;

/// Errors that can occur while splitting a mesh.
#[derive(Debug, Error)]
pub enum SplitError {
    /// An edge of a cell is not shared by exactly two of the cell's faces.
    #[error("cell {cell} is not closed: edge {edge:?} is used by {count} of its faces")]
    OpenCell {
        /// The offending cell.
        cell: usize,
        /// The edge, smaller point index first.
        edge: (usize, usize),
        /// Number of the cell's faces using the edge.
        count: usize,
    },

    /// The topology-change engine rejected the commands.
    #[error("topology change failed: {0}")]
    Commit(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Moving points after the commit failed.
    #[error("point motion failed: {0}")]
    Motion(#[from] MeshError),
}

/// Result type for splitting operations.
pub type SplitResult<T> = std::result::Result<T, SplitError>;
