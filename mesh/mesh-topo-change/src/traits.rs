//! The topology-change engine interface.

use crate::{AddCell, AddFace, AddPoint, MeshMap, ModifyFace};

/// A topology-change engine: collects commands, then applies them in one
/// commit.
///
/// Each `add_*` call returns the provisional index of the new element. The
/// provisional index can be used by later commands in the same batch and is
/// resolved to the final index through the [`MeshMap`] returned by
/// [`commit`](Self::commit).
///
/// Splitting algorithms only issue commands; whether the resulting mesh is
/// consistent is the engine's contract.
pub trait TopoChange {
    /// Mesh type the engine modifies.
    type Mesh;

    /// Error returned when the commands cannot be applied.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Queue a new point.
    fn add_point(&mut self, command: AddPoint) -> usize;

    /// Queue a new face.
    fn add_face(&mut self, command: AddFace) -> usize;

    /// Queue a change to an existing face.
    fn modify_face(&mut self, command: ModifyFace);

    /// Queue a new cell.
    fn add_cell(&mut self, command: AddCell) -> usize;

    /// Apply all queued commands to `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if the commands are inconsistent with each other or
    /// with the mesh. On error the mesh is left unchanged.
    fn commit(self, mesh: &mut Self::Mesh) -> Result<MeshMap, Self::Error>
    where
        Self: Sized;
}
