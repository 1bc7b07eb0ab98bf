//! Result types for splitting operations.

use std::collections::BTreeMap;
use std::fmt;

use mesh_poly::PolyTopology;

/// What a split operation divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitKind {
    /// Polygonal faces were triangulated.
    Faces,
    /// Polyhedral cells were decomposed into pyramids.
    Cells,
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Faces => f.write_str("faces"),
            Self::Cells => f.write_str("cells"),
        }
    }
}

/// Element counts of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshCounts {
    /// Number of points.
    pub points: usize,
    /// Number of faces.
    pub faces: usize,
    /// Number of cells.
    pub cells: usize,
}

impl MeshCounts {
    /// Count the elements of a mesh.
    #[must_use]
    pub fn of<M: PolyTopology + ?Sized>(mesh: &M) -> Self {
        Self {
            points: mesh.n_points(),
            faces: mesh.n_faces(),
            cells: mesh.n_cells(),
        }
    }
}

/// Result of a split operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// What was split.
    pub kind: SplitKind,

    /// Number of elements that were split.
    pub split: usize,

    /// Counts before the split.
    pub before: MeshCounts,

    /// Counts after the split.
    pub after: MeshCounts,

    /// Split element index to its centre point index, both in the new
    /// numbering.
    pub added_points: BTreeMap<usize, usize>,
}

impl SplitReport {
    /// Check if any element was split.
    #[must_use]
    pub const fn was_split(&self) -> bool {
        self.split > 0
    }

    /// Number of faces the split added.
    #[must_use]
    pub const fn added_faces(&self) -> usize {
        self.after.faces.saturating_sub(self.before.faces)
    }

    /// Number of cells the split added.
    #[must_use]
    pub const fn added_cells(&self) -> usize {
        self.after.cells.saturating_sub(self.before.cells)
    }
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Split {} {}: {} → {} points, {} → {} faces, {} → {} cells",
            self.split,
            self.kind,
            self.before.points,
            self.after.points,
            self.before.faces,
            self.after.faces,
            self.before.cells,
            self.after.cells
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(split: usize) -> SplitReport {
        SplitReport {
            kind: SplitKind::Faces,
            split,
            before: MeshCounts {
                points: 10,
                faces: 7,
                cells: 1,
            },
            after: MeshCounts {
                points: 10 + split,
                faces: 7 + 4 * split,
                cells: 1,
            },
            added_points: BTreeMap::new(),
        }
    }

    #[test]
    fn test_added_counts() {
        let r = report(2);
        assert!(r.was_split());
        assert_eq!(r.added_faces(), 8);
        assert_eq!(r.added_cells(), 0);
        assert!(!report(0).was_split());
    }

    #[test]
    fn test_display() {
        let display = format!("{}", report(2));
        assert_eq!(display, "Split 2 faces: 10 → 12 points, 7 → 15 faces, 1 → 1 cells");
    }
}
