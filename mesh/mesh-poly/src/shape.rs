//! Reference cell shapes and shape matching.

use hashbrown::HashSet;

use crate::PolyTopology;

/// Decides whether a cell has a particular reference shape.
pub trait ShapeMatcher<M: ?Sized> {
    /// Check whether `cell` of `mesh` has this matcher's shape.
    fn matches(&self, mesh: &M, cell: usize) -> bool;
}

/// The reference solid shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellShape {
    /// Six quadrilaterals, eight points.
    Hexahedron,
    /// Four triangles, four points.
    Tetrahedron,
    /// Four triangles and one quadrilateral, five points.
    Pyramid,
    /// Two triangles and three quadrilaterals, six points.
    Prism,
}

impl CellShape {
    /// All reference shapes, in matching priority order.
    pub const ALL: [Self; 4] = [
        Self::Hexahedron,
        Self::Tetrahedron,
        Self::Pyramid,
        Self::Prism,
    ];

    /// Expected topological signature of this shape.
    #[must_use]
    pub const fn signature(self) -> CellSignature {
        let (faces, triangles, quads, points) = match self {
            Self::Hexahedron => (6, 0, 6, 8),
            Self::Tetrahedron => (4, 4, 0, 4),
            Self::Pyramid => (5, 4, 1, 5),
            Self::Prism => (5, 2, 3, 6),
        };
        CellSignature {
            faces,
            triangles,
            quads,
            points,
        }
    }

    /// Find the first reference shape a cell matches.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_poly::{CellShape, prism_column};
    ///
    /// assert_eq!(CellShape::of(&prism_column(4, 1), 0), Some(CellShape::Hexahedron));
    /// assert_eq!(CellShape::of(&prism_column(3, 1), 0), Some(CellShape::Prism));
    /// assert_eq!(CellShape::of(&prism_column(5, 1), 0), None);
    /// ```
    #[must_use]
    pub fn of<M: PolyTopology + ?Sized>(mesh: &M, cell: usize) -> Option<Self> {
        let signature = CellSignature::of(mesh, cell);
        Self::ALL.into_iter().find(|s| s.signature() == signature)
    }
}

impl<M: PolyTopology + ?Sized> ShapeMatcher<M> for CellShape {
    fn matches(&self, mesh: &M, cell: usize) -> bool {
        CellSignature::of(mesh, cell) == self.signature()
    }
}

/// Topological signature of a cell.
///
/// For a closed cell the four reference shapes have pairwise distinct
/// signatures, so matching on the signature is unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSignature {
    /// Number of faces.
    pub faces: usize,
    /// Number of three-sided faces.
    pub triangles: usize,
    /// Number of four-sided faces.
    pub quads: usize,
    /// Number of distinct points.
    pub points: usize,
}

impl CellSignature {
    /// Compute the signature of a cell.
    #[must_use]
    pub fn of<M: PolyTopology + ?Sized>(mesh: &M, cell: usize) -> Self {
        let faces = mesh.cell_faces(cell);
        let mut points = HashSet::new();
        let mut triangles = 0;
        let mut quads = 0;

        for &face in faces {
            let f = mesh.face(face);
            match f.len() {
                3 => triangles += 1,
                4 => quads += 1,
                _ => {}
            }
            points.extend(f.points().iter().copied());
        }

        Self {
            faces: faces.len(),
            triangles,
            quads,
            points: points.len(),
        }
    }
}
