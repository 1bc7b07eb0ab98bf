//! Splitting parameters.

/// Parameters for face and cell splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitParams {
    /// Faces with more edges than this are triangulated.
    pub max_face_edges: usize,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self { max_face_edges: 4 }
    }
}

impl SplitParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the largest edge count a face may keep.
    ///
    /// Values below 3 are raised to 3, since every face has at least three
    /// edges and a triangle cannot be split further.
    #[must_use]
    pub fn with_max_face_edges(mut self, max_face_edges: usize) -> Self {
        self.max_face_edges = max_face_edges.max(3);
        self
    }

    /// Check whether a face with `edges` edges gets triangulated.
    #[inline]
    #[must_use]
    pub const fn splits_face(&self, edges: usize) -> bool {
        edges > self.max_face_edges
    }
}
