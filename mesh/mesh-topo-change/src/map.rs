//! Old-to-new index maps produced by a topology-change commit.

use mesh_poly::Point3;

/// Mapping between the indices of one kind of element before and after a
/// commit.
///
/// "Old" indices cover both the elements that existed before the commit and
/// the provisional indices the engine handed out for added elements. An old
/// index that maps to `None` was removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexMapping {
    reverse: Vec<Option<usize>>,
    forward: Vec<Option<usize>>,
    n_existing: usize,
}

impl IndexMapping {
    /// Build from the old-to-new direction.
    ///
    /// `n_existing` is the number of elements before the commit; old indices
    /// at or above it are provisional indices of added elements.
    ///
    /// # Panics
    ///
    /// Panics if a new index is not below `n_new`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_topo_change::IndexMapping;
    ///
    /// // Three old faces, face 1 removed, one face added at provisional index 3
    /// let map = IndexMapping::from_reverse(vec![Some(0), None, Some(1), Some(2)], 3, 3);
    /// assert_eq!(map.new_index(2), Some(1));
    /// assert_eq!(map.new_index(1), None);
    /// assert_eq!(map.old_index(2), Some(3));
    /// assert!(map.is_added(2));
    /// ```
    #[must_use]
    pub fn from_reverse(reverse: Vec<Option<usize>>, n_existing: usize, n_new: usize) -> Self {
        let mut forward = vec![None; n_new];
        for (old, new) in reverse.iter().enumerate() {
            if let Some(new) = *new {
                forward[new] = Some(old);
            }
        }
        Self {
            reverse,
            forward,
            n_existing,
        }
    }

    /// The identity mapping over `n` elements.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self::from_reverse((0..n).map(Some).collect(), n, n)
    }

    /// New index of an old or provisional index, `None` if removed or unknown.
    #[inline]
    #[must_use]
    pub fn new_index(&self, old: usize) -> Option<usize> {
        self.reverse.get(old).copied().flatten()
    }

    /// Old or provisional index of a new element.
    #[inline]
    #[must_use]
    pub fn old_index(&self, new: usize) -> Option<usize> {
        self.forward.get(new).copied().flatten()
    }

    /// Whether a new element did not exist before the commit.
    #[must_use]
    pub fn is_added(&self, new: usize) -> bool {
        self.old_index(new).is_none_or(|old| old >= self.n_existing)
    }

    /// Number of elements before the commit.
    #[inline]
    #[must_use]
    pub const fn n_existing(&self) -> usize {
        self.n_existing
    }

    /// Number of elements after the commit.
    #[inline]
    #[must_use]
    pub fn n_new(&self) -> usize {
        self.forward.len()
    }

    /// Whether every pre-existing element kept its index.
    #[must_use]
    pub fn is_identity_on_existing(&self) -> bool {
        (0..self.n_existing).all(|i| self.new_index(i) == Some(i))
    }
}

/// Everything a commit reports about renumbering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshMap {
    /// Point renumbering.
    pub points: IndexMapping,
    /// Face renumbering.
    pub faces: IndexMapping,
    /// Cell renumbering.
    pub cells: IndexMapping,
    /// Point positions to move to after the commit, if the engine inflated
    /// new elements from zero size.
    pub pre_motion_points: Option<Vec<Point3<f64>>>,
}

impl MeshMap {
    /// Map for a commit that changed nothing.
    #[must_use]
    pub fn identity(n_points: usize, n_faces: usize, n_cells: usize) -> Self {
        Self {
            points: IndexMapping::identity(n_points),
            faces: IndexMapping::identity(n_faces),
            cells: IndexMapping::identity(n_cells),
            pre_motion_points: None,
        }
    }

    /// Whether the map carries point motion.
    #[inline]
    #[must_use]
    pub const fn has_motion_points(&self) -> bool {
        self.pre_motion_points.is_some()
    }
}
