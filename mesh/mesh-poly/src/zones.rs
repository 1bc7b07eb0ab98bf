//! Boundary patches and face/cell zones.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named, contiguous range of boundary faces.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Patch {
    /// Patch name.
    pub name: String,
    /// First face of the patch.
    pub start: usize,
    /// Number of faces in the patch.
    pub size: usize,
}

impl Patch {
    /// Create a patch.
    #[must_use]
    pub fn new(name: impl Into<String>, start: usize, size: usize) -> Self {
        Self {
            name: name.into(),
            start,
            size,
        }
    }

    /// One past the last face of the patch.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.size
    }

    /// Check whether a face lies in this patch.
    #[inline]
    #[must_use]
    pub const fn contains(&self, face: usize) -> bool {
        face >= self.start && face < self.end()
    }
}

/// A named set of faces with a per-face orientation flag.
///
/// The flip flag records whether the face's normal runs against the zone's
/// orientation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceZone {
    /// Zone name.
    pub name: String,
    /// Member faces.
    pub faces: Vec<usize>,
    /// Flip flag per member face.
    pub flip_map: Vec<bool>,
}

impl FaceZone {
    /// Create a face zone.
    #[must_use]
    pub fn new(name: impl Into<String>, faces: Vec<usize>, flip_map: Vec<bool>) -> Self {
        Self {
            name: name.into(),
            faces,
            flip_map,
        }
    }

    /// Create a face zone with no flipped faces.
    #[must_use]
    pub fn unflipped(name: impl Into<String>, faces: Vec<usize>) -> Self {
        let flip_map = vec![false; faces.len()];
        Self::new(name, faces, flip_map)
    }

    /// Number of member faces.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Check if the zone is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// A named set of cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellZone {
    /// Zone name.
    pub name: String,
    /// Member cells.
    pub cells: Vec<usize>,
}

impl CellZone {
    /// Create a cell zone.
    #[must_use]
    pub fn new(name: impl Into<String>, cells: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// Membership of one face in a face zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneMembership {
    /// Zone index.
    pub zone: usize,
    /// Whether the face is flipped relative to the zone.
    pub flip: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_range() {
        let patch = Patch::new("walls", 10, 4);
        assert_eq!(patch.end(), 14);
        assert!(patch.contains(10));
        assert!(patch.contains(13));
        assert!(!patch.contains(14));
        assert!(!patch.contains(9));
    }

    #[test]
    fn test_unflipped_zone() {
        let zone = FaceZone::unflipped("baffle", vec![3, 5, 8]);
        assert_eq!(zone.len(), 3);
        assert!(zone.flip_map.iter().all(|f| !f));
    }
}
