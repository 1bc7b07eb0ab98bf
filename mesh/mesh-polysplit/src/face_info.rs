//! Classification of a face that its replacement faces inherit.

use mesh_poly::PolyTopology;

/// Patch, zone and owner/neighbour of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceInfo {
    /// Owner cell.
    pub owner: usize,
    /// Neighbour cell, `None` on the boundary.
    pub neighbour: Option<usize>,
    /// Boundary patch, `None` for internal faces.
    pub patch: Option<usize>,
    /// Face zone, `None` if the face is not zoned.
    pub zone: Option<usize>,
    /// Orientation flag within the zone; `false` when unzoned.
    pub zone_flip: bool,
}

impl FaceInfo {
    /// Capture the classification of `face`.
    #[must_use]
    pub fn of<M: PolyTopology + ?Sized>(mesh: &M, face: usize) -> Self {
        let membership = mesh.which_face_zone(face);
        Self {
            owner: mesh.face_owner(face),
            neighbour: mesh.face_neighbour(face),
            patch: mesh.which_patch(face),
            zone: membership.map(|m| m.zone),
            zone_flip: membership.is_some_and(|m| m.flip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_poly::{FaceZone, prism_column};

    #[test]
    fn test_internal_and_boundary() {
        let mesh = prism_column(5, 2)
            .with_face_zones(vec![FaceZone::new("mid", vec![0], vec![true])])
            .unwrap();

        let internal = FaceInfo::of(&mesh, 0);
        assert_eq!(internal.neighbour, Some(1));
        assert_eq!(internal.patch, None);
        assert_eq!(internal.zone, Some(0));
        assert!(internal.zone_flip);

        let top = FaceInfo::of(&mesh, 2);
        assert_eq!(top.owner, 1);
        assert_eq!(top.neighbour, None);
        assert_eq!(top.patch, Some(1));
        assert_eq!(top.zone, None);
        assert!(!top.zone_flip);
    }
}
