//! Polyhedral mesh types for finite-volume meshes.
//!
//! This crate provides the mesh representation the splitting tools operate on:
//!
//! - [`Face`] - A polygon given as a cyclic list of point indices
//! - [`PolyMesh`] - Points, faces and owner/neighbour addressing, with
//!   boundary [`Patch`]es, [`FaceZone`]s and [`CellZone`]s
//! - [`PolyTopology`] / [`PolyGeometry`] - Read-only access used by algorithms
//! - [`CellShape`] - Hexahedron, tetrahedron, pyramid and prism matchers
//!
//! # Addressing
//!
//! Cells are not stored explicitly. Each face has an owner cell; internal
//! faces also have a neighbour cell with `owner < neighbour`. Internal faces
//! come first, followed by boundary faces grouped into contiguous patches.
//!
//! Face normals follow the right-hand rule over the point order and point
//! from the owner towards the neighbour (or out of the domain on the
//! boundary).
//!
//! # Example
//!
//! ```
//! use mesh_poly::{CellShape, PolyTopology, prism_column};
//!
//! // Two pentagonal prisms stacked on top of each other
//! let mesh = prism_column(5, 2);
//! assert_eq!(mesh.n_cells(), 2);
//!
//! // Neither cell is one of the reference shapes
//! assert_eq!(CellShape::of(&mesh, 0), None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod face;
mod mesh;
mod primitives;
mod shape;
mod traits;
mod zones;

pub use error::{MeshError, MeshResult};
pub use face::Face;
pub use mesh::{PolyMesh, PolyMeshData};
pub use primitives::{prism_column, pyramid, tetrahedron};
pub use shape::{CellShape, CellSignature, ShapeMatcher};
pub use traits::{MovePoints, PolyGeometry, PolyTopology};
pub use zones::{CellZone, FaceZone, Patch, ZoneMembership};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
