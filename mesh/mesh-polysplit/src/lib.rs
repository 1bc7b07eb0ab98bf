//! Splitting of polyhedral cells and polygonal faces.
//!
//! This crate provides the two refinement operations behind the
//! `split-cells` and `split-faces` tools:
//!
//! - **Face triangulation**: every face with more than four edges becomes a
//!   fan of triangles around its area centroid
//! - **Pyramid decomposition**: every cell that is not a hexahedron,
//!   tetrahedron, pyramid or prism becomes one pyramid per face, with the
//!   cell centroid as the common apex
//!
//! Both operations only describe their edits. The commands go to a
//! [`TopoChange`](mesh_topo_change::TopoChange) engine, which applies them
//! in one commit; the element-to-point tables are then renumbered through
//! the engine's [`MeshMap`](mesh_topo_change::MeshMap).
//!
//! # Example
//!
//! ```
//! use mesh_poly::{CellShape, PolyTopology, prism_column};
//! use mesh_polysplit::{SplitParams, split_cells, split_faces};
//! use mesh_topo_change::PolyTopoChange;
//!
//! let mut mesh = prism_column(5, 1);
//!
//! // Triangulate the two pentagonal caps
//! let engine = PolyTopoChange::new(&mesh);
//! let report = split_faces(&mut mesh, engine, &SplitParams::default())?;
//! assert_eq!(report.split, 2);
//!
//! // The cell now has 5 quads and 10 triangles, so it still gets split
//! let engine = PolyTopoChange::new(&mesh);
//! let report = split_cells(&mut mesh, engine, &CellShape::ALL)?;
//! assert_eq!(report.split, 1);
//! assert_eq!(mesh.n_cells(), 15);
//! # Ok::<(), mesh_polysplit::SplitError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod centroid;
mod classify;
mod error;
mod face_info;
mod params;
mod pyramid;
mod renumber;
mod result;
mod split;
mod triangulate;

pub use centroid::{cell_centroids, face_centroids};
pub use classify::{find_polygonal_faces, find_polyhedral_cells};
pub use error::{SplitError, SplitResult};
pub use face_info::FaceInfo;
pub use params::SplitParams;
pub use pyramid::{CellSplitter, PyramidSplitter};
pub use renumber::translate_table;
pub use result::{MeshCounts, SplitKind, SplitReport};
pub use split::{split_cells, split_cells_with, split_faces};
pub use triangulate::FaceTriangulator;
