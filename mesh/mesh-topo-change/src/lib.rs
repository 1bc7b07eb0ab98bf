//! Topology-change commands and engines for polyhedral meshes.
//!
//! Mesh-editing algorithms describe their edits as a batch of commands:
//!
//! - [`AddPoint`], [`AddFace`], [`AddCell`] - Insert new elements
//! - [`ModifyFace`] - Change the points, owner/neighbour, patch or zone of
//!   an existing face
//!
//! The batch goes to a [`TopoChange`] engine, which hands out provisional
//! indices for added elements and applies everything in one
//! [`commit`](TopoChange::commit). The commit returns a [`MeshMap`] relating
//! old and provisional indices to the final ones.
//!
//! [`PolyTopoChange`] is an in-memory engine for [`mesh_poly::PolyMesh`]. It
//! handles additions and in-place modifications only.
//!
//! # Example
//!
//! ```
//! use mesh_poly::{PolyTopology, prism_column};
//! use mesh_topo_change::{AddPoint, PolyTopoChange, TopoChange};
//!
//! let mut mesh = prism_column(4, 1);
//! let mut engine = PolyTopoChange::new(&mesh);
//! let p = engine.add_point(AddPoint {
//!     point: [0.0, 0.0, 0.5].into(),
//!     master_point: None,
//!     zone: None,
//!     in_cell: false,
//! });
//! assert_eq!(p, 8);
//!
//! let map = engine.commit(&mut mesh).unwrap();
//! assert_eq!(mesh.n_points(), 9);
//! assert_eq!(map.points.new_index(p), Some(8));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod command;
mod engine;
mod error;
mod map;
mod traits;

pub use command::{AddCell, AddFace, AddPoint, ModifyFace, TopoCommand};
pub use engine::PolyTopoChange;
pub use error::{TopoError, TopoResult};
pub use map::{IndexMapping, MeshMap};
pub use traits::TopoChange;
