//! Case handling and the run sequence for the `split-cells` and
//! `split-faces` tools.
//!
//! A case is a directory with the initial mesh in `constant/polyMesh`, later
//! meshes in time directories, and settings in `system`. Both tools read the
//! mesh at the start time, split it, and write it either to the next time
//! (start time plus `deltaT`) or, with `--overwrite`, back where it came
//! from.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod args;
mod case;
mod config;
mod error;
pub mod logging;
mod run;

pub use args::CaseArgs;
pub use case::{CONSTANT, Case, Instance, MESH_DIR, MESH_FILE, SYSTEM, time_name};
pub use config::{CONTROL_DICT, ControlDict, MODIFY_MESH_DICT, MeshDict};
pub use error::{CaseError, CaseResult};
pub use run::{RunOutcome, Tool, run};
