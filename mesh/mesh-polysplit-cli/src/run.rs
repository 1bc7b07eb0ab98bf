//! The load, split, write sequence shared by both tools.

use anyhow::{Context, Result};
use mesh_poly::CellShape;
use mesh_polysplit::{SplitParams, SplitReport, split_cells, split_faces};
use mesh_topo_change::PolyTopoChange;
use tracing::info;

use crate::{Case, CaseArgs, ControlDict, Instance, MeshDict};

/// Which splitting operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Triangulate faces with more than four edges.
    SplitFaces,
    /// Decompose cells that are not reference shapes into pyramids.
    SplitCells,
}

/// What a run did.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Instance the mesh was read from.
    pub read_from: Instance,
    /// Instance the mesh was written to.
    pub written_to: Instance,
    /// Split statistics.
    pub report: SplitReport,
}

/// Run a tool on the case given by `args`.
///
/// The mesh is only written after the split succeeded.
///
/// # Errors
///
/// Returns an error if the case cannot be read, the split fails, or the
/// mesh cannot be written.
pub fn run(tool: Tool, args: &CaseArgs) -> Result<RunOutcome> {
    let case = Case::open(&args.case)?;
    let control = ControlDict::load(&case)?;

    let (dict, dict_path) = MeshDict::load(&case, args.dict.as_deref())?;
    if let Some(path) = &dict_path {
        info!("Read {} options from {}", dict.len(), path.display());
    }

    let start = case.start_time(args.time.as_deref())?;
    let instance = case.mesh_instance(start)?;
    info!("Reading mesh from {}", case.mesh_file(&instance).display());
    let mut mesh = case
        .read_mesh(&instance)
        .with_context(|| format!("Failed to read mesh for time {}", instance.name()))?;

    let engine = PolyTopoChange::new(&mesh);
    let report = match tool {
        Tool::SplitFaces => split_faces(&mut mesh, engine, &SplitParams::default()),
        Tool::SplitCells => split_cells(&mut mesh, engine, &CellShape::ALL),
    }
    .context("Failed to split mesh")?;

    info!("{report}");
    info!("Recorded {} added points", report.added_points.len());

    let target = if args.overwrite {
        instance.clone()
    } else {
        Instance::time(start + control.delta_t)
    };

    info!("Writing modified mesh to time {}", target.name());
    case.write_mesh(&target, &mesh)
        .with_context(|| format!("Failed to write mesh to {}", target.name()))?;

    Ok(RunOutcome {
        read_from: instance,
        written_to: target,
        report,
    })
}
