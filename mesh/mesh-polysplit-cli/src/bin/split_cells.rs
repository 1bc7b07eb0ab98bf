//! Decompose every cell that is not a hexahedron, tetrahedron, pyramid or
//! prism into pyramids around its centroid.

use clap::Parser;
use mesh_polysplit_cli::{CaseArgs, Tool, logging, run};

/// Split polyhedral cells into pyramids
#[derive(Parser)]
#[command(name = "split-cells")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Decompose polyhedral cells into pyramids around their centroids",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    args: CaseArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.args.log_level)?;

    let outcome = run(Tool::SplitCells, &cli.args)?;
    if !outcome.report.was_split() {
        tracing::info!("All cells are reference shapes, mesh written unchanged");
    }
    tracing::info!("End");
    Ok(())
}
