//! Triangulate every face with more than four edges around its centroid.

use clap::Parser;
use mesh_polysplit_cli::{CaseArgs, Tool, logging, run};

/// Split faces with more than four edges into triangles
#[derive(Parser)]
#[command(name = "split-faces")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Triangulate polygonal faces around their centroids", long_about = None)]
struct Cli {
    #[command(flatten)]
    args: CaseArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.args.log_level)?;

    run(Tool::SplitFaces, &cli.args)?;
    tracing::info!("End");
    Ok(())
}
