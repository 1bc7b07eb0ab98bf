//! Command-line flags shared by both tools.

use std::path::PathBuf;

use clap::Args;

/// Case selection and output flags.
#[derive(Debug, Clone, Args)]
pub struct CaseArgs {
    /// Case directory
    #[arg(long, default_value = ".")]
    pub case: PathBuf,

    /// Write the mesh into the instance it was read from
    #[arg(long)]
    pub overwrite: bool,

    /// Use this file instead of system/modifyMeshDict.json
    #[arg(long)]
    pub dict: Option<PathBuf>,

    /// Time to start from (default: latest time directory)
    #[arg(long)]
    pub time: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}
