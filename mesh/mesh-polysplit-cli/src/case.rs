//! Case directory layout: time instances, mesh files and stale-file cleanup.
//!
//! ```text
//! <case>/
//!   constant/polyMesh/mesh.json    initial mesh
//!   <time>/polyMesh/mesh.json      mesh written at a later time
//!   system/controlDict.json        optional, {"deltaT": 1.0}
//!   system/modifyMeshDict.json     optional tool options
//! ```

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use mesh_poly::PolyMesh;
use tracing::debug;

use crate::{CaseError, CaseResult};

/// Name of the directory holding the initial mesh.
pub const CONSTANT: &str = "constant";

/// Name of the mesh directory inside an instance.
pub const MESH_DIR: &str = "polyMesh";

/// Name of the mesh file inside the mesh directory.
pub const MESH_FILE: &str = "mesh.json";

/// Directory that holds case-level settings.
pub const SYSTEM: &str = "system";

/// Mesh file name used while writing, renamed over [`MESH_FILE`] on success.
const STAGING_FILE: &str = "mesh.json.tmp";

/// Time values closer than this are the same time.
const TIME_TOLERANCE: f64 = 1e-9;

/// Time names are rounded to this many steps per unit time.
const TIME_STEPS: f64 = 1e9;

/// A directory a mesh can be read from or written to.
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    /// The `constant` directory.
    Constant,
    /// A time directory.
    Time {
        /// Directory name.
        name: String,
        /// Time value.
        value: f64,
    },
}

impl Instance {
    /// Time instance with the canonical name for `value`.
    #[must_use]
    pub fn time(value: f64) -> Self {
        Self::Time {
            name: time_name(value),
            value,
        }
    }

    /// Directory name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Constant => CONSTANT,
            Self::Time { name, .. } => name,
        }
    }

    /// Time value; `constant` counts as time zero.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Constant => 0.0,
            Self::Time { value, .. } => *value,
        }
    }
}

/// Canonical directory name of a time value.
///
/// ```
/// use mesh_polysplit_cli::time_name;
///
/// assert_eq!(time_name(1.0), "1");
/// assert_eq!(time_name(0.1 + 0.2), "0.3");
/// assert_eq!(time_name(2.5), "2.5");
/// ```
#[must_use]
pub fn time_name(value: f64) -> String {
    let rounded = (value * TIME_STEPS).round() / TIME_STEPS;
    format!("{rounded}")
}

/// A case directory.
#[derive(Debug, Clone)]
pub struct Case {
    root: PathBuf,
}

impl Case {
    /// Open an existing case directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> CaseResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CaseError::NoCase(root));
        }
        Ok(Self { root })
    }

    /// Case root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file in the `system` directory.
    #[must_use]
    pub fn system_file(&self, name: &str) -> PathBuf {
        self.root.join(SYSTEM).join(name)
    }

    /// Mesh directory of an instance.
    #[must_use]
    pub fn mesh_dir(&self, instance: &Instance) -> PathBuf {
        self.root.join(instance.name()).join(MESH_DIR)
    }

    /// Mesh file of an instance.
    #[must_use]
    pub fn mesh_file(&self, instance: &Instance) -> PathBuf {
        self.mesh_dir(instance).join(MESH_FILE)
    }

    /// All time directories, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the case root cannot be listed.
    pub fn times(&self) -> CaseResult<Vec<Instance>> {
        let entries = fs::read_dir(&self.root).map_err(|e| CaseError::io(&self.root, e))?;

        let mut times = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CaseError::io(&self.root, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            match name.parse::<f64>() {
                Ok(value) if value.is_finite() => times.push(Instance::Time { name, value }),
                _ => {}
            }
        }
        times.sort_by(|a, b| a.value().total_cmp(&b.value()));
        Ok(times)
    }

    /// Time to start from: `requested` if given, else the latest time
    /// directory, else zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `requested` is not a number or the case root
    /// cannot be listed.
    pub fn start_time(&self, requested: Option<&str>) -> CaseResult<f64> {
        if let Some(requested) = requested {
            return requested
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite())
                .ok_or_else(|| CaseError::InvalidTime(requested.to_owned()));
        }
        Ok(self.times()?.last().map_or(0.0, Instance::value))
    }

    /// Newest instance at or before `start` that holds a mesh, falling back
    /// to `constant`.
    ///
    /// # Errors
    ///
    /// Returns an error if no instance holds a mesh.
    pub fn mesh_instance(&self, start: f64) -> CaseResult<Instance> {
        let found = self
            .times()?
            .into_iter()
            .rev()
            .filter(|t| t.value() <= start + TIME_TOLERANCE)
            .find(|t| self.mesh_file(t).is_file());

        if let Some(instance) = found {
            return Ok(instance);
        }
        if self.mesh_file(&Instance::Constant).is_file() {
            return Ok(Instance::Constant);
        }
        Err(CaseError::NoMesh {
            case: self.root.clone(),
            time: time_name(start),
        })
    }

    /// Read the mesh of an instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, is not valid JSON, or holds
    /// an inconsistent mesh.
    pub fn read_mesh(&self, instance: &Instance) -> CaseResult<PolyMesh> {
        let path = self.mesh_file(instance);
        let file = File::open(&path).map_err(|e| CaseError::io(&path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| CaseError::json(&path, e))
    }

    /// Write the mesh into an instance and remove stale files next to it.
    ///
    /// The mesh goes to a staging file first and is renamed into place, so
    /// a failed write leaves any existing mesh file as it was. Returns the
    /// path of the written mesh file.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be written.
    pub fn write_mesh(&self, instance: &Instance, mesh: &PolyMesh) -> CaseResult<PathBuf> {
        let dir = self.mesh_dir(instance);
        fs::create_dir_all(&dir).map_err(|e| CaseError::io(&dir, e))?;

        let path = dir.join(MESH_FILE);
        let staging = dir.join(STAGING_FILE);
        if let Err(e) = write_json(&staging, mesh) {
            // The target is untouched; only the partial staging file goes
            let _ = fs::remove_file(&staging);
            return Err(e);
        }
        fs::rename(&staging, &path).map_err(|e| CaseError::io(&path, e))?;

        let removed = remove_stale_files(&dir)?;
        debug!(path = %path.display(), removed, "Wrote mesh");
        Ok(path)
    }
}

/// Serialize `mesh` to `path`, surfacing errors from the final flush.
fn write_json(path: &Path, mesh: &PolyMesh) -> CaseResult<()> {
    let file = File::create(path).map_err(|e| CaseError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, mesh).map_err(|e| CaseError::json(path, e))?;
    writer.flush().map_err(|e| CaseError::io(path, e))
}

/// Remove files derived from the previous topology: the `sets` directory and
/// processor addressing files.
fn remove_stale_files(dir: &Path) -> CaseResult<usize> {
    let mut removed = 0;

    let sets = dir.join("sets");
    if sets.is_dir() {
        fs::remove_dir_all(&sets).map_err(|e| CaseError::io(&sets, e))?;
        removed += 1;
    }

    for entry in fs::read_dir(dir).map_err(|e| CaseError::io(dir, e))? {
        let path = entry.map_err(|e| CaseError::io(dir, e))?.path();
        let stale = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.contains("ProcAddressing"));
        if stale && path.is_file() {
            fs::remove_file(&path).map_err(|e| CaseError::io(&path, e))?;
            removed += 1;
        }
    }
    Ok(removed)
}
