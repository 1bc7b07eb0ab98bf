//! Case-level settings read from the `system` directory.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Case, CaseError, CaseResult};

/// File name of the run control settings.
pub const CONTROL_DICT: &str = "controlDict.json";

/// File name of the tool options.
pub const MODIFY_MESH_DICT: &str = "modifyMeshDict.json";

/// Run control settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlDict {
    /// Time increment between the read and the written mesh.
    #[serde(rename = "deltaT")]
    pub delta_t: f64,
}

impl Default for ControlDict {
    fn default() -> Self {
        Self { delta_t: 1.0 }
    }
}

impl ControlDict {
    /// Read `system/controlDict.json`, or the defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(case: &Case) -> CaseResult<Self> {
        let path = case.system_file(CONTROL_DICT);
        if !path.is_file() {
            debug!(path = %path.display(), "No control dictionary, using defaults");
            return Ok(Self::default());
        }
        read_json(&path)
    }
}

/// Tool options, keyed by option name.
///
/// The splitting tools read this dictionary but take no options from it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MeshDict {
    options: BTreeMap<String, serde_json::Value>,
}

impl MeshDict {
    /// Read the dictionary at `explicit`, or `system/modifyMeshDict.json` if
    /// no path is given.
    ///
    /// Returns the dictionary and the path it was read from, if any. The
    /// default dictionary is optional; an explicit one must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path does not exist or a file cannot
    /// be parsed.
    pub fn load(case: &Case, explicit: Option<&Path>) -> CaseResult<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    case.root().join(path)
                };
                if !path.is_file() {
                    return Err(CaseError::MissingDict(path));
                }
                path
            }
            None => {
                let path = case.system_file(MODIFY_MESH_DICT);
                if !path.is_file() {
                    return Ok((Self::default(), None));
                }
                path
            }
        };
        let dict = read_json(&path)?;
        Ok((dict, Some(path)))
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Check if the dictionary has no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Look up an option.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.options.get(name)
    }

    /// Option names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CaseResult<T> {
    let file = File::open(path).map_err(|e| CaseError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| CaseError::json(path, e))
}
