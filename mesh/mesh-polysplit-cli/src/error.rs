//! Error types for case directory handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing a case.
#[derive(Debug, Error)]
pub enum CaseError {
    /// The case root is not a directory.
    #[error("case directory {0} does not exist")]
    NoCase(PathBuf),

    /// No mesh was found for the requested time.
    #[error("no mesh found in {case} at or before time {time}")]
    NoMesh {
        /// Case root.
        case: PathBuf,
        /// Start time.
        time: String,
    },

    /// The requested start time is not a number.
    #[error("invalid time '{0}'")]
    InvalidTime(String),

    /// An explicitly given dictionary does not exist.
    #[error("dictionary {0} does not exist")]
    MissingDict(PathBuf),

    /// Filesystem access failed.
    #[error("{path}: {source}")]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON file could not be parsed or written.
    #[error("{path}: {source}")]
    Json {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

impl CaseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Result type for case operations.
pub type CaseResult<T> = std::result::Result<T, CaseError>;
