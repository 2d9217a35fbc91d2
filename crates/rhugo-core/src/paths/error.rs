//! Path-related error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from resolving the staging and bundle roots or preparing the
/// staging directory.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot determine home directory")]
    NoHomeDir,

    #[error("Path cannot be empty")]
    EmptyPath,

    #[error("Cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),

    /// Something other than a directory occupies the staging path.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to create staging directory {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The staging directory exists but a probe file could not be written.
    #[error("Staging directory {path} is not writable: {source}")]
    NotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
