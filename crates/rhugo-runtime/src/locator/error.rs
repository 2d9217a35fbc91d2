//! Error types for locating and staging the bundled binary.

use rhugo_core::{MachineDescriptor, PathError, PlatformError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving the executable for this machine.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The platform or architecture has no entry in the lookup tables.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Both tokens are known but no binary was bundled for the pair.
    #[error("Unsupported platform + architecture combination for {machine} (no bundled binary at {path})")]
    UnsupportedCombination {
        machine: MachineDescriptor,
        path: PathBuf,
    },

    /// The bundled binary could not be copied to the staging directory.
    #[error("Could not copy Hugo binary to {path}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The staging directory could not be created or written.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl LocatorError {
    /// Whether this error means the host simply has no bundled variant.
    pub const fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::Platform(_) | Self::UnsupportedCombination { .. }
        )
    }
}

/// Result type alias for locator operations.
pub type LocatorResult<T> = Result<T, LocatorError>;
