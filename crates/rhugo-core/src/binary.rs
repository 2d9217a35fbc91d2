//! Bundled binary naming and descriptors.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::machine::MachineDescriptor;

/// Base name shared by every bundled binary.
pub const BINARY_BASE_NAME: &str = "hugo";

/// File name of the bundled binary for a version and machine.
///
/// Follows the `<name>-v<version>-<platform>-<architecture>[.exe]` convention
/// used when binaries are added to the bundle directory.
pub fn binary_file_name(version: &str, machine: &MachineDescriptor) -> String {
    format!(
        "{BINARY_BASE_NAME}-v{version}-{}-{}{}",
        machine.platform,
        machine.architecture,
        machine.platform.exe_suffix()
    )
}

/// Identifies a staged executable.
///
/// `internal_path` points into the read-only bundle; `external_path` is the
/// staged copy that is guaranteed to exist and be executable once the
/// locator has returned this descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryDescriptor {
    pub internal_path: PathBuf,
    pub external_path: PathBuf,
    pub version: String,
}

impl BinaryDescriptor {
    /// Create a new descriptor.
    pub fn new(
        internal_path: impl Into<PathBuf>,
        external_path: impl Into<PathBuf>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            internal_path: internal_path.into(),
            external_path: external_path.into(),
            version: version.into(),
        }
    }

    /// Path of the executable to invoke.
    pub fn executable(&self) -> &Path {
        &self.external_path
    }
}
