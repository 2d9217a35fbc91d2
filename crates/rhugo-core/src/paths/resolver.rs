//! Resolved path snapshot for CLI introspection.

use std::path::PathBuf;

use crate::binary::binary_file_name;
use crate::config::HugoConfig;
use crate::machine::MachineDescriptor;

/// All paths involved in locating the binary, captured in one struct.
///
/// Backs the `rhugo paths` command. Computing it performs no I/O, so it is
/// available even when the bundled binary is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Directory staged binaries are copied into
    pub staging_dir: PathBuf,
    /// Directory holding bundled binaries
    pub bundle_dir: PathBuf,
    /// Bundled binary for this machine
    pub bundled_binary: PathBuf,
    /// Staged copy of the bundled binary
    pub staged_binary: PathBuf,
    /// Machine lookup key
    pub machine: MachineDescriptor,
    /// Bundled version tag
    pub version: String,
}

impl ResolvedPaths {
    /// Resolve every path for `machine` under `config`.
    pub fn resolve(config: &HugoConfig, machine: MachineDescriptor) -> Self {
        let name = binary_file_name(&config.version, &machine);
        Self {
            staging_dir: config.staging_dir.clone(),
            bundle_dir: config.bundle_dir.clone(),
            bundled_binary: config.bundle_dir.join(&name),
            staged_binary: config.staging_dir.join(&name),
            machine,
            version: config.version.clone(),
        }
    }
}

impl std::fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "staging_dir = {}", self.staging_dir.display())?;
        writeln!(f, "bundle_dir = {}", self.bundle_dir.display())?;
        writeln!(f, "bundled_binary = {}", self.bundled_binary.display())?;
        writeln!(f, "staged_binary = {}", self.staged_binary.display())?;
        writeln!(f, "machine = {}", self.machine)?;
        write!(f, "version = {}", self.version)
    }
}
