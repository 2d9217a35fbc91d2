//! Binary locator.
//!
//! Resolves the bundled Hugo executable for a machine and stages a runnable
//! copy of it in the per-user staging directory.
//!
//! # Resolution
//!
//! 1. Map platform and architecture to canonical tokens
//! 2. Compose `hugo-v<version>-<platform>-<architecture>[.exe]`
//! 3. Require the bundled file to exist (otherwise the pair is unsupported)
//! 4. Copy it into the staging directory unless a staged copy already exists
//!
//! Nothing is written to disk until step 3 has passed.

mod error;
mod staging;

pub use error::{LocatorError, LocatorResult};
pub use staging::{StageOutcome, stage_binary};

use rhugo_core::{
    BinaryDescriptor, HugoConfig, MachineDescriptor, binary_file_name, ensure_staging_dir,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Locates and stages bundled binaries.
#[derive(Debug, Clone)]
pub struct BinaryLocator {
    bundle_dir: PathBuf,
    staging_dir: PathBuf,
    version: String,
}

impl BinaryLocator {
    /// Create a locator from configuration.
    pub fn new(config: &HugoConfig) -> Self {
        Self {
            bundle_dir: config.bundle_dir.clone(),
            staging_dir: config.staging_dir.clone(),
            version: config.version.clone(),
        }
    }

    /// Directory holding the bundled binaries.
    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    /// Directory receiving staged copies.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Resolve and stage the binary for `machine`.
    pub fn resolve(&self, machine: &MachineDescriptor) -> LocatorResult<BinaryDescriptor> {
        let name = binary_file_name(&self.version, machine);
        let internal_path = self.bundle_dir.join(&name);

        if !internal_path.is_file() {
            return Err(LocatorError::UnsupportedCombination {
                machine: *machine,
                path: internal_path,
            });
        }

        ensure_staging_dir(&self.staging_dir)?;

        let external_path = self.staging_dir.join(&name);
        let outcome = stage_binary(&internal_path, &external_path).map_err(|source| {
            LocatorError::Staging {
                path: external_path.clone(),
                source,
            }
        })?;

        match outcome {
            StageOutcome::Copied => info!(
                path = %external_path.display(),
                %machine,
                "Staged Hugo binary"
            ),
            StageOutcome::AlreadyStaged => debug!(
                path = %external_path.display(),
                "Reusing staged Hugo binary"
            ),
        }

        Ok(BinaryDescriptor::new(
            internal_path,
            external_path,
            self.version.clone(),
        ))
    }

    /// Resolve from raw host names, as reported by the operating system.
    pub fn resolve_host(&self, platform: &str, architecture: &str) -> LocatorResult<BinaryDescriptor> {
        let machine = MachineDescriptor::from_host(platform, architecture)?;
        self.resolve(&machine)
    }

    /// Resolve for the machine this process is running on.
    pub fn resolve_current(&self) -> LocatorResult<BinaryDescriptor> {
        let machine = MachineDescriptor::current()?;
        self.resolve(&machine)
    }
}
