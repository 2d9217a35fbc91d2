//! CLI bootstrap - the composition root.
//!
//! Configuration is read from the environment once, here, and the staged
//! binary is resolved before any handler runs. Handlers receive the composed
//! [`CliContext`] and never touch the environment themselves.

use rhugo_core::HugoConfig;
use rhugo_runtime::Hugo;
use tracing::debug;

use crate::error::CliError;

/// Fully composed context for commands that run Hugo.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Facade over the staged binary.
    pub hugo: Hugo,
}

impl CliContext {
    pub const fn hugo(&self) -> &Hugo {
        &self.hugo
    }
}

/// Stage the binary for this machine and compose the context.
pub fn bootstrap(config: HugoConfig) -> Result<CliContext, CliError> {
    debug!(
        staging_dir = %config.staging_dir.display(),
        bundle_dir = %config.bundle_dir.display(),
        version = %config.version,
        "Bootstrapping CLI context"
    );
    let hugo = Hugo::new(config)?;
    debug!(binary = %hugo.binary().executable().display(), "Hugo binary ready");
    Ok(CliContext { hugo })
}
