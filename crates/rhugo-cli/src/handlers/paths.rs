//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics. Nothing is staged, so this
//! works on machines without a bundled binary.

use rhugo_core::{HugoConfig, MachineDescriptor, ResolvedPaths};

use crate::error::CliError;

/// Print resolved paths in `key = value` format.
pub fn execute(config: &HugoConfig) -> Result<(), CliError> {
    let machine = MachineDescriptor::current()?;
    let paths = ResolvedPaths::resolve(config, machine);
    println!("{paths}");
    Ok(())
}
