//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that call the `Hugo` facade and format terminal output
//! - No process or staging logic of their own

pub mod build;
pub mod command;
pub mod paths;
pub mod serve;
pub mod version;
