//! Version command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print the bundled Hugo version.
///
/// With `binary`, the staged executable is asked instead and a mismatch with
/// the configured version is reported as an error.
pub async fn execute(ctx: &CliContext, binary: bool) -> Result<(), CliError> {
    let configured = ctx.hugo().version();

    if !binary {
        println!("{configured}");
        return Ok(());
    }

    match ctx.hugo().binary_version().await? {
        Some(reported) if reported == configured => {
            println!("{reported}");
            Ok(())
        }
        Some(reported) => Err(CliError::Config(format!(
            "binary reports v{reported} but v{configured} is configured"
        ))),
        None => Err(CliError::Process(
            "could not read a version from the Hugo binary".to_string(),
        )),
    }
}
