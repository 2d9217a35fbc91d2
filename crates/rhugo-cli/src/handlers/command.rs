//! Passthrough command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Run `hugo <args...>` and print its stdout verbatim.
pub async fn execute(ctx: &CliContext, args: &[String]) -> Result<(), CliError> {
    if args.iter().all(|a| a.trim().is_empty()) {
        return Err(CliError::Arguments("no Hugo arguments given".to_string()));
    }

    let output = ctx.hugo().command(&args.join(" ")).await?;
    print!("{output}");
    Ok(())
}
