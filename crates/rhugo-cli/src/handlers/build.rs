//! Build command handler.

use rhugo_core::BuildStats;
use rhugo_runtime::BuildOptions;
use std::path::PathBuf;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Arguments for the build command.
#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub base_url: String,
    pub json: bool,
}

/// Execute the build command.
///
/// Prints Hugo's console output, or with `--json` the parsed statistics.
pub async fn execute(ctx: &CliContext, args: BuildArgs) -> Result<(), CliError> {
    println!(
        "[Hugo] Build. Source: {} Destination: {}",
        args.source.display(),
        args.destination.display()
    );

    let options = BuildOptions {
        source: args.source,
        destination: args.destination,
        base_url: args.base_url,
    };
    let output = ctx.hugo().build(&options).await?;

    if args.json {
        let stats = BuildStats::parse(&output).unwrap_or_default();
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| CliError::Io(format!("Failed to serialize statistics: {e}")))?;
        println!("{json}");
    } else {
        print!("{output}");
    }

    Ok(())
}
