//! CLI entry point - the composition root.
//!
//! Parses arguments, installs logging and loads `.env`, then dispatches to
//! handlers. Errors are printed once here and mapped to an exit code.

use clap::Parser;
use rhugo_cli::error::exit_code_for;
use rhugo_cli::handlers::build::BuildArgs;
use rhugo_cli::handlers::serve::ServeArgs;
use rhugo_cli::{Cli, Commands, bootstrap, handlers};
use rhugo_core::HugoConfig;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = HugoConfig::from_env().map_err(rhugo_cli::CliError::from)?;

    // Paths never stages the binary
    if matches!(cli.command, Commands::Paths) {
        handlers::paths::execute(&config)?;
        return Ok(());
    }

    let ctx = bootstrap(config)?;

    match cli.command {
        Commands::Build {
            source,
            destination,
            base_url,
            json,
        } => {
            let args = BuildArgs {
                source,
                destination,
                base_url,
                json,
            };
            handlers::build::execute(&ctx, args).await?;
        }
        Commands::Serve {
            source,
            destination,
            base_url,
            disable_fast_render,
        } => {
            let args = ServeArgs {
                source,
                destination,
                base_url,
                disable_fast_render,
            };
            handlers::serve::execute(&ctx, args).await?;
        }
        Commands::Command { args } => {
            handlers::command::execute(&ctx, &args).await?;
        }
        Commands::Version { binary } => {
            handlers::version::execute(&ctx, binary).await?;
        }
        Commands::Paths => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments; clap prints usage and exits 2 on misuse
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        if let Some(rhugo_cli::CliError::Command {
            stderr: Some(stderr),
            ..
        }) = err.downcast_ref()
        {
            eprint!("{stderr}");
        }
        std::process::exit(exit_code_for(&err));
    }
}
