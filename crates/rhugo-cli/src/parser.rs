//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the bundled Hugo static-site generator.
#[derive(Parser, Debug)]
#[command(name = "rhugo")]
#[command(about = "Build and serve Hugo sites with a bundled Hugo binary")]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
