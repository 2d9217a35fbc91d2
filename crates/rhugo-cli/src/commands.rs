//! Subcommands of the `rhugo` binary.

use clap::Subcommand;
use std::path::PathBuf;

use rhugo_runtime::DEFAULT_BASE_URL;

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a site once
    Build {
        /// Site source directory
        source: PathBuf,
        /// Output directory, relative to the source directory
        destination: PathBuf,
        /// Base URL of the generated site
        #[arg(long = "base-url", default_value = DEFAULT_BASE_URL)]
        base_url: String,
        /// Print build statistics as JSON instead of Hugo's output
        #[arg(long)]
        json: bool,
    },

    /// Start a development server and keep it running until Ctrl+C
    Serve {
        /// Site source directory
        source: PathBuf,
        /// Output directory, relative to the source directory
        destination: PathBuf,
        /// Base URL of the served site
        base_url: String,
        /// Re-render the whole site on every change
        #[arg(long)]
        disable_fast_render: bool,
    },

    /// Run any Hugo subcommand, e.g. `rhugo command new site my-site`
    Command {
        /// Arguments passed to Hugo
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show the bundled Hugo version
    Version {
        /// Ask the binary itself instead of reading configuration
        #[arg(long)]
        binary: bool,
    },

    /// Show resolved staging and bundle paths
    Paths,
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use crate::commands::Commands;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_build_defaults_base_url() {
        let cli = Cli::parse_from(["rhugo", "build", "test/site", "../public"]);
        match cli.command {
            Commands::Build {
                source,
                destination,
                base_url,
                json,
            } => {
                assert_eq!(source, PathBuf::from("test/site"));
                assert_eq!(destination, PathBuf::from("../public"));
                assert_eq!(base_url, "http://localhost:1313");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_serve_takes_three_positionals() {
        let cli = Cli::parse_from([
            "rhugo",
            "serve",
            "site",
            "../public",
            "https://localhost",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Serve { ref base_url, disable_fast_render: false, .. } if base_url == "https://localhost"
        ));
    }

    #[test]
    fn test_command_keeps_hyphenated_args() {
        let cli = Cli::parse_from(["rhugo", "command", "new", "site", "x", "--force"]);
        match cli.command {
            Commands::Command { args } => assert_eq!(args, ["new", "site", "x", "--force"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
