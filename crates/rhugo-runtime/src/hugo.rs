//! High-level facade over the locator, command runner and coordinator.

use regex::Regex;
use rhugo_core::{BinaryDescriptor, HugoConfig, MachineDescriptor};
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::debug;

use crate::command::{self, CommandResult, ExecutionRequest, HugoCommandBuilder};
use crate::locator::{BinaryLocator, LocatorResult};
use crate::server::{ServerResult, ServerSession, start_server};

/// Default source directory for builds.
pub const DEFAULT_SOURCE: &str = ".";
/// Default destination, relative to the source directory.
pub const DEFAULT_DESTINATION: &str = "public/";
/// Default base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1313";

static VERSION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"v(\d+\.\d+\.\d+)-").ok());

/// Arguments of a one-shot build.
///
/// `destination` is resolved by Hugo relative to `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub base_url: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Arguments of a server session.
///
/// The server always builds drafts, renders to disk, disables live reload
/// and does not append the port to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub base_url: String,
    /// Re-render the whole site on every change.
    pub disable_fast_render: bool,
}

impl ServeOptions {
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            base_url: base_url.into(),
            disable_fast_render: false,
        }
    }
}

/// A staged Hugo binary plus the policy for running it.
#[derive(Debug, Clone)]
pub struct Hugo {
    config: HugoConfig,
    binary: BinaryDescriptor,
}

impl Hugo {
    /// Stage the binary for the current machine.
    pub fn new(config: HugoConfig) -> LocatorResult<Self> {
        let binary = BinaryLocator::new(&config).resolve_current()?;
        Ok(Self { config, binary })
    }

    /// Stage the binary for an explicit machine.
    pub fn for_machine(config: HugoConfig, machine: &MachineDescriptor) -> LocatorResult<Self> {
        let binary = BinaryLocator::new(&config).resolve(machine)?;
        Ok(Self { config, binary })
    }

    /// Use an already staged binary.
    pub const fn with_binary(config: HugoConfig, binary: BinaryDescriptor) -> Self {
        Self { config, binary }
    }

    pub const fn config(&self) -> &HugoConfig {
        &self.config
    }

    pub const fn binary(&self) -> &BinaryDescriptor {
        &self.binary
    }

    /// Version tag of the bundled binary.
    pub fn version(&self) -> &str {
        &self.config.version
    }

    fn builder(&self) -> HugoCommandBuilder {
        HugoCommandBuilder::new(self.binary.executable())
    }

    pub fn build_request(&self, options: &BuildOptions) -> ExecutionRequest {
        self.builder()
            .arg_with_value("--source", &options.source)
            .arg_with_value("--destination", &options.destination)
            .arg_with_value("--baseURL", &options.base_url)
            .failure_message("Build failed")
            .build()
    }

    pub fn serve_request(&self, options: &ServeOptions) -> ExecutionRequest {
        let mut builder = self
            .builder()
            .subcommand("server")
            .arg_with_value("--source", &options.source)
            .arg_with_value("--destination", &options.destination)
            .arg_with_value("--baseURL", &options.base_url)
            .flag("--buildDrafts")
            .flag("--renderToDisk")
            .flag("--disableLiveReload")
            .arg_with_value("--appendPort", "false");
        if options.disable_fast_render {
            builder = builder.flag("--disableFastRender");
        }
        builder.failure_message("Server failed to start").build()
    }

    /// Build a site and return Hugo's stdout.
    pub async fn build(&self, options: &BuildOptions) -> CommandResult<String> {
        command::run(&self.build_request(options)).await
    }

    /// Start a server and resolve once its initial build has finished.
    pub async fn serve(&self, options: &ServeOptions) -> ServerResult<ServerSession> {
        start_server(
            &self.serve_request(options),
            &self.config.readiness_marker,
            self.config.startup_timeout,
        )
        .await
    }

    /// Run an arbitrary subcommand, e.g. `new site my-site`.
    ///
    /// Arguments are split on whitespace; quoting is not interpreted.
    pub async fn command(&self, args: &str) -> CommandResult<String> {
        let request = self.builder().args(args.split_whitespace()).build();
        command::run(&request).await
    }

    /// Ask the binary for its version, e.g. `0.64.0`.
    ///
    /// Returns `None` if the output does not contain a `v<x.y.z>-` tag.
    pub async fn binary_version(&self) -> CommandResult<Option<String>> {
        let output = self.command("version").await?;
        let version = parse_version(&output);
        debug!(?version, "Queried Hugo binary version");
        Ok(version)
    }
}

fn parse_version(output: &str) -> Option<String> {
    VERSION_PATTERN
        .as_ref()?
        .captures(output)
        .map(|caps| caps[1].to_string())
}
