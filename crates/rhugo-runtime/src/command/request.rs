//! Execution requests and the Hugo argument builder.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// One invocation of the external binary.
///
/// Immutable once built. The child inherits the parent's environment with
/// `env` applied on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    executable: PathBuf,
    args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
    current_dir: Option<PathBuf>,
    failure_message: String,
}

impl ExecutionRequest {
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn env(&self) -> &[(OsString, OsString)] {
        &self.env
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Human message used when the invocation fails.
    pub fn failure_message(&self) -> &str {
        &self.failure_message
    }

    /// Arguments rendered for logging.
    pub fn display_args(&self) -> String {
        self.args
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build a tokio command with piped stdout/stderr and no stdin.
    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Builder for Hugo invocations.
///
/// Value flags are rendered in Hugo's `--name=value` form; arguments keep
/// the order they were added in, after the optional subcommand.
///
/// # Example
///
/// ```rust,ignore
/// let request = HugoCommandBuilder::new(hugo_path)
///     .subcommand("server")
///     .arg_with_value("--source", "site")
///     .flag("--buildDrafts")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct HugoCommandBuilder {
    executable: PathBuf,
    subcommand: Option<String>,
    args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
    current_dir: Option<PathBuf>,
    failure_message: String,
}

impl HugoCommandBuilder {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            subcommand: None,
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
            failure_message: "Command failed".to_string(),
        }
    }

    /// Set the leading subcommand token (e.g. `server`).
    pub fn subcommand(mut self, name: impl Into<String>) -> Self {
        self.subcommand = Some(name.into());
        self
    }

    /// Add a `--name=value` flag.
    pub fn arg_with_value(mut self, name: &str, value: impl AsRef<OsStr>) -> Self {
        let mut arg = OsString::from(name);
        arg.push("=");
        arg.push(value.as_ref());
        self.args.push(arg);
        self
    }

    /// Add a boolean flag.
    pub fn flag(mut self, name: &str) -> Self {
        self.args.push(OsString::from(name));
        self
    }

    /// Add raw arguments verbatim.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Set an environment variable for the child.
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.env
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    /// Run the child in `dir` instead of the parent's working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Message reported when the invocation fails.
    pub fn failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = message.into();
        self
    }

    pub fn build(self) -> ExecutionRequest {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        if let Some(sub) = self.subcommand {
            args.push(OsString::from(sub));
        }
        args.extend(self.args);

        ExecutionRequest {
            executable: self.executable,
            args,
            env: self.env,
            current_dir: self.current_dir,
            failure_message: self.failure_message,
        }
    }
}
