//! CLI-specific error types and exit-code mapping.

use rhugo_core::{ConfigError, PlatformError};
use rhugo_runtime::{CommandError, LocatorError, ServerStartupError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// No bundled binary for this machine.
    #[error("{0}")]
    Unsupported(String),

    /// IO error (staging copy, permissions, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A one-shot Hugo command failed.
    #[error("{message}")]
    Command {
        message: String,
        stderr: Option<String>,
    },

    /// The server process could not be started or exited unexpectedly.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error (Hugo reported a failure)
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Command { .. } => 1,
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Unsupported(_) => 69, // EX_UNAVAILABLE
            Self::Process(_) => 71,     // EX_OSERR
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<PlatformError> for CliError {
    fn from(err: PlatformError) -> Self {
        Self::Unsupported(err.to_string())
    }
}

impl From<LocatorError> for CliError {
    fn from(err: LocatorError) -> Self {
        if err.is_unsupported() {
            Self::Unsupported(err.to_string())
        } else {
            Self::Io(err.to_string())
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Spawn { .. } => Self::Process(err.to_string()),
            CommandError::Stderr { .. } | CommandError::Exit { .. } => Self::Command {
                message: err.message(),
                stderr: err.captured_stderr().map(str::to_string),
            },
        }
    }
}

impl From<ServerStartupError> for CliError {
    fn from(err: ServerStartupError) -> Self {
        Self::Process(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error surfaced from `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
