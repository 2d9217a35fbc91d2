//! Server startup errors.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use super::session::ServerProcess;

/// Errors from starting a server session.
///
/// Failures after a successful spawn carry the process, which is still
/// running: the caller decides whether to terminate it.
#[derive(Debug, Error)]
pub enum ServerStartupError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Server wrote to stderr before becoming ready: {stderr}")]
    StderrBeforeReady {
        stderr: String,
        process: Box<ServerProcess>,
    },

    #[error("Server not ready after {timeout:?}")]
    TimedOut {
        timeout: Duration,
        output: String,
        process: Box<ServerProcess>,
    },
}

impl ServerStartupError {
    /// Raw stderr text that failed the startup, if that was the cause.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::StderrBeforeReady { stderr, .. } => Some(stderr),
            Self::Spawn { .. } | Self::TimedOut { .. } => None,
        }
    }

    /// Take the still-running process out of the error.
    pub fn into_process(self) -> Option<ServerProcess> {
        match self {
            Self::StderrBeforeReady { process, .. } | Self::TimedOut { process, .. } => {
                Some(*process)
            }
            Self::Spawn { .. } => None,
        }
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerStartupError>;
