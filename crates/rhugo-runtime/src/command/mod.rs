//! One-shot command runner.
//!
//! Runs the external binary to completion and returns its standard output.
//! Any byte on the error stream fails the command regardless of exit code:
//! Hugo writes warnings and errors alike to stderr, and callers depend on
//! that coarse rule.

mod request;

pub use request::{ExecutionRequest, HugoCommandBuilder};

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from a one-shot invocation.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The process wrote to its error stream.
    #[error("{message}: {stderr}")]
    Stderr {
        message: String,
        stderr: String,
        stdout: String,
        status: ExitStatus,
    },

    /// The process exited unsuccessfully without writing to stderr.
    #[error("{message}: process exited with {status}")]
    Exit {
        message: String,
        stdout: String,
        status: ExitStatus,
    },
}

impl CommandError {
    /// Human-readable summary of the failure.
    pub fn message(&self) -> String {
        match self {
            Self::Spawn { program, .. } => format!("Failed to run {}", program.display()),
            Self::Stderr { message, .. } | Self::Exit { message, .. } => message.clone(),
        }
    }

    /// Raw text the process wrote to stderr, if any.
    pub fn captured_stderr(&self) -> Option<&str> {
        match self {
            Self::Stderr { stderr, .. } => Some(stderr),
            Self::Spawn { .. } | Self::Exit { .. } => None,
        }
    }
}

/// Result type alias for command operations.
pub type CommandResult<T> = Result<T, CommandError>;

/// Run `request` to completion and return its stdout verbatim.
pub async fn run(request: &ExecutionRequest) -> CommandResult<String> {
    debug!(
        program = %request.executable().display(),
        args = %request.display_args(),
        "Running command"
    );

    let output = request
        .to_command()
        .output()
        .await
        .map_err(|source| CommandError::Spawn {
            program: request.executable().to_path_buf(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.stderr.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        warn!(status = %output.status, "Command wrote to stderr");
        return Err(CommandError::Stderr {
            message: request.failure_message().to_string(),
            stderr,
            stdout,
            status: output.status,
        });
    }

    if !output.status.success() {
        return Err(CommandError::Exit {
            message: request.failure_message().to_string(),
            stdout,
            status: output.status,
        });
    }

    Ok(stdout)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> ExecutionRequest {
        HugoCommandBuilder::new("/bin/sh")
            .args(["-c", script])
            .build()
    }

    #[tokio::test]
    async fn returns_stdout_verbatim() {
        let stdout = run(&sh("printf 'line one\\nline two\\n'")).await.unwrap();
        assert_eq!(stdout, "line one\nline two\n");
    }

    #[tokio::test]
    async fn stderr_fails_even_on_success_exit() {
        let err = run(&sh("echo out; echo 'WARN something' >&2; exit 0"))
            .await
            .unwrap_err();

        match err {
            CommandError::Stderr {
                ref stderr,
                ref stdout,
                status,
                ..
            } => {
                assert_eq!(stderr, "WARN something\n");
                assert_eq!(stdout, "out\n");
                assert!(status.success());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.message(), "Command failed");
        assert_eq!(err.captured_stderr(), Some("WARN something\n"));
    }

    #[tokio::test]
    async fn silent_non_zero_exit_fails() {
        let err = run(&sh("exit 3")).await.unwrap_err();
        assert!(matches!(err, CommandError::Exit { status, .. } if status.code() == Some(3)));
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let request = HugoCommandBuilder::new("/nonexistent/hugo").build();
        let err = run(&request).await.unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
        assert!(err.captured_stderr().is_none());
    }

    #[tokio::test]
    async fn environment_is_applied() {
        let request = HugoCommandBuilder::new("/bin/sh")
            .args(["-c", "printf '%s' \"$RHUGO_TEST_VALUE\""])
            .env("RHUGO_TEST_VALUE", "from-request")
            .build();
        assert_eq!(run(&request).await.unwrap(), "from-request");
    }
}
