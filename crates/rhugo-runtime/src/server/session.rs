//! Handles to a running server subprocess.

use rhugo_core::{ProcessOutput, Subscription, SubscriptionId};
use std::io;
use std::process::ExitStatus;
use std::sync::Arc;
use tokio::process::Child;
use tracing::debug;

use crate::process::{OutputHub, shutdown_child};

/// A spawned server subprocess and the hub relaying its output.
///
/// Dropping the handle does not stop the process.
#[derive(Debug)]
pub struct ServerProcess {
    child: Child,
    pid: Option<u32>,
    output: Arc<OutputHub>,
}

impl ServerProcess {
    pub(crate) fn new(child: Child, output: Arc<OutputHub>) -> Self {
        let pid = child.id();
        Self { child, pid, output }
    }

    /// OS process id, captured at spawn time.
    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Attach an observer to the process's stdout and stderr.
    pub fn subscribe(&self) -> Subscription {
        self.output.subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.output.unsubscribe(id)
    }

    /// The output source itself, for callers that manage subscriptions.
    pub fn output(&self) -> Arc<OutputHub> {
        Arc::clone(&self.output)
    }

    /// Check for exit without blocking.
    pub fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    /// Stop the process gracefully and return its exit status.
    pub async fn terminate(mut self) -> io::Result<ExitStatus> {
        debug!(pid = ?self.pid, "Terminating Hugo server");
        shutdown_child(&mut self.child).await
    }

    /// Kill the process immediately and return its exit status.
    pub async fn kill(mut self) -> io::Result<ExitStatus> {
        debug!(pid = ?self.pid, "Killing Hugo server");
        self.child.kill().await?;
        self.child.wait().await
    }

    /// Wait for the process to exit on its own.
    pub async fn wait(mut self) -> io::Result<ExitStatus> {
        self.child.wait().await
    }
}

/// A server that has reached readiness.
///
/// The startup coordinator is detached by the time a session exists; all
/// further interaction with the process goes through this handle.
#[derive(Debug)]
pub struct ServerSession {
    process: ServerProcess,
    startup_output: String,
}

impl ServerSession {
    pub(crate) const fn new(process: ServerProcess, startup_output: String) -> Self {
        Self {
            process,
            startup_output,
        }
    }

    pub const fn pid(&self) -> Option<u32> {
        self.process.pid()
    }

    /// Output observed from spawn up to and including the chunk that
    /// carried the readiness marker.
    pub fn startup_output(&self) -> &str {
        &self.startup_output
    }

    pub fn subscribe(&self) -> Subscription {
        self.process.subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.process.unsubscribe(id)
    }

    pub const fn process(&self) -> &ServerProcess {
        &self.process
    }

    pub const fn process_mut(&mut self) -> &mut ServerProcess {
        &mut self.process
    }

    pub fn into_parts(self) -> (ServerProcess, String) {
        (self.process, self.startup_output)
    }

    /// See [`ServerProcess::terminate`].
    pub async fn terminate(self) -> io::Result<ExitStatus> {
        self.process.terminate().await
    }

    /// See [`ServerProcess::kill`].
    pub async fn kill(self) -> io::Result<ExitStatus> {
        self.process.kill().await
    }

    /// See [`ServerProcess::wait`].
    pub async fn wait(self) -> io::Result<ExitStatus> {
        self.process.wait().await
    }
}
