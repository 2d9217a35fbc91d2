//! Server session coordinator.
//!
//! Spawns the server, pumps its pipes into an [`OutputHub`] and holds the
//! caller until the [`ReadinessGate`] reaches a verdict. The coordinator's
//! subscription is dropped on every terminal path, so once a session is
//! handed out nothing here observes the process any more.

use rhugo_core::{OutputStream, ProcessOutput, Subscription};
use std::future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::{ServerResult, ServerStartupError};
use super::gate::{ReadinessGate, StartupState};
use super::session::{ServerProcess, ServerSession};
use crate::command::ExecutionRequest;
use crate::process::{OutputHub, spawn_output_pump};

/// Verdict of a readiness watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Marker seen. Holds the accumulated startup output.
    Ready(String),
    /// Stderr spoke first. Holds its raw text.
    Failed(String),
    /// Neither happened within the limit. Holds the output so far.
    TimedOut { timeout: Duration, output: String },
}

/// Subscribe to `output` and wait for a verdict.
pub async fn await_readiness<O>(output: &O, marker: &str, timeout: Option<Duration>) -> Readiness
where
    O: ProcessOutput + ?Sized,
{
    let subscription = output.subscribe();
    watch_readiness(output, subscription, marker, timeout).await
}

/// Wait for a verdict on an existing subscription, then detach it.
///
/// A source that closes without a verdict leaves the watch pending; only
/// `timeout` ends it then.
pub async fn watch_readiness<O>(
    output: &O,
    mut subscription: Subscription,
    marker: &str,
    timeout: Option<Duration>,
) -> Readiness
where
    O: ProcessOutput + ?Sized,
{
    let mut gate = ReadinessGate::new(marker);

    let watch = async {
        while let Some(chunk) = subscription.recv().await {
            if gate.on_chunk(&chunk).is_terminal() {
                return;
            }
        }
        future::pending::<()>().await;
    };

    match timeout {
        Some(limit) => {
            let _ = tokio::time::timeout(limit, watch).await;
        }
        None => watch.await,
    }

    output.unsubscribe(subscription.id());

    let (state, text) = gate.finish();
    match state {
        StartupState::Ready => Readiness::Ready(text),
        StartupState::Failed(stderr) => Readiness::Failed(stderr),
        StartupState::Launching | StartupState::Accumulating => Readiness::TimedOut {
            timeout: timeout.unwrap_or_default(),
            output: text,
        },
    }
}

/// Spawn `request` and resolve once it reports readiness.
pub async fn start_server(
    request: &ExecutionRequest,
    marker: &str,
    timeout: Option<Duration>,
) -> ServerResult<ServerSession> {
    let mut child = request
        .to_command()
        .spawn()
        .map_err(|source| ServerStartupError::Spawn {
            program: request.executable().to_path_buf(),
            source,
        })?;

    info!(
        pid = ?child.id(),
        args = %request.display_args(),
        "Spawned Hugo server"
    );

    let hub = Arc::new(OutputHub::new());
    // Subscribe before the pumps start so the first chunk is not missed.
    let subscription = hub.subscribe();
    if let Some(stdout) = child.stdout.take() {
        spawn_output_pump(stdout, OutputStream::Stdout, Arc::clone(&hub));
    }
    if let Some(stderr) = child.stderr.take() {
        spawn_output_pump(stderr, OutputStream::Stderr, Arc::clone(&hub));
    }

    let process = ServerProcess::new(child, Arc::clone(&hub));
    let pid = process.pid();

    match watch_readiness(hub.as_ref(), subscription, marker, timeout).await {
        Readiness::Ready(output) => {
            info!(?pid, "Hugo server ready");
            Ok(ServerSession::new(process, output))
        }
        Readiness::Failed(stderr) => {
            warn!(?pid, %stderr, "Hugo server wrote to stderr before readiness");
            Err(ServerStartupError::StderrBeforeReady {
                stderr,
                process: Box::new(process),
            })
        }
        Readiness::TimedOut { timeout, output } => {
            warn!(?pid, ?timeout, "Hugo server startup timed out");
            debug!(%output, "Startup output before timeout");
            Err(ServerStartupError::TimedOut {
                timeout,
                output,
                process: Box::new(process),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhugo_core::{OutputChunk, SubscriptionId};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    /// Output double that replays a fixed script to each new subscriber and
    /// records attach/detach calls.
    struct ScriptedOutput {
        script: Vec<OutputChunk>,
        sender: Mutex<Option<(SubscriptionId, mpsc::UnboundedSender<OutputChunk>)>>,
        subscribes: Mutex<usize>,
        unsubscribes: Mutex<Vec<SubscriptionId>>,
    }

    impl ScriptedOutput {
        fn new(script: Vec<OutputChunk>) -> Self {
            Self {
                script,
                sender: Mutex::new(None),
                subscribes: Mutex::new(0),
                unsubscribes: Mutex::new(Vec::new()),
            }
        }

        /// Send a chunk to the attached subscriber, if any.
        fn emit(&self, chunk: OutputChunk) -> bool {
            self.sender
                .lock()
                .unwrap()
                .as_ref()
                .is_some_and(|(_, tx)| tx.send(chunk).is_ok())
        }
    }

    impl ProcessOutput for ScriptedOutput {
        fn subscribe(&self) -> Subscription {
            let mut count = self.subscribes.lock().unwrap();
            *count += 1;
            let id = *count as SubscriptionId;
            let (tx, rx) = mpsc::unbounded_channel();
            for chunk in &self.script {
                tx.send(chunk.clone()).unwrap();
            }
            *self.sender.lock().unwrap() = Some((id, tx));
            Subscription::new(id, rx)
        }

        fn unsubscribe(&self, id: SubscriptionId) -> bool {
            self.unsubscribes.lock().unwrap().push(id);
            let mut sender = self.sender.lock().unwrap();
            if sender.as_ref().is_some_and(|(current, _)| *current == id) {
                *sender = None;
                true
            } else {
                false
            }
        }

        fn subscriber_count(&self) -> usize {
            usize::from(self.sender.lock().unwrap().is_some())
        }
    }

    #[tokio::test]
    async fn ready_captures_whole_flush_and_detaches() {
        let output = ScriptedOutput::new(vec![
            OutputChunk::stdout("Start building sites\n"),
            OutputChunk::stdout("Built in 5 ms\nWatching for changes\nPress Ctrl+C to stop\n"),
        ]);

        let verdict = await_readiness(&output, "Built in", None).await;

        let Readiness::Ready(text) = verdict else {
            panic!("expected ready, got {verdict:?}");
        };
        assert!(text.contains("Start building sites"));
        assert!(text.contains("Built in 5 ms"));
        assert!(text.contains("Press Ctrl+C to stop"));

        assert_eq!(output.subscriber_count(), 0);
        assert_eq!(*output.unsubscribes.lock().unwrap(), vec![1]);
        assert!(!output.emit(OutputChunk::stdout("Change detected\n")));
    }

    #[tokio::test]
    async fn stderr_first_fails_with_raw_text() {
        let output = ScriptedOutput::new(vec![
            OutputChunk::stdout("Start building sites\n"),
            OutputChunk::stderr("Error: config not found\n"),
            OutputChunk::stdout("Built in 5 ms\n"),
        ]);

        let verdict = await_readiness(&output, "Built in", None).await;

        assert_eq!(
            verdict,
            Readiness::Failed("Error: config not found\n".to_string())
        );
        assert_eq!(output.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn delivery_order_decides_the_race() {
        let ready_first = ScriptedOutput::new(vec![
            OutputChunk::stdout("Built in 5 ms\n"),
            OutputChunk::stderr("WARN something\n"),
        ]);
        assert!(matches!(
            await_readiness(&ready_first, "Built in", None).await,
            Readiness::Ready(_)
        ));

        let stderr_first = ScriptedOutput::new(vec![
            OutputChunk::stderr("WARN something\n"),
            OutputChunk::stdout("Built in 5 ms\n"),
        ]);
        assert!(matches!(
            await_readiness(&stderr_first, "Built in", None).await,
            Readiness::Failed(_)
        ));
    }

    #[tokio::test]
    async fn marker_is_injectable() {
        let output = ScriptedOutput::new(vec![OutputChunk::stdout("Built in 5 ms\nREADY\n")]);

        let verdict = await_readiness(&output, "READY", None).await;

        assert!(matches!(verdict, Readiness::Ready(_)));
    }

    #[tokio::test]
    async fn without_timeout_waits_indefinitely() {
        let output = ScriptedOutput::new(vec![OutputChunk::stdout("Start building sites\n")]);

        let pending = tokio::time::timeout(
            Duration::from_millis(100),
            await_readiness(&output, "Built in", None),
        )
        .await;

        assert!(pending.is_err());
    }

    #[tokio::test]
    async fn timeout_reports_partial_output_and_detaches() {
        let output = ScriptedOutput::new(vec![OutputChunk::stdout("Start building sites\n")]);

        let verdict =
            await_readiness(&output, "Built in", Some(Duration::from_millis(50))).await;

        match verdict {
            Readiness::TimedOut { timeout, output: text } => {
                assert_eq!(timeout, Duration::from_millis(50));
                assert_eq!(text, "\nStart building sites\n");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert_eq!(output.subscriber_count(), 0);
    }
}
