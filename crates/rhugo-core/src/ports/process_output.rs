//! Process output port.
//!
//! A subprocess's stdout and stderr are delivered as raw chunks to any number
//! of subscribers. Subscribing and unsubscribing are explicit calls so the
//! startup coordinator can detach itself the moment the server is ready.
//!
//! Chunks from both streams share one channel per subscriber, so each
//! subscriber observes a single total order of stdout and stderr events.
//! That order is whatever the publisher produced; there is no attempt to
//! reconcile pipe buffering between the two streams.

use std::borrow::Cow;
use tokio::sync::mpsc;

/// Which standard stream a chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl OutputStream {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// One read's worth of bytes from a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    pub stream: OutputStream,
    pub data: Vec<u8>,
}

impl OutputChunk {
    pub fn stdout(data: impl Into<Vec<u8>>) -> Self {
        Self {
            stream: OutputStream::Stdout,
            data: data.into(),
        }
    }

    pub fn stderr(data: impl Into<Vec<u8>>) -> Self {
        Self {
            stream: OutputStream::Stderr,
            data: data.into(),
        }
    }

    /// Decode the chunk as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

/// Identifier handed out by [`ProcessOutput::subscribe`].
pub type SubscriptionId = u64;

/// Receiving end of a subscription.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: mpsc::UnboundedReceiver<OutputChunk>,
}

impl Subscription {
    pub const fn new(id: SubscriptionId, receiver: mpsc::UnboundedReceiver<OutputChunk>) -> Self {
        Self { id, receiver }
    }

    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Wait for the next chunk. Returns `None` once the source has been
    /// dropped or this subscription was removed.
    pub async fn recv(&mut self) -> Option<OutputChunk> {
        self.receiver.recv().await
    }

    /// Take a chunk if one is already queued.
    pub fn try_recv(&mut self) -> Option<OutputChunk> {
        self.receiver.try_recv().ok()
    }
}

/// Source of a subprocess's output events.
pub trait ProcessOutput: Send + Sync {
    /// Attach a new listener. Only chunks published after this call are seen.
    fn subscribe(&self) -> Subscription;

    /// Detach a listener. Returns `false` if it was not attached.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Number of currently attached listeners.
    fn subscriber_count(&self) -> usize;
}
