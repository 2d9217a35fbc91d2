//! Fan-out of subprocess output to subscribers.

use rhugo_core::{OutputChunk, ProcessOutput, Subscription, SubscriptionId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::trace;

type Senders = HashMap<SubscriptionId, mpsc::UnboundedSender<OutputChunk>>;

/// In-process implementation of [`ProcessOutput`].
///
/// Stream pumps call [`OutputHub::publish`]; every attached subscriber gets
/// its own copy of each chunk in publish order. With no subscribers attached
/// chunks are dropped.
#[derive(Debug, Default)]
pub struct OutputHub {
    next_id: AtomicU64,
    senders: Mutex<Senders>,
}

impl OutputHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn senders(&self) -> MutexGuard<'_, Senders> {
        self.senders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver `chunk` to every subscriber, returning how many received it.
    ///
    /// Subscribers whose receiving end has been dropped are detached.
    pub fn publish(&self, chunk: OutputChunk) -> usize {
        let mut senders = self.senders();
        senders.retain(|_, tx| !tx.is_closed());

        let mut delivered = 0;
        for tx in senders.values() {
            if tx.send(chunk.clone()).is_ok() {
                delivered += 1;
            }
        }
        trace!(
            stream = chunk.stream.as_str(),
            bytes = chunk.data.len(),
            delivered,
            "Published output chunk"
        );
        delivered
    }
}

impl ProcessOutput for OutputHub {
    fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders().insert(id, tx);
        Subscription::new(id, rx)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.senders().remove(&id).is_some()
    }

    fn subscriber_count(&self) -> usize {
        let mut senders = self.senders();
        senders.retain(|_, tx| !tx.is_closed());
        senders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn each_subscriber_gets_every_chunk() {
        let hub = OutputHub::new();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        assert_eq!(hub.publish(OutputChunk::stdout("x")), 2);

        assert_eq!(a.recv().await, Some(OutputChunk::stdout("x")));
        assert_eq!(b.recv().await, Some(OutputChunk::stdout("x")));
    }

    #[tokio::test]
    async fn unsubscribe_stops_delivery() {
        let hub = OutputHub::new();
        let mut sub = hub.subscribe();

        assert!(hub.unsubscribe(sub.id()));
        assert!(!hub.unsubscribe(sub.id()));
        assert_eq!(hub.publish(OutputChunk::stderr("late")), 0);
        assert_eq!(sub.recv().await, None);
    }

    #[test]
    fn late_subscribers_miss_earlier_chunks() {
        let hub = OutputHub::new();
        hub.publish(OutputChunk::stdout("early"));

        let mut sub = hub.subscribe();
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn dropped_subscriptions_are_pruned() {
        let hub = OutputHub::new();
        let sub = hub.subscribe();
        let _kept = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 2);

        drop(sub);
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn interleaved_streams_keep_publish_order() {
        let hub = OutputHub::new();
        let mut sub = hub.subscribe();

        hub.publish(OutputChunk::stdout("1"));
        hub.publish(OutputChunk::stderr("2"));
        hub.publish(OutputChunk::stdout("3"));

        let order: Vec<_> = [sub.recv().await, sub.recv().await, sub.recv().await]
            .into_iter()
            .flatten()
            .map(|c| c.text().into_owned())
            .collect();
        assert_eq!(order, ["1", "2", "3"]);
    }
}
