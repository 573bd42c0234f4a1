//! Change-notification fan-out
//!
//! One broadcast channel per store; every mutation publishes a
//! [`ChangeEvent`] and every subscriber holds a [`ChangeFeed`]. The
//! contract is level-triggered: a delivered event means "something
//! changed, re-fetch", never "exactly this changed". Receivers that fall
//! behind collapse the missed events into a single signal.

use shared::message::ChangeEvent;
use tokio::sync::broadcast;

/// Default broadcast capacity; lagging past this only coalesces signals
pub const FEED_CAPACITY: usize = 256;

/// Publishing side of the change feed, owned by a store implementation
#[derive(Debug, Clone)]
pub struct FeedPublisher {
    tx: broadcast::Sender<ChangeEvent>,
}

impl FeedPublisher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Broadcast one change event to all live subscribers.
    ///
    /// A send with no subscribers is not an error; the store does not care
    /// whether anyone is listening.
    pub fn publish(&self, event: ChangeEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("change event dropped: no subscribers");
        }
    }

    /// Open a subscription on the named channel
    pub fn subscribe(&self, channel: &str) -> ChangeFeed {
        tracing::debug!(channel, "change feed subscription opened");
        ChangeFeed {
            channel: channel.to_string(),
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for FeedPublisher {
    fn default() -> Self {
        Self::new(FEED_CAPACITY)
    }
}

/// Consumer handle for change notifications
///
/// Dropping the feed releases the subscription; no further signals are
/// delivered to this consumer.
#[derive(Debug)]
pub struct ChangeFeed {
    channel: String,
    rx: broadcast::Receiver<ChangeEvent>,
}

impl ChangeFeed {
    /// Wait for the next change signal.
    ///
    /// Returns `true` when something changed (including after the receiver
    /// lagged, where the missed events fold into one signal) and `false`
    /// when the publishing store shut down.
    pub async fn changed(&mut self) -> bool {
        match self.rx.recv().await {
            Ok(event) => {
                tracing::trace!(channel = %self.channel, action = %event.action, id = %event.id, "change signal");
                true
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                // Coalesced delivery is within contract
                tracing::debug!(channel = %self.channel, missed, "change feed lagged");
                true
            }
            Err(broadcast::error::RecvError::Closed) => {
                tracing::debug!(channel = %self.channel, "change feed closed");
                false
            }
        }
    }

    /// Channel this feed was opened on
    pub fn channel(&self) -> &str {
        &self.channel
    }
}
