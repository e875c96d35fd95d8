//! Coalescing change-feed subscriptions.
//!
//! A subscription delivers an empty signal, not a payload: the cue to re-run
//! the relevant fetch in full. The signal channel has capacity one, so a
//! burst of feed events while a signal is already pending collapses into a
//! single re-fetch.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::warn;

use hearth_store::{ChangeFeed, SubscriptionFilter};

/// A live listener on the change feed. Dropping it (or calling
/// [`ChangeSubscription::unsubscribe`]) tears the listener down; no signal is
/// delivered after disposal.
pub struct ChangeSubscription {
    signal_rx: mpsc::Receiver<()>,
    task: JoinHandle<()>,
}

/// Registers a listener for feed events matching `filter`.
pub fn subscribe_to_changes(feed: &ChangeFeed, filter: SubscriptionFilter) -> ChangeSubscription {
    let mut events = feed.subscribe();
    let (signal_tx, signal_rx) = mpsc::channel(1);

    let task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(change) => {
                    if filter.matches(&change) {
                        // Full on the channel means a re-fetch is already due.
                        let _ = signal_tx.try_send(());
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // A full re-fetch heals whatever was missed.
                    warn!(skipped, "change feed lagged behind, cueing re-fetch");
                    let _ = signal_tx.try_send(());
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    ChangeSubscription { signal_rx, task }
}

impl ChangeSubscription {
    /// Waits for the next coalesced signal. Returns `None` once the feed is
    /// gone and every pending signal has been drained.
    pub async fn changed(&mut self) -> Option<()> {
        self.signal_rx.recv().await
    }

    /// Non-blocking check for a pending signal.
    pub fn try_changed(&mut self) -> bool {
        self.signal_rx.try_recv().is_ok()
    }

    /// Explicit teardown; equivalent to dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
