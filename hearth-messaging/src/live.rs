//! Live conversation view.
//!
//! Reacts to every coalesced change signal by re-fetching and re-folding the
//! whole list rather than applying deltas; the latest successful fetch is
//! always the visible state. Each fetch takes a sequence ticket, and a result
//! is discarded when a newer fetch was issued while it was in flight, so an
//! older response can never clobber a newer one even when a manual
//! [`LiveConversations::refresh`] overlaps the signal loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use hearth_core::{AuthContext, Result};

use crate::conversation::Conversation;
use crate::service::MessagingService;

pub struct LiveConversations {
    service: MessagingService,
    auth: AuthContext,
    tx: Arc<watch::Sender<Vec<Conversation>>>,
    rx: watch::Receiver<Vec<Conversation>>,
    seq: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl LiveConversations {
    /// Fetches the initial list (failures propagate; callers show a fallback,
    /// never a partial list) and starts the re-fetch loop on the viewer's
    /// change subscription.
    pub async fn spawn(service: MessagingService, auth: AuthContext) -> Result<Self> {
        let mut subscription = service.subscribe_to_changes(&auth)?;
        let initial = service.list_conversations(&auth).await?;

        let (tx, rx) = watch::channel(initial);
        let tx = Arc::new(tx);
        let seq = Arc::new(AtomicU64::new(0));

        let task = {
            let service = service.clone();
            let auth = auth.clone();
            let tx = tx.clone();
            let seq = seq.clone();
            tokio::spawn(async move {
                while subscription.changed().await.is_some() {
                    guarded_refetch(&service, &auth, &tx, &seq).await;
                }
            })
        };

        Ok(Self {
            service,
            auth,
            tx,
            rx,
            seq,
            task,
        })
    }

    /// A receiver observing every published list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Conversation>> {
        self.rx.clone()
    }

    /// The most recently published list.
    pub fn current(&self) -> Vec<Conversation> {
        self.rx.borrow().clone()
    }

    /// Manual re-fetch, e.g. pull-to-refresh. May overlap the signal loop;
    /// the sequence guard keeps the newest fetch authoritative.
    pub async fn refresh(&self) {
        guarded_refetch(&self.service, &self.auth, &self.tx, &self.seq).await;
    }
}

impl Drop for LiveConversations {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn guarded_refetch(
    service: &MessagingService,
    auth: &AuthContext,
    tx: &watch::Sender<Vec<Conversation>>,
    seq: &AtomicU64,
) {
    let ticket = seq.fetch_add(1, Ordering::SeqCst) + 1;

    match service.list_conversations(auth).await {
        Ok(conversations) => {
            // A newer fetch was issued while this one was in flight; its
            // result supersedes this one.
            if seq.load(Ordering::SeqCst) == ticket {
                tx.send_replace(conversations);
            }
        }
        Err(e) => {
            // Keep the last good list; the next signal retries in full.
            warn!(error = %e, "live conversation refresh failed");
        }
    }
}
