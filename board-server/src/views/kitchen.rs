//! Kitchen View
//!
//! Pending orders, newest first, with the "mark ready" action. The view
//! subscribes to the change feed on mount and re-fetches the whole
//! pending list on every signal; there is no optimistic local update.
//! Marking an order ready triggers an immediate re-fetch so the acting
//! cook sees the result even when the notification is delayed or missed.

use std::sync::{Arc, RwLock};

use shared::models::Order;
use tokio_util::sync::CancellationToken;

use super::{ViewState, ORDERS_CHANNEL};
use crate::store::OrderRepository;
use crate::utils::{AppError, AppResult};

/// Audible new-order alert
///
/// Audio playback belongs to the rendering layer; the view only decides
/// *when* to ring.
pub trait Chime: Send + Sync {
    fn ring(&self);
}

/// Default chime: a log line standing in for the ding
#[derive(Debug, Default)]
pub struct LogChime;

impl Chime for LogChime {
    fn ring(&self) {
        tracing::info!("🔔 nuevo pedido pendiente");
    }
}

/// Pending-orders screen
pub struct KitchenView {
    repo: OrderRepository,
    snapshot: RwLock<ViewState<Vec<Order>>>,
    chime: Arc<dyn Chime>,
    cancel: CancellationToken,
}

impl KitchenView {
    pub fn new(repo: OrderRepository, chime: Arc<dyn Chime>) -> Self {
        Self {
            repo,
            snapshot: RwLock::new(ViewState::Loading),
            chime,
            cancel: CancellationToken::new(),
        }
    }

    /// Subscribe to change notifications and issue the initial fetch.
    /// The listener task lives until [`KitchenView::unmount`].
    pub fn mount(self: &Arc<Self>) {
        let view = Arc::clone(self);
        let mut feed = self.repo.subscribe(ORDERS_CHANNEL);
        tokio::spawn(async move {
            view.refresh().await;
            loop {
                tokio::select! {
                    _ = view.cancel.cancelled() => break,
                    changed = feed.changed() => {
                        if !changed {
                            break;
                        }
                        view.refresh().await;
                    }
                }
            }
            tracing::debug!("kitchen view unmounted");
        });
    }

    /// Tear down: release the subscription and discard any in-flight
    /// fetch result. The snapshot never mutates after this returns.
    pub fn unmount(&self) {
        self.cancel.cancel();
    }

    /// Latest-known snapshot
    pub fn snapshot(&self) -> ViewState<Vec<Order>> {
        self.snapshot
            .read()
            .expect("snapshot lock poisoned")
            .clone()
    }

    /// Mark one order listo, then re-fetch immediately
    pub async fn mark_ready(&self, id: &str) -> AppResult<Order> {
        let order = self.repo.mark_ready(id).await.map_err(AppError::from)?;
        self.refresh().await;
        Ok(order)
    }

    /// Re-fetch the pending list and replace the snapshot.
    ///
    /// Chime policy: ring once when the fetched list is strictly larger
    /// than the previously rendered one. Count-based, so coalesced
    /// changes can mis-fire or under-fire; that imprecision is accepted.
    /// A failed fetch keeps the previous snapshot visible.
    async fn refresh(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        match self.repo.list_pending().await {
            Ok(orders) => {
                // A fetch that resolves after unmount must not land
                if self.cancel.is_cancelled() {
                    return;
                }
                let mut snapshot = self.snapshot.write().expect("snapshot lock poisoned");
                if let ViewState::Ready(previous) = &*snapshot
                    && orders.len() > previous.len()
                {
                    self.chime.ring();
                }
                *snapshot = ViewState::Ready(orders);
            }
            Err(e) => {
                tracing::warn!("pending re-fetch failed, keeping last snapshot: {e}");
            }
        }
    }
}
