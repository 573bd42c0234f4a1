//! Customer Display
//!
//! Recently completed orders, most recent first, capped at 20. Three
//! independent triggers feed one idempotent refresh: mount, every change
//! notification, and a fixed timer (the notification stream is
//! best-effort, so the timer is the safety net; no clever deduplication,
//! both stay). Overlapping refreshes are safe: the snapshot is replaced
//! atomically, last write wins.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use shared::models::Order;
use tokio_util::sync::CancellationToken;

use super::{ViewState, ORDERS_CHANNEL};
use crate::store::repository::RECENTLY_READY_LIMIT;
use crate::store::OrderRepository;

/// Ready-orders screen
pub struct CustomerDisplay {
    repo: OrderRepository,
    snapshot: RwLock<ViewState<Vec<Order>>>,
    refresh_interval: Duration,
    cancel: CancellationToken,
}

impl CustomerDisplay {
    pub fn new(repo: OrderRepository, refresh_interval: Duration) -> Self {
        Self {
            repo,
            snapshot: RwLock::new(ViewState::Loading),
            refresh_interval,
            cancel: CancellationToken::new(),
        }
    }

    /// Subscribe, fetch, and start the periodic refresh timer
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
            tracing::debug!("customer display listener stopped");
        });

        let view = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(view.refresh_interval);
            // The immediate first tick duplicates the mount fetch; skip it
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = view.cancel.cancelled() => break,
                    _ = interval.tick() => view.refresh().await,
                }
            }
            tracing::debug!("customer display timer stopped");
        });
    }

    /// Cancel the timer, release the subscription, discard in-flight
    /// fetches
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

    async fn refresh(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        match self.repo.list_recently_ready(RECENTLY_READY_LIMIT).await {
            Ok(orders) => {
                if self.cancel.is_cancelled() {
                    return;
                }
                let mut snapshot = self.snapshot.write().expect("snapshot lock poisoned");
                *snapshot = ViewState::Ready(orders);
            }
            Err(e) => {
                tracing::warn!("ready re-fetch failed, keeping last snapshot: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, OrderStore};
    use shared::models::{OrderDraft, OrderStatus};

    fn draft(numero: i64) -> OrderDraft {
        OrderDraft {
            numero,
            nombre: "Ana".to_string(),
            detalles: "2 tacos".to_string(),
        }
    }

    async fn wait_until(mut cond: impl FnMut() -> bool) {
        for _ in 0..200 {
            if cond() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached within 1s");
    }

    fn mounted_display(store: &Arc<MemoryStore>, interval: Duration) -> Arc<CustomerDisplay> {
        let repo = OrderRepository::new(store.clone() as Arc<dyn OrderStore>);
        let display = Arc::new(CustomerDisplay::new(repo, interval));
        display.mount();
        display
    }

    #[tokio::test]
    async fn starts_empty_and_ready() {
        let store = Arc::new(MemoryStore::new());
        let display = mounted_display(&store, Duration::from_secs(30));
        wait_until(|| matches!(display.snapshot(), ViewState::Ready(ref v) if v.is_empty())).await;
    }

    #[tokio::test]
    async fn marked_orders_appear_via_notification() {
        let store = Arc::new(MemoryStore::new());
        let display = mounted_display(&store, Duration::from_secs(30));
        wait_until(|| !display.snapshot().is_loading()).await;

        let order = store.insert(draft(7)).await.unwrap();
        store
            .update_estado(&order.id, OrderStatus::Listo)
            .await
            .unwrap();

        wait_until(|| matches!(display.snapshot(), ViewState::Ready(ref v) if v.len() == 1)).await;
        if let ViewState::Ready(orders) = display.snapshot() {
            assert_eq!(orders[0].numero, 7);
            assert!(orders[0].is_ready());
        }
    }

    #[tokio::test]
    async fn timer_refreshes_when_notifications_are_dropped() {
        let store = Arc::new(MemoryStore::new());
        store.set_feed_muted(true);
        let display = mounted_display(&store, Duration::from_millis(30));
        wait_until(|| !display.snapshot().is_loading()).await;

        let order = store.insert(draft(1)).await.unwrap();
        store
            .update_estado(&order.id, OrderStatus::Listo)
            .await
            .unwrap();

        // No notification will arrive; only the poll tick can observe it
        wait_until(|| matches!(display.snapshot(), ViewState::Ready(ref v) if v.len() == 1)).await;
    }

    #[tokio::test]
    async fn pending_orders_never_show() {
        let store = Arc::new(MemoryStore::new());
        let display = mounted_display(&store, Duration::from_secs(30));
        wait_until(|| !display.snapshot().is_loading()).await;

        store.insert(draft(1)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(matches!(display.snapshot(), ViewState::Ready(ref v) if v.is_empty()));
    }

    #[tokio::test]
    async fn unmount_cancels_timer_and_listener() {
        let store = Arc::new(MemoryStore::new());
        let display = mounted_display(&store, Duration::from_millis(20));
        wait_until(|| !display.snapshot().is_loading()).await;

        display.unmount();
        let order = store.insert(draft(1)).await.unwrap();
        store
            .update_estado(&order.id, OrderStatus::Listo)
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(matches!(display.snapshot(), ViewState::Ready(ref v) if v.is_empty()));
    }
}
