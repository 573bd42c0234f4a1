//! In-process Order Store
//!
//! Same contract as the remote store, backed by a `Vec` behind a mutex.
//! Used for tests and demos (the store is an injected dependency, so any
//! view or repository runs unmodified against it).
//!
//! Two switches make failure modes reproducible:
//! - [`MemoryStore::set_feed_muted`] drops change notifications, simulating
//!   the real feed's missed/coalesced delivery
//! - [`MemoryStore::set_fail_writes`] rejects mutations with a persistence
//!   error, simulating a store outage mid-write

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use shared::message::{ChangeAction, ChangeEvent};
use shared::models::{Order, OrderDraft, OrderStatus};
use uuid::Uuid;

use super::feed::{ChangeFeed, FeedPublisher};
use super::{OrderColumn, OrderQuery, OrderStore, StoreError, StoreResult};

/// In-memory fake of the hosted store
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Order>>,
    feed: FeedPublisher,
    /// Strictly increasing clock so updated_at ordering is total even when
    /// two mutations land within the OS timer resolution
    clock: Mutex<DateTime<Utc>>,
    feed_muted: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress change notifications (simulates dropped signals)
    pub fn set_feed_muted(&self, muted: bool) {
        self.feed_muted.store(muted, Ordering::SeqCst);
    }

    /// Reject every mutation with a persistence error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of rows currently in the table (test helper)
    pub fn len(&self) -> usize {
        self.rows.lock().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn tick(&self) -> DateTime<Utc> {
        let mut clock = self.clock.lock().expect("clock lock poisoned");
        let now = Utc::now().max(*clock + Duration::microseconds(1));
        *clock = now;
        now
    }

    fn publish(&self, action: ChangeAction, id: &str) {
        if !self.feed_muted.load(Ordering::SeqCst) {
            self.feed.publish(ChangeEvent::new(action, id));
        }
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Persistence("store is refusing writes".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn select(&self, query: OrderQuery) -> StoreResult<Vec<Order>> {
        let rows = self.rows.lock().expect("store lock poisoned");
        let mut selected: Vec<Order> = rows
            .iter()
            .filter(|o| query.estado.is_none_or(|estado| o.estado == estado))
            .cloned()
            .collect();

        selected.sort_by_key(|o| match query.order_by {
            OrderColumn::CreatedAt => o.created_at,
            OrderColumn::UpdatedAt => o.updated_at,
        });
        if query.descending {
            selected.reverse();
        }
        if let Some(limit) = query.limit {
            selected.truncate(limit);
        }
        Ok(selected)
    }

    async fn insert(&self, draft: OrderDraft) -> StoreResult<Order> {
        self.check_writable()?;

        let now = self.tick();
        let order = Order {
            id: format!("pedido:{}", Uuid::new_v4().simple()),
            numero: draft.numero,
            nombre: draft.nombre,
            detalles: draft.detalles,
            estado: OrderStatus::Pendiente,
            created_at: now,
            updated_at: now,
        };

        self.rows
            .lock()
            .expect("store lock poisoned")
            .push(order.clone());
        self.publish(ChangeAction::Created, &order.id);
        Ok(order)
    }

    async fn update_estado(&self, id: &str, estado: OrderStatus) -> StoreResult<Order> {
        self.check_writable()?;

        let now = self.tick();
        let updated = {
            let mut rows = self.rows.lock().expect("store lock poisoned");
            let row = rows
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("Order {id} not found")))?;
            row.estado = estado;
            row.updated_at = now;
            row.clone()
        };

        // Re-marking an already-listo order is a no-op state-wise, but the
        // store still signals the write.
        self.publish(ChangeAction::Updated, id);
        Ok(updated)
    }

    fn subscribe(&self, channel: &str) -> ChangeFeed {
        self.feed.subscribe(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(numero: i64, nombre: &str) -> OrderDraft {
        OrderDraft {
            numero,
            nombre: nombre.to_string(),
            detalles: "2 tacos".to_string(),
        }
    }

    fn pending_query() -> OrderQuery {
        OrderQuery {
            estado: Some(OrderStatus::Pendiente),
            order_by: OrderColumn::CreatedAt,
            descending: true,
            limit: None,
        }
    }

    #[tokio::test]
    async fn insert_creates_pending_rows_newest_first() {
        let store = MemoryStore::new();
        store.insert(draft(1, "Ana")).await.unwrap();
        store.insert(draft(2, "Luis")).await.unwrap();

        let pending = store.select(pending_query()).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].numero, 2);
        assert_eq!(pending[1].numero, 1);
        assert!(pending.iter().all(|o| o.is_pending()));
    }

    #[tokio::test]
    async fn update_estado_moves_order_to_ready() {
        let store = MemoryStore::new();
        let order = store.insert(draft(1, "Ana")).await.unwrap();

        let updated = store
            .update_estado(&order.id, OrderStatus::Listo)
            .await
            .unwrap();
        assert!(updated.is_ready());
        assert!(updated.updated_at > order.updated_at);

        assert!(store.select(pending_query()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_estado("pedido:nope", OrderStatus::Listo)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn limit_caps_ready_list() {
        let store = MemoryStore::new();
        for i in 0..5 {
            let order = store.insert(draft(i, "x")).await.unwrap();
            store
                .update_estado(&order.id, OrderStatus::Listo)
                .await
                .unwrap();
        }

        let ready = store
            .select(OrderQuery {
                estado: Some(OrderStatus::Listo),
                order_by: OrderColumn::UpdatedAt,
                descending: true,
                limit: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(ready.len(), 3);
        // Most recently marked first
        assert_eq!(ready[0].numero, 4);
        assert_eq!(ready[2].numero, 2);
    }

    #[tokio::test]
    async fn mutations_publish_change_events() {
        let store = MemoryStore::new();
        let mut feed = store.subscribe("pedidos");

        let order = store.insert(draft(1, "Ana")).await.unwrap();
        assert!(feed.changed().await);

        store
            .update_estado(&order.id, OrderStatus::Listo)
            .await
            .unwrap();
        assert!(feed.changed().await);
    }

    #[tokio::test]
    async fn muted_feed_stays_silent() {
        let store = MemoryStore::new();
        store.set_feed_muted(true);
        let mut feed = store.subscribe("pedidos");

        store.insert(draft(1, "Ana")).await.unwrap();

        let signal = tokio::time::timeout(std::time::Duration::from_millis(50), feed.changed());
        assert!(signal.await.is_err(), "muted feed must not deliver");
    }

    #[tokio::test]
    async fn failing_writes_reject_with_persistence_error() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);

        let err = store.insert(draft(1, "Ana")).await.unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert!(store.is_empty());
    }
}
