//! Order Repository
//!
//! Thin façade translating the board's domain operations into store
//! queries. This is the only place that knows which columns and sort
//! orders back each view.

use std::sync::Arc;

use shared::models::{Order, OrderDraft, OrderStatus};

use super::feed::ChangeFeed;
use super::{OrderColumn, OrderQuery, OrderStore, StoreError, StoreResult};

/// Customer Display window: the most recently completed orders
pub const RECENTLY_READY_LIMIT: usize = 20;

/// Domain façade over the order store
#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<dyn OrderStore>,
}

impl OrderRepository {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Insert a new order with estado=pendiente.
    ///
    /// Field presence is enforced by the form, re-checked here defensively
    /// before touching the store.
    pub async fn create_order(&self, draft: OrderDraft) -> StoreResult<Order> {
        if draft.nombre.trim().is_empty() {
            return Err(StoreError::Persistence("nombre must not be empty".into()));
        }
        if draft.detalles.trim().is_empty() {
            return Err(StoreError::Persistence("detalles must not be empty".into()));
        }

        let order = self.store.insert(draft).await?;
        tracing::info!(id = %order.id, numero = order.numero, "order created");
        Ok(order)
    }

    /// All pending orders, newest first, no limit
    pub async fn list_pending(&self) -> StoreResult<Vec<Order>> {
        self.store
            .select(OrderQuery {
                estado: Some(OrderStatus::Pendiente),
                order_by: OrderColumn::CreatedAt,
                descending: true,
                limit: None,
            })
            .await
    }

    /// Move an order to listo. Idempotent in effect: re-marking a listo
    /// order changes nothing state-wise, but the store still refreshes
    /// updated_at and notifies subscribers.
    pub async fn mark_ready(&self, id: &str) -> StoreResult<Order> {
        let order = self.store.update_estado(id, OrderStatus::Listo).await?;
        tracing::info!(id = %order.id, numero = order.numero, "order marked listo");
        Ok(order)
    }

    /// Most recently completed orders, capped at `limit`
    pub async fn list_recently_ready(&self, limit: usize) -> StoreResult<Vec<Order>> {
        self.store
            .select(OrderQuery {
                estado: Some(OrderStatus::Listo),
                order_by: OrderColumn::UpdatedAt,
                descending: true,
                limit: Some(limit),
            })
            .await
    }

    /// Register interest in order-table changes
    pub fn subscribe(&self, channel: &str) -> ChangeFeed {
        self.store.subscribe(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn repo() -> (Arc<MemoryStore>, OrderRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = OrderRepository::new(store.clone());
        (store, repo)
    }

    fn draft(numero: i64) -> OrderDraft {
        OrderDraft {
            numero,
            nombre: "Ana".to_string(),
            detalles: "2 tacos".to_string(),
        }
    }

    #[tokio::test]
    async fn created_orders_start_pending() {
        let (_, repo) = repo();
        let order = repo.create_order(draft(1)).await.unwrap();
        assert_eq!(order.estado, OrderStatus::Pendiente);

        let pending = repo.list_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert!(repo
            .list_recently_ready(RECENTLY_READY_LIMIT)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_before_the_store() {
        let (store, repo) = repo();
        let err = repo
            .create_order(OrderDraft {
                numero: 1,
                nombre: "   ".to_string(),
                detalles: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn mark_ready_is_one_directional() {
        let (_, repo) = repo();
        let order = repo.create_order(draft(1)).await.unwrap();

        let ready = repo.mark_ready(&order.id).await.unwrap();
        assert_eq!(ready.estado, OrderStatus::Listo);
        assert!(repo.list_pending().await.unwrap().is_empty());

        // Re-marking stays listo and still succeeds
        let again = repo.mark_ready(&order.id).await.unwrap();
        assert_eq!(again.estado, OrderStatus::Listo);
        assert!(again.updated_at >= ready.updated_at);
    }

    #[tokio::test]
    async fn mark_ready_unknown_id_fails() {
        let (_, repo) = repo();
        assert!(matches!(
            repo.mark_ready("pedido:missing").await.unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn recently_ready_is_capped_and_ordered() {
        let (_, repo) = repo();
        let mut ids = Vec::new();
        for i in 0..25 {
            let order = repo.create_order(draft(i)).await.unwrap();
            ids.push(order.id);
        }
        for id in &ids {
            repo.mark_ready(id).await.unwrap();
        }

        let ready = repo.list_recently_ready(RECENTLY_READY_LIMIT).await.unwrap();
        assert_eq!(ready.len(), RECENTLY_READY_LIMIT);
        // Marked in creation order, so the last marked (numero 24) leads
        assert_eq!(ready[0].numero, 24);
        assert_eq!(ready[19].numero, 5);
    }
}
