//! Order Store
//!
//! The board owns no data: every order lives in a remote table (`pedido`)
//! behind the [`OrderStore`] contract. The contract is deliberately small:
//! the four operations the hosted backend exposes and nothing more:
//!
//! - select (equality filter on `estado`, one sort column, optional limit)
//! - insert (one new row, always `pendiente`)
//! - update (`estado` assignment on one record)
//! - subscribe (row-level change notifications on a named channel)
//!
//! Implementations:
//!
//! - [`SurrealStore`] - the real thing, a remote SurrealDB over WebSocket
//! - [`MemoryStore`] - in-process fake for tests and demos

pub mod feed;
pub mod memory;
pub mod repository;
pub mod surreal;

// Re-exports
pub use feed::{ChangeFeed, FeedPublisher};
pub use memory::MemoryStore;
pub use repository::OrderRepository;
pub use surreal::{StoreConfig, SurrealStore};

use async_trait::async_trait;
use shared::models::{Order, OrderDraft, OrderStatus};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// Cannot reach the store (transport failure)
    #[error("Store connection error: {0}")]
    Connection(String),

    /// The store rejected a write
    #[error("Store rejected write: {0}")]
    Persistence(String),

    /// Mutation on a record that does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Sort column for [`OrderQuery`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderColumn {
    CreatedAt,
    UpdatedAt,
}

impl OrderColumn {
    /// Column name in the `pedido` table
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Query shape accepted by [`OrderStore::select`]
///
/// Mirrors what the hosted backend can do: one equality filter, one sort
/// column, an optional row limit. Nothing richer is needed by the views.
#[derive(Debug, Clone)]
pub struct OrderQuery {
    /// Equality filter on `estado`; `None` selects all rows
    pub estado: Option<OrderStatus>,
    /// Sort column
    pub order_by: OrderColumn,
    /// Newest-first when true
    pub descending: bool,
    /// Optional row cap
    pub limit: Option<usize>,
}

/// The remote persistence and notification service holding all order data.
///
/// Injected as `Arc<dyn OrderStore>` everywhere (never a process-wide
/// singleton) so tests can substitute [`MemoryStore`].
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Run a query against the `pedido` table
    async fn select(&self, query: OrderQuery) -> StoreResult<Vec<Order>>;

    /// Insert a new order row. The store assigns `id`, `created_at` and
    /// `updated_at`; `estado` starts as `pendiente`.
    async fn insert(&self, draft: OrderDraft) -> StoreResult<Order>;

    /// Assign `estado` on the identified order; the store refreshes
    /// `updated_at`. Fails with [`StoreError::NotFound`] on unknown ids.
    async fn update_estado(&self, id: &str, estado: OrderStatus) -> StoreResult<Order>;

    /// Register interest in row-level changes. The returned feed delivers
    /// one signal per observed mutation; dropping it releases the
    /// subscription.
    fn subscribe(&self, channel: &str) -> ChangeFeed;
}
