//! SurrealDB-backed Order Store
//!
//! Connects to the hosted store over WebSocket, defines the `pedido`
//! schema on first contact, and forwards `LIVE SELECT` notifications into
//! the change feed. Timestamps are store-assigned: `created_at` is
//! write-once, `updated_at` is recomputed by the store on every mutation.

use std::fmt;

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use shared::message::{ChangeAction, ChangeEvent};
use shared::models::{Order, OrderDraft, OrderStatus};
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::sql::Datetime;
use surrealdb::{Action, Notification, RecordId, Surreal};
use tokio_util::sync::CancellationToken;

use super::feed::{ChangeFeed, FeedPublisher, FEED_CAPACITY};
use super::{OrderQuery, OrderStore, StoreError, StoreResult};
use async_trait::async_trait;

const TABLE: &str = "pedido";

/// Table schema, applied on every connect. `estado` values are enforced
/// store-side; both timestamps are computed by the store, never the client.
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS pedido SCHEMALESS;
    DEFINE FIELD IF NOT EXISTS estado ON pedido TYPE string
        ASSERT $value INSIDE ['pendiente', 'listo'];
    DEFINE FIELD IF NOT EXISTS created_at ON pedido TYPE datetime
        VALUE time::now() READONLY;
    DEFINE FIELD IF NOT EXISTS updated_at ON pedido TYPE datetime
        VALUE time::now();
";

/// Connection settings for the hosted store
#[derive(Clone)]
pub struct StoreConfig {
    /// Store endpoint, `host:port` (WebSocket RPC)
    pub url: String,
    /// Signin user (defaults to root)
    pub user: String,
    /// Access key (signin password)
    pub key: String,
    /// Namespace
    pub namespace: String,
    /// Database name
    pub database: String,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the access key
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

/// Row shape of the `pedido` table
#[derive(Debug, Deserialize)]
struct PedidoRow {
    id: RecordId,
    numero: i64,
    nombre: String,
    detalles: String,
    estado: OrderStatus,
    created_at: Datetime,
    updated_at: Datetime,
}

impl From<PedidoRow> for Order {
    fn from(row: PedidoRow) -> Self {
        Self {
            id: row.id.to_string(),
            numero: row.numero,
            nombre: row.nombre,
            detalles: row.detalles,
            estado: row.estado,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        }
    }
}

/// Insert payload; timestamps and id come back store-assigned
#[derive(Debug, Serialize)]
struct NewPedido {
    numero: i64,
    nombre: String,
    detalles: String,
    estado: OrderStatus,
}

#[derive(Debug, Serialize)]
struct EstadoPatch {
    estado: OrderStatus,
}

/// Remote order store (SurrealDB over WebSocket)
#[derive(Clone)]
pub struct SurrealStore {
    db: Surreal<Client>,
    feed: FeedPublisher,
    shutdown: CancellationToken,
}

impl SurrealStore {
    /// Connect, sign in, apply the schema and start the live-query
    /// forwarder. Any failure here is a startup failure: an unreachable
    /// endpoint or a rejected access key must never degrade into a silent
    /// no-op.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let db = Surreal::new::<Ws>(config.url.as_str()).await.map_err(|e| {
            StoreError::Connection(format!("cannot reach store at {}: {e}", config.url))
        })?;

        db.signin(Root {
            username: &config.user,
            password: &config.key,
        })
        .await
        .map_err(|e| StoreError::Connection(format!("store rejected access key: {e}")))?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| StoreError::Connection(format!("cannot select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| StoreError::Connection(format!("schema definition failed: {e}")))?;

        let store = Self {
            db,
            feed: FeedPublisher::new(FEED_CAPACITY),
            shutdown: CancellationToken::new(),
        };
        store.start_live_forwarder().await?;

        tracing::info!(url = %config.url, ns = %config.namespace, db = %config.database, "Connected to order store");
        Ok(store)
    }

    /// Open the `LIVE SELECT` on `pedido` and pump its notifications into
    /// the change feed until shutdown.
    async fn start_live_forwarder(&self) -> StoreResult<()> {
        let stream = self
            .db
            .select::<Vec<PedidoRow>>(TABLE)
            .live()
            .await
            .map_err(|e| StoreError::Connection(format!("live query failed: {e}")))?;

        let feed = self.feed.clone();
        let token = self.shutdown.clone();
        tokio::spawn(async move {
            let mut stream = Box::pin(stream);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    item = stream.next() => match item {
                        Some(Ok(notification)) => feed.publish(to_change_event(&notification)),
                        Some(Err(e)) => {
                            // Still a signal that something changed; the
                            // payload is advisory anyway.
                            tracing::warn!("live notification error: {e}");
                            feed.publish(ChangeEvent::new(ChangeAction::Updated, ""));
                        }
                        None => {
                            tracing::warn!("live query stream ended");
                            break;
                        }
                    },
                }
            }
            tracing::debug!("live forwarder stopped");
        });
        Ok(())
    }

    /// Stop forwarding notifications. Subscribers observe a closed feed.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Cheap reachability probe for health checks
    pub async fn ping(&self) -> StoreResult<()> {
        self.db
            .query("RETURN true")
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

fn to_change_event(notification: &Notification<PedidoRow>) -> ChangeEvent {
    let action = match notification.action {
        Action::Create => ChangeAction::Created,
        Action::Update => ChangeAction::Updated,
        Action::Delete => ChangeAction::Deleted,
        // Action is non_exhaustive; anything new is still "changed"
        _ => ChangeAction::Updated,
    };
    ChangeEvent::new(action, notification.data.id.to_string())
}

#[async_trait]
impl OrderStore for SurrealStore {
    async fn select(&self, query: OrderQuery) -> StoreResult<Vec<Order>> {
        let mut sql = String::from("SELECT * FROM pedido");
        if query.estado.is_some() {
            sql.push_str(" WHERE estado = $estado");
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(query.order_by.as_str());
        sql.push_str(if query.descending { " DESC" } else { " ASC" });
        if query.limit.is_some() {
            sql.push_str(" LIMIT $limit");
        }

        let mut request = self.db.query(sql);
        if let Some(estado) = query.estado {
            request = request.bind(("estado", estado.as_str()));
        }
        if let Some(limit) = query.limit {
            request = request.bind(("limit", limit as i64));
        }

        let mut response = request
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let rows: Vec<PedidoRow> = response
            .take(0)
            .map_err(|e| StoreError::Persistence(format!("malformed row: {e}")))?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn insert(&self, draft: OrderDraft) -> StoreResult<Order> {
        let created: Option<PedidoRow> = self
            .db
            .create(TABLE)
            .content(NewPedido {
                numero: draft.numero,
                nombre: draft.nombre,
                detalles: draft.detalles,
                estado: OrderStatus::Pendiente,
            })
            .await
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        created
            .map(Order::from)
            .ok_or_else(|| StoreError::Persistence("store returned no row for insert".into()))
    }

    async fn update_estado(&self, id: &str, estado: OrderStatus) -> StoreResult<Order> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| StoreError::NotFound(format!("Invalid order ID format: {id}")))?;

        let updated: Option<PedidoRow> = self
            .db
            .update(record_id)
            .merge(EstadoPatch { estado })
            .await
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        updated
            .map(Order::from)
            .ok_or_else(|| StoreError::NotFound(format!("Order {id} not found")))
    }

    fn subscribe(&self, channel: &str) -> ChangeFeed {
        self.feed.subscribe(channel)
    }
}
