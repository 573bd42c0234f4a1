//! Server state
//!
//! [`ServerState`] holds shared references to the store, the repository
//! and the three view controllers. The store is injected, never a
//! process-wide singleton: `initialize` wires the remote SurrealDB store,
//! `with_store` accepts any [`OrderStore`] (tests pass a
//! [`crate::store::MemoryStore`]).

use std::sync::Arc;
use std::time::Duration;

use crate::core::{Config, Result};
use crate::store::{OrderRepository, OrderStore, StoreResult, SurrealStore};
use crate::views::{CashierView, CustomerDisplay, KitchenView, LogChime};

/// Shared server state, cheap to clone (everything behind Arc)
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// The injected order store
    store: Arc<dyn OrderStore>,
    /// Remote store handle, kept for health checks and shutdown;
    /// `None` when a fake store was injected
    surreal: Option<SurrealStore>,
    /// Domain façade over the store
    pub repository: OrderRepository,
    /// Pending-orders screen
    pub kitchen: Arc<KitchenView>,
    /// Ready-orders screen
    pub customer: Arc<CustomerDisplay>,
    /// Order-entry screen
    pub cashier: Arc<CashierView>,
}

impl ServerState {
    /// Connect to the remote order store and build the views.
    ///
    /// An unreachable endpoint or rejected access key fails here. This is
    /// the startup failure the configuration contract demands.
    pub async fn initialize(config: &Config) -> Result<Self> {
        let surreal = SurrealStore::connect(&config.store_config()).await?;
        let mut state = Self::with_store(config.clone(), Arc::new(surreal.clone()));
        state.surreal = Some(surreal);
        Ok(state)
    }

    /// Build the state over an injected store (test substitution)
    pub fn with_store(config: Config, store: Arc<dyn OrderStore>) -> Self {
        let repository = OrderRepository::new(store.clone());
        let kitchen = Arc::new(KitchenView::new(repository.clone(), Arc::new(LogChime)));
        let customer = Arc::new(CustomerDisplay::new(
            repository.clone(),
            Duration::from_secs(config.customer_refresh_secs),
        ));
        let cashier = Arc::new(CashierView::new(repository.clone()));

        Self {
            config,
            store,
            surreal: None,
            repository,
            kitchen,
            customer,
            cashier,
        }
    }

    /// Mount the subscribed views. Must be called before serving.
    pub fn start_background_tasks(&self) {
        self.kitchen.mount();
        self.customer.mount();
    }

    /// Unmount the views and stop forwarding store notifications
    pub fn shutdown(&self) {
        self.kitchen.unmount();
        self.customer.unmount();
        if let Some(surreal) = &self.surreal {
            surreal.shutdown();
        }
        tracing::info!("views unmounted");
    }

    /// Store reachability, for the health endpoint
    pub async fn check_store(&self) -> StoreResult<()> {
        match &self.surreal {
            Some(surreal) => surreal.ping().await,
            // An injected store is in-process; nothing to probe
            None => Ok(()),
        }
    }

    /// The injected store handle
    pub fn store(&self) -> Arc<dyn OrderStore> {
        self.store.clone()
    }
}
