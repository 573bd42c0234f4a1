//! ListoYa Board Server - restaurant order-status board
//!
//! # Architecture
//!
//! Three screens over one remote table. The cashier enters orders, the
//! kitchen works the pending list, the customer display shows what is
//! ready to pick up. All state lives in the hosted order store; this
//! server only subscribes, re-fetches and re-renders.
//!
//! # Module structure
//!
//! ```text
//! board-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── store/         # store contract, SurrealDB + in-memory backends
//! ├── views/         # screen state machines and the path router
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod store;
pub mod utils;
pub mod views;

// Re-export public types
pub use crate::core::{Config, Server, ServerError, ServerState};
pub use crate::store::{MemoryStore, OrderRepository, OrderStore, StoreError, SurrealStore};
pub use crate::views::{CashierView, Chime, CustomerDisplay, KitchenView, Screen};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __    _      __        __  __
   / /   (_)____/ /_____   \ \/ /___ _
  / /   / / ___/ __/ __ \   \  / __ `/
 / /___/ (__  ) /_/ /_/ /   / / /_/ /
/_____/_/____/\__/\____/   /_/\__,_/
    "#
    );
}
