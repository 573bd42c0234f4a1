//! Kitchen API Module
//!
//! The page itself is served by the screen fallback; only the mark-ready
//! action needs a route.

pub mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/cocina/{id}/listo", post(handler::mark_ready))
}
