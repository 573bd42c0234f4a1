//! Cashier API Module
//!
//! The form page is served by the screen fallback; submission is a POST.

pub mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/cajero", post(handler::submit))
}
