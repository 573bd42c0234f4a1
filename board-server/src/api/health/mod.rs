//! Health check route
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /health | GET | status, version and store reachability |

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// healthy | degraded
    status: &'static str,
    version: &'static str,
    store: CheckResult,
}

/// Single check result
#[derive(Serialize)]
pub struct CheckResult {
    /// ok | error
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    fn ok() -> Self {
        Self {
            status: "ok",
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
        }
    }
}

/// GET /health
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let store = match state.check_store().await {
        Ok(()) => CheckResult::ok(),
        Err(e) => CheckResult::error(e.to_string()),
    };

    Json(HealthResponse {
        status: if store.status == "ok" {
            "healthy"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        store,
    })
}
