//! Kitchen API Handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use shared::models::Order;

use crate::core::ServerState;
use crate::utils::{ok, ok_with_message, AppResponse, AppResult};
use crate::views::ViewState;

/// Kitchen screen payload
#[derive(Debug, Serialize)]
pub struct CocinaPage {
    /// `loading` before the first fetch, `ready` after
    pub state: &'static str,
    /// Pending orders, newest first
    pub pedidos: Vec<Order>,
}

/// GET /cocina (via the screen router) - pending orders
pub(crate) fn page(state: &ServerState) -> Json<AppResponse<CocinaPage>> {
    match state.kitchen.snapshot() {
        ViewState::Loading => ok(CocinaPage {
            state: "loading",
            pedidos: Vec::new(),
        }),
        ViewState::Ready(pedidos) => ok(CocinaPage {
            state: "ready",
            pedidos,
        }),
    }
}

/// POST /cocina/{id}/listo - mark one order ready
pub async fn mark_ready(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.kitchen.mark_ready(&id).await?;
    Ok(ok_with_message(order, "Pedido marcado listo"))
}
