//! Cashier API Handlers

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use shared::models::Order;

use crate::core::ServerState;
use crate::utils::{ok, ok_with_message, AppResponse, AppResult};
use crate::views::{CashierForm, SubmitOrder};

/// Cashier screen payload
#[derive(Debug, Serialize)]
pub struct CajeroPage {
    /// Sticky form fields plus the suggested next numero
    pub form: CashierForm,
}

/// GET /cajero (via the screen router) - current form state
pub(crate) fn page(state: &ServerState) -> Json<AppResponse<CajeroPage>> {
    ok(CajeroPage {
        form: state.cashier.form(),
    })
}

/// POST /cajero - submit a new order
pub async fn submit(
    State(state): State<ServerState>,
    Json(request): Json<SubmitOrder>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.cashier.submit(request).await?;
    Ok(ok_with_message(order, "¡Pedido agregado!"))
}
