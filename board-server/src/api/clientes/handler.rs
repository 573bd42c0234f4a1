//! Customer Display API Handlers

use axum::Json;
use serde::Serialize;
use shared::models::Order;

use crate::core::ServerState;
use crate::utils::{ok, AppResponse};
use crate::views::ViewState;

/// Customer Display payload
#[derive(Debug, Serialize)]
pub struct ClientesPage {
    /// `loading` before the first fetch, `ready` after
    pub state: &'static str,
    /// Recently completed orders, most recent first, at most 20
    pub pedidos: Vec<Order>,
    /// Placeholder when nothing is ready yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<&'static str>,
}

/// GET /clientes (via the screen router) - ready orders
pub(crate) fn page(state: &ServerState) -> Json<AppResponse<ClientesPage>> {
    match state.customer.snapshot() {
        ViewState::Loading => ok(ClientesPage {
            state: "loading",
            pedidos: Vec::new(),
            mensaje: None,
        }),
        ViewState::Ready(pedidos) => {
            let mensaje = pedidos
                .is_empty()
                .then_some("Ningún pedido listo aún...");
            ok(ClientesPage {
                state: "ready",
                pedidos,
                mensaje,
            })
        }
    }
}
