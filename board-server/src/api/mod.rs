//! API routing
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`cocina`] - kitchen screen and mark-ready action
//! - [`clientes`] - customer display screen
//! - [`cajero`] - cashier screen and order submission
//!
//! Page GETs are not registered as individual routes: the fallback handler
//! runs [`Screen::from_path`] on every unmatched request, so each full
//! navigation re-evaluates the path → screen mapping and anything
//! unrecognized lands on the landing page.

pub mod cajero;
pub mod clientes;
pub mod cocina;
pub mod health;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::utils::ok;
use crate::views::Screen;

/// Assemble the application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(cocina::router())
        .merge(cajero::router())
        .fallback(screen)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// View Router entry point: map the navigation path to a screen
async fn screen(State(state): State<ServerState>, uri: Uri) -> Response {
    match Screen::from_path(uri.path()) {
        Screen::Cocina => cocina::handler::page(&state).into_response(),
        Screen::Clientes => clientes::handler::page(&state).into_response(),
        Screen::Cajero => cajero::handler::page(&state).into_response(),
        Screen::Landing => landing().into_response(),
    }
}

/// Landing page payload: links to the three screens
#[derive(Debug, Serialize)]
pub struct LandingPage {
    pub titulo: &'static str,
    pub pantallas: Vec<ScreenLink>,
}

#[derive(Debug, Serialize)]
pub struct ScreenLink {
    pub titulo: &'static str,
    pub path: &'static str,
}

fn landing() -> Json<AppResponse<LandingPage>> {
    let pantallas = [Screen::Cocina, Screen::Clientes, Screen::Cajero]
        .into_iter()
        .map(|screen| ScreenLink {
            titulo: screen.title(),
            path: screen.path(),
        })
        .collect();
    ok(LandingPage {
        titulo: "¡Bienvenido a ListoYa!",
        pantallas,
    })
}
