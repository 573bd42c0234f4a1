//! View state machines
//!
//! One controller per screen. Each view owns a snapshot of the latest
//! fetch, replaced wholesale on every completed re-fetch (never merged),
//! and a listener task that turns change-feed signals into re-fetches.
//! Rendering is someone else's job: a view exposes its snapshot; the HTTP
//! layer (or any other renderer) is a pure function over it.

pub mod cashier;
pub mod customer;
pub mod kitchen;
pub mod screen;

// Re-exports
pub use cashier::{CashierForm, CashierView, SubmitOrder};
pub use customer::CustomerDisplay;
pub use kitchen::{Chime, KitchenView, LogChime};
pub use screen::Screen;

/// Notification channel shared by all views
pub const ORDERS_CHANNEL: &str = "pedidos";

/// Latest-known snapshot of a view
///
/// `Loading` only before the first fetch completes; after that the view
/// stays `Ready`, and a failed re-fetch leaves the previous snapshot
/// visible instead of blanking the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The rendered payload, if any fetch has completed yet
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Loading => None,
            Self::Ready(value) => Some(value),
        }
    }
}
