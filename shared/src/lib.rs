//! Shared types for the ListoYa order board
//!
//! Common types used by the board server and any display client:
//! the order model and the store change-notification payloads.

pub mod message;
pub mod models;

// Re-exports
pub use message::{ChangeAction, ChangeEvent};
pub use models::{Order, OrderDraft, OrderStatus};
