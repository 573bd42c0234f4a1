//! Customer Display API Module
//!
//! Read-only screen, served entirely by the screen fallback.

pub mod handler;
