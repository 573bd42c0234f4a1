//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResult`] - request-path error handling
//! - [`AppResponse`] - API response envelope
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;

pub use error::{ok, ok_with_message, AppError, AppResponse, AppResult};
