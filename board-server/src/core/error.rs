//! Startup errors
//!
//! Boot-time failures only; request-path errors live in
//! [`crate::utils::AppError`].

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The order store could not be reached or rejected the access key
    #[error("Store connection failed: {0}")]
    Store(#[from] StoreError),

    /// Listener/socket failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for startup paths
pub type Result<T> = std::result::Result<T, ServerError>;
